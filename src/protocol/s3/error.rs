//! Error types for AWS requests
//!
//! S3 and CloudFront share the smithy `SdkError`, so one conversion covers
//! both clients.

use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Result type alias for AWS operations
pub type S3Result<T> = Result<T, S3Error>;

/// Errors that can occur while talking to AWS
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum S3Error {
    /// AWS SDK error without a service response
    #[error("AWS SDK error: {0}")]
    Sdk(String),

    /// Service error with specific error code
    #[error("AWS service error ({code}): {message}")]
    Service { code: String, message: String },

    /// Access denied error
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Response was missing a field the caller depends on
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Convert AWS SDK errors to S3Error
impl<E> From<SdkError<E>> for S3Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    fn from(error: SdkError<E>) -> Self {
        match error {
            SdkError::DispatchFailure(e) => {
                S3Error::Network(format!("Network dispatch failure: {:?}", e))
            }
            SdkError::TimeoutError(_) => S3Error::Timeout("request timed out".to_string()),
            SdkError::ResponseError(e) => S3Error::Network(format!("Response error: {:?}", e)),
            SdkError::ServiceError(e) => {
                let err = e.err();
                let code = err.code().unwrap_or("Unknown").to_string();
                let message = err
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                if code == "AccessDenied" {
                    S3Error::AccessDenied(message)
                } else {
                    S3Error::Service { code, message }
                }
            }
            other => S3Error::Sdk(format!("{:?}", other)),
        }
    }
}
