//! Error types for value validation and policy building

use thiserror::Error;

/// A validation rule that a configured value violated.
///
/// Each bucket-name rule has its own variant so callers can report exactly
/// which check failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Bucket name is empty
    #[error("bucket name is empty")]
    EmptyBucketName,

    /// Bucket name is shorter than 3 or longer than 63 characters
    #[error("bucket name '{0}' must be between 3 and 63 characters long")]
    BucketNameLength(String),

    /// Bucket name contains a forbidden character or a boundary hyphen
    #[error(
        "bucket name '{0}' must contain only lowercase letters, numbers, hyphens and periods, \
         and must not start or end with a hyphen"
    )]
    BucketNamePattern(String),

    /// Bucket name starts with a reserved prefix
    #[error("bucket name '{name}' must not start with '{prefix}'")]
    BucketNamePrefix { name: String, prefix: &'static str },

    /// Bucket name ends with a reserved suffix
    #[error("bucket name '{name}' must not end with '{suffix}'")]
    BucketNameSuffix { name: String, suffix: &'static str },

    /// Bucket name contains `..` or `--`
    #[error("bucket name '{0}' must not contain consecutive periods or hyphens")]
    BucketNameSequence(String),

    /// Region is empty
    #[error("region is empty")]
    EmptyRegion,

    /// Region is not a known AWS region
    #[error("invalid region '{0}'")]
    UnknownRegion(String),

    /// Domain is empty
    #[error("domain is empty")]
    EmptyDomain,

    /// Domain has an empty or non-alphanumeric label
    #[error("invalid domain '{0}'")]
    InvalidDomain(String),

    /// One or more allowed origins are invalid
    #[error("invalid allow origins: {}", join_errors(.0))]
    InvalidOrigins(Vec<ValidationError>),

    /// Endpoint is not an absolute URL with scheme and host
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Deploy target path is empty
    #[error("deploy target is empty")]
    EmptyDeployTarget,

    /// Template version is empty
    #[error("spare template version is empty")]
    EmptyTemplateVersion,
}

impl ValidationError {
    /// Short tag naming the rule that failed
    pub fn rule(&self) -> &'static str {
        match self {
            ValidationError::EmptyBucketName
            | ValidationError::EmptyRegion
            | ValidationError::EmptyDomain
            | ValidationError::EmptyDeployTarget
            | ValidationError::EmptyTemplateVersion => "empty",
            ValidationError::BucketNameLength(_) => "length",
            ValidationError::BucketNamePattern(_) => "pattern",
            ValidationError::BucketNamePrefix { .. } => "prefix",
            ValidationError::BucketNameSuffix { .. } => "suffix",
            ValidationError::BucketNameSequence(_) => "sequence",
            ValidationError::UnknownRegion(_) => "unknown-region",
            ValidationError::InvalidDomain(_) | ValidationError::InvalidOrigins(_) => "domain",
            ValidationError::InvalidEndpoint { .. } => "endpoint",
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure while rendering a bucket policy document
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("failed to serialize bucket policy for '{bucket}': {source}")]
    Serialize {
        bucket: String,
        #[source]
        source: serde_json::Error,
    },
}
