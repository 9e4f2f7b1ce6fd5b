/*!
 * Error types for spare
 */

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::deploy::DeployError;
use crate::model::ValidationError;
use crate::protocol::S3Error;
use crate::provision::{ProvisionError, Stage};

pub type Result<T> = std::result::Result<T, SpareError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_PARTIAL: i32 = 1;
pub const EXIT_FATAL: i32 = 2;

#[derive(Debug)]
pub enum SpareError {
    /// Reading or writing `.spare.yml` failed
    Config(ConfigError),

    /// A configured value is invalid
    Validation(ValidationError),

    /// The AWS clients could not be built
    Client(S3Error),

    /// Bucket or CDN provisioning failed
    Provision(ProvisionError),

    /// Uploading the site failed
    Deploy(DeployError),

    /// `spare init` could not write its file
    Init(String),

    /// The user declined the confirmation prompt
    Cancelled,

    /// Interactive prompt failed
    Prompt(String),

    /// Logging could not be initialised
    Logging(String),

    /// I/O error
    Io(io::Error),
}

impl SpareError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // Nothing reached the bucket yet
            SpareError::Config(_)
            | SpareError::Validation(_)
            | SpareError::Client(_)
            | SpareError::Logging(_)
            | SpareError::Init(_)
            | SpareError::Cancelled
            | SpareError::Prompt(_) => EXIT_FATAL,
            SpareError::Deploy(DeployError::TargetNotFound(_))
            | SpareError::Deploy(DeployError::OutsideTarget(_)) => EXIT_FATAL,
            // The bucket was never created
            SpareError::Provision(ProvisionError::BucketOwnedByOther { .. }) => EXIT_FATAL,
            SpareError::Provision(e) if e.failed_stage() == Some(Stage::CreateBucket) => EXIT_FATAL,
            // Earlier stages or uploads may already have been applied
            SpareError::Provision(_) | SpareError::Deploy(_) | SpareError::Io(_) => EXIT_PARTIAL,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            SpareError::Config(_) | SpareError::Logging(_) | SpareError::Init(_) => {
                ErrorCategory::Configuration
            }
            SpareError::Validation(_) => ErrorCategory::Validation,
            SpareError::Client(_) => ErrorCategory::Network,
            SpareError::Provision(_) => ErrorCategory::Provisioning,
            SpareError::Deploy(DeployError::Upload { .. }) => ErrorCategory::Network,
            SpareError::Deploy(_) => ErrorCategory::Filesystem,
            SpareError::Prompt(_) | SpareError::Cancelled => ErrorCategory::Interaction,
            SpareError::Io(_) => ErrorCategory::IoError,
        }
    }
}

/// Error category for classification and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid names, regions, domains or endpoints
    Validation,
    /// Configuration file errors
    Configuration,
    /// Remote AWS failures
    Network,
    /// Bucket and CDN setup failures
    Provisioning,
    /// Local deploy target problems
    Filesystem,
    /// Prompt and terminal errors
    Interaction,
    /// I/O operation errors
    IoError,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Configuration => write!(f, "configuration"),
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Provisioning => write!(f, "provisioning"),
            ErrorCategory::Filesystem => write!(f, "filesystem"),
            ErrorCategory::Interaction => write!(f, "interaction"),
            ErrorCategory::IoError => write!(f, "io"),
        }
    }
}

impl fmt::Display for SpareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpareError::Config(err) => write!(f, "Configuration error: {}", err),
            SpareError::Validation(err) => write!(f, "Validation error: {}", err),
            SpareError::Client(err) => write!(f, "Failed to create AWS client: {}", err),
            SpareError::Provision(err) => write!(f, "Build failed: {}", err),
            SpareError::Deploy(err) => write!(f, "Deploy failed: {}", err),
            SpareError::Init(msg) => write!(f, "Initialization failed: {}", msg),
            SpareError::Cancelled => write!(f, "Cancelled by user"),
            SpareError::Prompt(msg) => write!(f, "Prompt failed: {}", msg),
            SpareError::Logging(msg) => write!(f, "Logging error: {}", msg),
            SpareError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for SpareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpareError::Config(err) => Some(err),
            SpareError::Validation(err) => Some(err),
            SpareError::Client(err) => Some(err),
            SpareError::Provision(err) => Some(err),
            SpareError::Deploy(err) => Some(err),
            SpareError::Io(err) => Some(err),
            SpareError::Init(_)
            | SpareError::Cancelled
            | SpareError::Prompt(_)
            | SpareError::Logging(_) => None,
        }
    }
}

impl From<ConfigError> for SpareError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(err) => SpareError::Validation(err),
            other => SpareError::Config(other),
        }
    }
}

impl From<ValidationError> for SpareError {
    fn from(err: ValidationError) -> Self {
        SpareError::Validation(err)
    }
}

impl From<S3Error> for SpareError {
    fn from(err: S3Error) -> Self {
        SpareError::Client(err)
    }
}

impl From<ProvisionError> for SpareError {
    fn from(err: ProvisionError) -> Self {
        SpareError::Provision(err)
    }
}

impl From<DeployError> for SpareError {
    fn from(err: DeployError) -> Self {
        SpareError::Deploy(err)
    }
}

impl From<dialoguer::Error> for SpareError {
    fn from(err: dialoguer::Error) -> Self {
        SpareError::Prompt(err.to_string())
    }
}

impl From<io::Error> for SpareError {
    fn from(err: io::Error) -> Self {
        SpareError::Io(err)
    }
}
