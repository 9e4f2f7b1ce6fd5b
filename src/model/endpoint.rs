//! Endpoint override for a local S3-compatible backend

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Validate, ValidationError};

/// Default LocalStack edge endpoint used in debug mode.
pub const DEBUG_LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// Endpoint URL of a local testing backend (LocalStack, MinIO, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self(endpoint.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEBUG_LOCALSTACK_ENDPOINT)
    }
}

impl Validate for Endpoint {
    fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidEndpoint {
            endpoint: self.0.clone(),
            reason: reason.to_string(),
        };
        let url = Url::parse(&self.0).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host"));
        }
        Ok(())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
