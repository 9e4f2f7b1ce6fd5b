//! AWS region codes

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Validate, ValidationError};

/// Regions accepted in `.spare.yml`.
pub const KNOWN_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "af-south-1",
    "ap-east-1",
    "ap-south-1",
    "ap-south-2",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ca-central-1",
    "cn-north-1",
    "cn-northwest-1",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "il-central-1",
    "me-central-1",
    "me-south-1",
    "sa-east-1",
    "us-gov-east-1",
    "us-gov-west-1",
];

/// AWS region code, e.g. `ap-northeast-1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub const US_EAST_1: &'static str = "us-east-1";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `us-east-1` is the one region where CreateBucket must not carry a
    /// location constraint.
    pub fn needs_location_constraint(&self) -> bool {
        self.0 != Self::US_EAST_1
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new(Self::US_EAST_1)
    }
}

impl Validate for Region {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::EmptyRegion);
        }
        if !KNOWN_REGIONS.contains(&self.0.as_str()) {
            return Err(ValidationError::UnknownRegion(self.0.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Region {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}
