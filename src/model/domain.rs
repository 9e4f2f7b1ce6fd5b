//! Host names used for the custom CDN domain and CORS origins

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Validate, ValidationError};

/// A dot-separated host name such as `www.example.com`.
///
/// Every label must be non-empty ASCII alphanumerics. Hyphens and URL
/// schemes are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    pub fn new(domain: impl Into<String>) -> Self {
        Self(domain.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Validate for Domain {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::EmptyDomain);
        }
        let labels_ok = self
            .0
            .split('.')
            .all(|label| !label.is_empty() && label.bytes().all(|b| b.is_ascii_alphanumeric()));
        if !labels_ok {
            return Err(ValidationError::InvalidDomain(self.0.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Domain {
    fn from(domain: &str) -> Self {
        Self::new(domain)
    }
}

impl From<String> for Domain {
    fn from(domain: String) -> Self {
        Self(domain)
    }
}

/// Origins allowed to fetch the site's assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowOrigins(Vec<Domain>);

impl AllowOrigins {
    pub fn new(origins: Vec<Domain>) -> Self {
        Self(origins)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Domain> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Validate for AllowOrigins {
    /// Checks every origin and reports all failures together.
    fn validate(&self) -> Result<(), ValidationError> {
        let errors: Vec<ValidationError> = self
            .0
            .iter()
            .filter_map(|origin| origin.validate().err())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::InvalidOrigins(errors))
        }
    }
}

impl<D: Into<Domain>> FromIterator<D> for AllowOrigins {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
