//! S3 bucket names

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Validate, ValidationError};

/// Minimum bucket name length.
pub const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
pub const MAX_BUCKET_NAME_LEN: usize = 63;

/// Suffix of the public S3 hostname for a bucket.
pub const S3_DOMAIN_SUFFIX: &str = "s3.amazonaws.com";

// `sthree-configurator` is covered by `sthree-` but is listed so the error
// names the more specific prefix.
const RESERVED_PREFIXES: &[&str] = &["sthree-configurator", "xn--", "sthree-"];

const RESERVED_SUFFIXES: &[&str] = &["-s3alias", "--ol-s3"];

/// Name of the S3 bucket that hosts the site.
///
/// Rules follow the S3 bucket naming documentation:
/// <https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html>
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketName(String);

impl BucketName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Public hostname of the bucket, e.g. `my-site.s3.amazonaws.com`
    pub fn domain(&self) -> String {
        format!("{}.{}", self.0, S3_DOMAIN_SUFFIX)
    }

    /// ARN matching every object in the bucket
    pub fn objects_arn(&self) -> String {
        format!("arn:aws:s3:::{}/*", self.0)
    }

    fn validate_length(&self) -> Result<(), ValidationError> {
        if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&self.0.len()) {
            return Err(ValidationError::BucketNameLength(self.0.clone()));
        }
        Ok(())
    }

    fn validate_pattern(&self) -> Result<(), ValidationError> {
        let allowed = self
            .0
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.');
        if !allowed || self.0.starts_with('-') || self.0.ends_with('-') {
            return Err(ValidationError::BucketNamePattern(self.0.clone()));
        }
        Ok(())
    }

    fn validate_prefix(&self) -> Result<(), ValidationError> {
        match RESERVED_PREFIXES.iter().copied().find(|p| self.0.starts_with(p)) {
            Some(prefix) => Err(ValidationError::BucketNamePrefix {
                name: self.0.clone(),
                prefix,
            }),
            None => Ok(()),
        }
    }

    fn validate_suffix(&self) -> Result<(), ValidationError> {
        match RESERVED_SUFFIXES.iter().copied().find(|s| self.0.ends_with(s)) {
            Some(suffix) => Err(ValidationError::BucketNameSuffix {
                name: self.0.clone(),
                suffix,
            }),
            None => Ok(()),
        }
    }

    fn validate_char_sequence(&self) -> Result<(), ValidationError> {
        if self.0.contains("..") || self.0.contains("--") {
            return Err(ValidationError::BucketNameSequence(self.0.clone()));
        }
        Ok(())
    }
}

impl Validate for BucketName {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::EmptyBucketName);
        }
        self.validate_length()?;
        self.validate_pattern()?;
        self.validate_prefix()?;
        self.validate_suffix()?;
        self.validate_char_sequence()
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BucketName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for BucketName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> BucketName {
        BucketName::new(s)
    }

    #[test]
    fn test_display() {
        assert_eq!(name("spare").to_string(), "spare");
    }

    #[test]
    fn test_domain() {
        assert_eq!(name("abc").domain(), "abc.s3.amazonaws.com");
    }

    #[test]
    fn test_objects_arn() {
        assert_eq!(name("abc").objects_arn(), "arn:aws:s3:::abc/*");
    }

    #[test]
    fn test_validate_length() {
        assert!(name("abc").validate_length().is_ok());
        assert!(name(&"a".repeat(63)).validate_length().is_ok());
        assert_eq!(
            name("ab").validate_length(),
            Err(ValidationError::BucketNameLength("ab".into()))
        );
        assert!(name(&"a".repeat(64)).validate_length().is_err());
    }

    #[test]
    fn test_validate_pattern() {
        assert!(name("abc").validate_pattern().is_ok());
        assert!(name("a.b-c1").validate_pattern().is_ok());
        for bad in ["abc!", "Abc", "abc_def", "-abc", "abc-"] {
            assert!(
                matches!(
                    name(bad).validate_pattern(),
                    Err(ValidationError::BucketNamePattern(_))
                ),
                "{bad} should fail the pattern check"
            );
        }
    }

    #[test]
    fn test_validate_prefix() {
        assert!(name("abc").validate_prefix().is_ok());
        assert!(name("xn--abc").validate_prefix().is_err());
        assert!(name("sthree-abc").validate_prefix().is_err());
        assert_eq!(
            name("sthree-configurator-abc").validate_prefix(),
            Err(ValidationError::BucketNamePrefix {
                name: "sthree-configurator-abc".into(),
                prefix: "sthree-configurator",
            })
        );
    }

    #[test]
    fn test_validate_suffix() {
        assert!(name("abc").validate_suffix().is_ok());
        assert!(name("abc-s3alias").validate_suffix().is_err());
        assert!(name("abc--ol-s3").validate_suffix().is_err());
    }

    #[test]
    fn test_validate_char_sequence() {
        assert!(name("abc").validate_char_sequence().is_ok());
        assert!(name("abc..def").validate_char_sequence().is_err());
        assert!(name("abc--def").validate_char_sequence().is_err());
    }

    #[test]
    fn test_validate() {
        assert!(name("abc").validate().is_ok());
        assert!(name("spare-us-east-1-0a1b2c3d4e5f6g7").validate().is_ok());
        assert_eq!(name("").validate(), Err(ValidationError::EmptyBucketName));
        assert!(matches!(
            name("abc..def").validate(),
            Err(ValidationError::BucketNameSequence(_))
        ));
    }

    #[test]
    fn test_validate_every_length() {
        for len in 0..=70 {
            let candidate = name(&"a".repeat(len));
            let in_range = (MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len);
            assert_eq!(candidate.validate().is_ok(), in_range, "length {len}");
        }
    }

    #[test]
    fn test_serde_transparent() {
        let yaml = serde_yaml::to_string(&name("my-bucket")).unwrap();
        assert_eq!(yaml.trim(), "my-bucket");
    }
}
