/*!
 * Configuration file for spare
 *
 * `.spare.yml` describes where the SPA lives locally and which AWS resources
 * it is published to. `spare init` writes the default document; `build` and
 * `deploy` read it back and validate every value before talking to AWS.
 */

use std::fmt;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::model::{
    AllowOrigins, BucketName, Domain, Endpoint, Region, Validate, ValidationError,
};

/// Default location of the configuration file
pub const CONFIG_FILE_PATH: &str = ".spare.yml";

/// Template version stamped by `spare init`
pub const CURRENT_TEMPLATE_VERSION: &str = "0.0.1";

/// Default deploy target directory
pub const DEFAULT_DEPLOY_TARGET: &str = "src";

const RANDOM_SUFFIX_LEN: usize = 15;
const LOWER_ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Errors reading, writing or validating `.spare.yml`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{} config file already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Version of the `.spare.yml` layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateVersion(String);

impl TemplateVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }
}

impl Default for TemplateVersion {
    fn default() -> Self {
        Self::new(CURRENT_TEMPLATE_VERSION)
    }
}

impl Validate for TemplateVersion {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::EmptyTemplateVersion);
        }
        Ok(())
    }
}

impl fmt::Display for TemplateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Local directory holding the built SPA
///
/// Existence is only checked when the directory is walked at deploy time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeployTarget(PathBuf);

impl DeployTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl Default for DeployTarget {
    fn default() -> Self {
        Self::new(DEFAULT_DEPLOY_TARGET)
    }
}

impl Validate for DeployTarget {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.0.as_os_str().is_empty() {
            return Err(ValidationError::EmptyDeployTarget);
        }
        Ok(())
    }
}

impl fmt::Display for DeployTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Contents of `.spare.yml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub spare_template_version: TemplateVersion,

    /// Path of the built SPA
    pub deploy_target: DeployTarget,

    pub region: Region,

    /// Custom domain for the distribution; empty means the CloudFront default domain
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_domain: Domain,

    #[serde(rename = "s3BucketName")]
    pub s3_bucket_name: BucketName,

    /// Domains allowed to access the SPA
    #[serde(default, deserialize_with = "null_as_default")]
    pub allow_origins: AllowOrigins,

    /// Endpoint used instead of AWS when running with `--debug`
    #[serde(default, deserialize_with = "null_as_default")]
    pub debug_localstack_endpoint: Endpoint,
}

/// A key written with no value (`customDomain:`) reads as the default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for Config {
    fn default() -> Self {
        let region = Region::default();
        let s3_bucket_name = default_bucket_name(&region);
        Self {
            spare_template_version: TemplateVersion::default(),
            deploy_target: DeployTarget::default(),
            region,
            custom_domain: Domain::default(),
            s3_bucket_name,
            allow_origins: AllowOrigins::default(),
            debug_localstack_endpoint: Endpoint::default(),
        }
    }
}

impl Config {
    /// Serialize as YAML into `writer`
    pub fn write<W: Write>(&self, writer: W) -> Result<(), ConfigError> {
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Parse YAML from `reader`
    pub fn read<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read(file)
    }

    /// Create `path` and write this configuration into it.
    ///
    /// Refuses to overwrite an existing file.
    pub fn create_file(&self, path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = File::create_new(path).map_err(io_err)?;
        self.write(file)
    }

    /// Validate every value. The debug endpoint is only checked in debug mode
    /// and the custom domain only when one is set.
    pub fn validate(&self, debug: bool) -> Result<(), ValidationError> {
        let mut validators: Vec<&dyn Validate> = vec![
            &self.spare_template_version,
            &self.deploy_target,
            &self.region,
            &self.s3_bucket_name,
            &self.allow_origins,
        ];
        if !self.custom_domain.is_empty() {
            validators.push(&self.custom_domain);
        }
        if debug {
            validators.push(&self.debug_localstack_endpoint);
        }
        validators.into_iter().try_for_each(|v| v.validate())
    }

    /// Endpoint override for the AWS clients, only in debug mode
    pub fn endpoint(&self, debug: bool) -> Option<&Endpoint> {
        debug.then_some(&self.debug_localstack_endpoint)
    }
}

/// `spare-<region>-<random>`, unique enough to avoid collisions in the global
/// bucket namespace
pub fn default_bucket_name(region: &Region) -> BucketName {
    BucketName::new(format!(
        "{}-{}-{}",
        env!("CARGO_PKG_NAME"),
        region,
        random_lower_alphanumeric(RANDOM_SUFFIX_LEN)
    ))
}

fn random_lower_alphanumeric(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| LOWER_ALPHANUMERIC[rng.random_range(0..LOWER_ALPHANUMERIC.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const READ_TEST_YML: &str = "\
spareTemplateVersion: 1.0.0
deployTarget: test-src
region: us-east-2
customDomain: example.com
s3BucketName: test-bucket
allowOrigins:
- example.com
- test.example.com
debugLocalstackEndpoint: http://localhost:4566
";

    fn valid_config() -> Config {
        Config {
            spare_template_version: TemplateVersion::new("1.0.0"),
            deploy_target: DeployTarget::new("src"),
            region: Region::new("us-east-1"),
            custom_domain: Domain::new("example.com"),
            s3_bucket_name: BucketName::new("test-bucket"),
            allow_origins: ["example.com", "test.example.com"].into_iter().collect(),
            debug_localstack_endpoint: Endpoint::default(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.spare_template_version.to_string(), "0.0.1");
        assert_eq!(config.deploy_target.as_path(), Path::new("src"));
        assert_eq!(config.region.as_str(), "us-east-1");
        assert!(config.custom_domain.is_empty());
        assert!(config.allow_origins.is_empty());
        assert_eq!(config.debug_localstack_endpoint.as_str(), "http://localhost:4566");
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn test_empty_optional_keys_read_as_defaults() {
        let yml = "\
spareTemplateVersion: 0.0.1
deployTarget: dist
region: us-east-1
customDomain:
s3BucketName: test-bucket
allowOrigins:
debugLocalstackEndpoint:
";
        let config = Config::read(yml.as_bytes()).unwrap();
        assert!(config.custom_domain.is_empty());
        assert!(config.allow_origins.is_empty());
        assert_eq!(config.debug_localstack_endpoint, Endpoint::default());
        assert!(config.validate(false).is_ok());
    }

    #[test]
    fn test_default_bucket_name_shape() {
        let name = default_bucket_name(&Region::new("ap-northeast-1"));
        let suffix = name
            .as_str()
            .strip_prefix("spare-ap-northeast-1-")
            .expect("prefix");
        assert_eq!(suffix.len(), RANDOM_SUFFIX_LEN);
        assert!(suffix
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        assert!(name.validate().is_ok());
    }

    #[test]
    fn test_write_key_order() {
        let mut buf = Vec::new();
        valid_config().write(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let keys: Vec<&str> = text
            .lines()
            .filter(|l| !l.starts_with('-'))
            .filter_map(|l| l.split(':').next())
            .collect();
        assert_eq!(
            keys,
            vec![
                "spareTemplateVersion",
                "deployTarget",
                "region",
                "customDomain",
                "s3BucketName",
                "allowOrigins",
                "debugLocalstackEndpoint",
            ]
        );
    }

    #[test]
    fn test_read() {
        let got = Config::read(READ_TEST_YML.as_bytes()).unwrap();
        let want = Config {
            deploy_target: DeployTarget::new("test-src"),
            region: Region::new("us-east-2"),
            ..valid_config()
        };
        assert_eq!(got, want);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let original = Config::default();
        let mut buf = Vec::new();
        original.write(&mut buf).unwrap();
        let restored = Config::read(buf.as_slice()).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_read_invalid_yaml() {
        let err = Config::read("region: [unclosed".as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_create_file_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_PATH);

        Config::default().create_file(&path).unwrap();
        let err = Config::default().create_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));

        let loaded = Config::from_file(&path).unwrap();
        assert!(loaded.validate(false).is_ok());
    }

    #[test]
    fn test_from_file_missing() {
        let dir = TempDir::new().unwrap();
        let err = Config::from_file(&dir.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_validate() {
        assert!(valid_config().validate(false).is_ok());

        let empty_version = Config {
            spare_template_version: TemplateVersion::new(""),
            ..valid_config()
        };
        assert_eq!(
            empty_version.validate(false),
            Err(ValidationError::EmptyTemplateVersion)
        );

        let empty_target = Config {
            deploy_target: DeployTarget::new(""),
            ..valid_config()
        };
        assert_eq!(
            empty_target.validate(false),
            Err(ValidationError::EmptyDeployTarget)
        );

        let no_domain = Config {
            custom_domain: Domain::default(),
            ..valid_config()
        };
        assert!(no_domain.validate(false).is_ok());

        let bad_domain = Config {
            custom_domain: Domain::new("https://example.com"),
            ..valid_config()
        };
        assert!(bad_domain.validate(false).is_err());
    }

    #[test]
    fn test_endpoint_only_checked_in_debug_mode() {
        let config = Config {
            debug_localstack_endpoint: Endpoint::new("localhost"),
            ..valid_config()
        };
        assert!(config.validate(false).is_ok());
        assert!(config.validate(true).is_err());
        assert!(config.endpoint(false).is_none());
        assert_eq!(config.endpoint(true), Some(&Endpoint::new("localhost")));
    }
}
