/*!
 * Subcommand implementations for the `spare` binary
 */

pub mod build;
pub mod deploy;
pub mod init;

use std::path::PathBuf;

use tracing::debug;

use crate::config::{Config, CONFIG_FILE_PATH};
use crate::error::Result;
use crate::model::AwsProfile;
use crate::protocol::AwsSettings;

/// Options shared by `build` and `deploy`
#[derive(Debug, Clone)]
pub struct CommonOptions {
    /// Target the local endpoint from the configuration instead of AWS
    pub debug: bool,
    /// Explicit AWS profile
    pub profile: Option<String>,
    /// Path of the configuration file
    pub file: PathBuf,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            debug: false,
            profile: None,
            file: PathBuf::from(CONFIG_FILE_PATH),
        }
    }
}

impl CommonOptions {
    /// Read and validate the configuration, then derive the AWS settings from it
    pub fn load(&self) -> Result<(Config, AwsSettings)> {
        let config = Config::from_file(&self.file)?;
        config.validate(self.debug)?;
        debug!(file = %self.file.display(), debug = self.debug, "Configuration is valid");

        let settings = AwsSettings::new(
            AwsProfile::new(self.profile.as_deref()),
            config.region.clone(),
            config.endpoint(self.debug).cloned(),
        );
        Ok((config, settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpareError;
    use crate::model::{BucketName, Endpoint};
    use tempfile::tempdir;

    #[test]
    fn test_load_derives_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_PATH);
        let mut config = Config::default();
        config.s3_bucket_name = BucketName::new("my-site");
        config.create_file(&path).unwrap();

        let options = CommonOptions {
            profile: Some("staging".to_string()),
            file: path.clone(),
            ..CommonOptions::default()
        };
        let (loaded, settings) = options.load().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(settings.profile.as_str(), "staging");
        assert_eq!(settings.region, config.region);
        assert_eq!(settings.endpoint, None);

        let debug = CommonOptions {
            debug: true,
            ..options
        };
        let (_, settings) = debug.load().unwrap();
        assert_eq!(settings.endpoint, Some(Endpoint::default()));
    }

    #[test]
    fn test_load_rejects_invalid_bucket() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_PATH);
        let mut config = Config::default();
        config.s3_bucket_name = BucketName::new("Not_Valid");
        config.create_file(&path).unwrap();

        let options = CommonOptions {
            file: path,
            ..CommonOptions::default()
        };
        assert!(matches!(options.load(), Err(SpareError::Validation(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let options = CommonOptions {
            file: dir.path().join("absent.yml"),
            ..CommonOptions::default()
        };
        assert!(matches!(options.load(), Err(SpareError::Config(_))));
    }
}
