//! S3 client construction

use aws_sdk_s3::Client as AwsS3Client;
use aws_sdk_sts::Client as AwsStsClient;

use super::error::S3Result;
use crate::protocol::AwsSettings;

/// S3 client for AWS S3 and S3-compatible backends such as LocalStack
#[derive(Clone)]
pub struct S3Client {
    /// AWS S3 client
    client: AwsS3Client,

    /// Resolves the account that owns the buckets
    sts: AwsStsClient,

    settings: AwsSettings,
}

impl S3Client {
    /// Create a new S3 client for the given settings
    ///
    /// # Example
    ///
    /// ```no_run
    /// use spare::model::{AwsProfile, Region};
    /// use spare::protocol::{AwsSettings, S3Client};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let settings = AwsSettings::new(AwsProfile::new(None), Region::default(), None);
    ///     let client = S3Client::new(settings).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(settings: AwsSettings) -> S3Result<Self> {
        settings.validate()?;
        let sdk_config = settings.load_sdk_config().await;
        let client = Self::build_aws_client(&settings, &sdk_config);
        let sts = AwsStsClient::new(&sdk_config);
        Ok(Self {
            client,
            sts,
            settings,
        })
    }

    fn build_aws_client(settings: &AwsSettings, sdk_config: &aws_config::SdkConfig) -> AwsS3Client {
        // Custom endpoints (LocalStack, MinIO) need path-style addressing
        if settings.endpoint.is_some() {
            let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
                .force_path_style(true)
                .build();
            return AwsS3Client::from_conf(s3_config);
        }

        AwsS3Client::new(sdk_config)
    }

    pub fn settings(&self) -> &AwsSettings {
        &self.settings
    }

    /// Get a reference to the underlying AWS S3 client
    pub fn aws_client(&self) -> &AwsS3Client {
        &self.client
    }

    pub(crate) fn sts_client(&self) -> &AwsStsClient {
        &self.sts
    }
}

impl std::fmt::Debug for S3Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Client")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

