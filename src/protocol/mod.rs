/*!
 * Remote capabilities used by spare
 *
 * Provisioning and deployment talk to AWS only through the traits below.
 * `s3::S3Client` and `cloudfront::CloudFrontClient` are the production
 * implementations; tests substitute in-memory doubles.
 */

pub mod cloudfront;
pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::model::{AwsProfile, BucketName, Domain, Endpoint, Region, Validate};

pub use cloudfront::CloudFrontClient;
pub use s3::{S3Client, S3Error};

/// Failure reported by a remote capability
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The bucket exists and already belongs to the caller's account
    #[error("bucket already exists and is owned by you")]
    BucketAlreadyOwnedByYou,

    /// The name is taken by another account
    #[error("bucket name is already taken by another account")]
    BucketAlreadyExists,

    #[error(transparent)]
    Remote(#[from] S3Error),
}

/// Bucket-level storage operations
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Create `bucket` in `region`
    async fn create_bucket(&self, bucket: &BucketName, region: &Region)
        -> Result<(), ServiceError>;

    /// Turn on every public access block setting for `bucket`
    async fn block_public_access(
        &self,
        bucket: &BucketName,
        region: &Region,
    ) -> Result<(), ServiceError>;

    /// Attach a JSON policy document to `bucket`
    async fn set_bucket_policy(&self, bucket: &BucketName, policy: &str)
        -> Result<(), ServiceError>;

    /// Id of the AWS account that owns buckets created through this service
    async fn account_id(&self) -> Result<String, ServiceError>;
}

/// CDN operations
#[async_trait]
pub trait CdnService: Send + Sync {
    /// Create the access handle a distribution signs its origin requests
    /// with and return its id.
    ///
    /// CloudFront implements this with an origin access control, so the
    /// bucket policy grants the CloudFront service principal rather than a
    /// per-identity user.
    async fn create_origin_access_identity(&self) -> Result<String, ServiceError>;

    /// Create a distribution in front of `bucket` that reads through the
    /// handle `access_id`, and return the distribution's public domain
    async fn create_distribution(
        &self,
        bucket: &BucketName,
        access_id: &str,
    ) -> Result<Domain, ServiceError>;
}

/// Single-object upload
#[async_trait]
pub trait ObjectUploader: Send + Sync {
    async fn upload_object(
        &self,
        bucket: &BucketName,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), ServiceError>;
}

/// Connection settings shared by the AWS clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    pub profile: AwsProfile,
    pub region: Region,
    /// Local backend override; `None` talks to AWS
    pub endpoint: Option<Endpoint>,
}

impl AwsSettings {
    pub fn new(profile: AwsProfile, region: Region, endpoint: Option<Endpoint>) -> Self {
        Self {
            profile,
            region,
            endpoint,
        }
    }

    /// Reject settings no client could be built from
    pub fn validate(&self) -> Result<(), S3Error> {
        let invalid = |e: crate::model::ValidationError| S3Error::InvalidConfig(e.to_string());
        self.region.validate().map_err(invalid)?;
        if let Some(endpoint) = &self.endpoint {
            endpoint.validate().map_err(invalid)?;
        }
        Ok(())
    }

    /// Load the shared SDK configuration for these settings
    pub async fn load_sdk_config(&self) -> aws_config::SdkConfig {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .profile_name(self.profile.as_str())
            .region(aws_config::Region::new(self.region.as_str().to_string()));

        if let Some(endpoint) = &self.endpoint {
            loader = loader.endpoint_url(endpoint.as_str());
        }

        loader.load().await
    }
}
