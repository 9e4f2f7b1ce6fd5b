//! Storage and upload capabilities backed by S3

use async_trait::async_trait;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, PublicAccessBlockConfiguration,
};
use bytes::Bytes;

use super::client::S3Client;
use super::error::S3Error;
use crate::model::{BucketName, Region};
use crate::protocol::{ObjectUploader, ServiceError, StorageService};

#[async_trait]
impl StorageService for S3Client {
    async fn create_bucket(
        &self,
        bucket: &BucketName,
        region: &Region,
    ) -> Result<(), ServiceError> {
        let mut request = self.aws_client().create_bucket().bucket(bucket.as_str());

        // us-east-1 rejects an explicit location constraint
        if region.needs_location_constraint() {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region.as_str()))
                    .build(),
            );
        }

        request.send().await.map_err(classify_create_bucket_error)?;
        Ok(())
    }

    async fn block_public_access(
        &self,
        bucket: &BucketName,
        _region: &Region,
    ) -> Result<(), ServiceError> {
        let configuration = PublicAccessBlockConfiguration::builder()
            .block_public_acls(true)
            .block_public_policy(true)
            .ignore_public_acls(true)
            .restrict_public_buckets(true)
            .build();

        self.aws_client()
            .put_public_access_block()
            .bucket(bucket.as_str())
            .public_access_block_configuration(configuration)
            .send()
            .await
            .map_err(S3Error::from)?;
        Ok(())
    }

    async fn set_bucket_policy(
        &self,
        bucket: &BucketName,
        policy: &str,
    ) -> Result<(), ServiceError> {
        self.aws_client()
            .put_bucket_policy()
            .bucket(bucket.as_str())
            .policy(policy)
            .send()
            .await
            .map_err(S3Error::from)?;
        Ok(())
    }

    async fn account_id(&self) -> Result<String, ServiceError> {
        let output = self
            .sts_client()
            .get_caller_identity()
            .send()
            .await
            .map_err(S3Error::from)?;

        output.account().map(str::to_string).ok_or_else(|| {
            S3Error::MalformedResponse("account missing from caller identity".to_string()).into()
        })
    }
}

#[async_trait]
impl ObjectUploader for S3Client {
    async fn upload_object(
        &self,
        bucket: &BucketName,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), ServiceError> {
        self.aws_client()
            .put_object()
            .bucket(bucket.as_str())
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(S3Error::from)?;
        Ok(())
    }
}

fn classify_create_bucket_error(error: SdkError<CreateBucketError>) -> ServiceError {
    if let Some(err) = error.as_service_error() {
        if err.is_bucket_already_owned_by_you() {
            return ServiceError::BucketAlreadyOwnedByYou;
        }
        if err.is_bucket_already_exists() {
            return ServiceError::BucketAlreadyExists;
        }
    }
    ServiceError::Remote(S3Error::from(error))
}
