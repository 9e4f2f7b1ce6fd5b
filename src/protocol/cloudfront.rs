//! CDN capability backed by CloudFront

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use aws_sdk_cloudfront::error::BuildError;
use aws_sdk_cloudfront::types::{
    CustomErrorResponse, CustomErrorResponses, DefaultCacheBehavior, DistributionConfig, Origin,
    OriginAccessControlConfig, OriginAccessControlOriginTypes,
    OriginAccessControlSigningBehaviors, OriginAccessControlSigningProtocols, Origins,
    S3OriginConfig, ViewerProtocolPolicy,
};
use aws_sdk_cloudfront::Client as AwsCloudFrontClient;
use tracing::debug;

use super::s3::{S3Error, S3Result};
use super::{AwsSettings, CdnService, ServiceError};
use crate::model::{BucketName, Domain};

/// AWS managed "CachingOptimized" cache policy
const CACHING_OPTIMIZED_POLICY_ID: &str = "658327ea-f89d-4fab-a63d-7e88639e58f6";

const DEFAULT_ROOT_OBJECT: &str = "index.html";

/// CloudFront client
#[derive(Clone)]
pub struct CloudFrontClient {
    client: AwsCloudFrontClient,
}

impl CloudFrontClient {
    pub async fn new(settings: AwsSettings) -> S3Result<Self> {
        settings.validate()?;
        let sdk_config = settings.load_sdk_config().await;
        Ok(Self {
            client: AwsCloudFrontClient::new(&sdk_config),
        })
    }
}

impl std::fmt::Debug for CloudFrontClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudFrontClient").finish_non_exhaustive()
    }
}

#[async_trait]
impl CdnService for CloudFrontClient {
    async fn create_origin_access_identity(&self) -> Result<String, ServiceError> {
        let config = OriginAccessControlConfig::builder()
            .name(caller_reference("oac"))
            .description("spare origin access control")
            .origin_access_control_origin_type(OriginAccessControlOriginTypes::S3)
            .signing_behavior(OriginAccessControlSigningBehaviors::Always)
            .signing_protocol(OriginAccessControlSigningProtocols::Sigv4)
            .build()
            .map_err(invalid_request)?;

        let output = self
            .client
            .create_origin_access_control()
            .origin_access_control_config(config)
            .send()
            .await
            .map_err(S3Error::from)?;

        let control = output.origin_access_control().ok_or_else(|| {
            S3Error::MalformedResponse("origin access control missing from response".to_string())
        })?;
        debug!(access_id = control.id(), "Created origin access control");
        Ok(control.id().to_string())
    }

    async fn create_distribution(
        &self,
        bucket: &BucketName,
        access_id: &str,
    ) -> Result<Domain, ServiceError> {
        let config = distribution_config(bucket, access_id).map_err(invalid_request)?;

        let output = self
            .client
            .create_distribution()
            .distribution_config(config)
            .send()
            .await
            .map_err(S3Error::from)?;

        let distribution = output.distribution().ok_or_else(|| {
            S3Error::MalformedResponse("distribution missing from response".to_string())
        })?;
        Ok(Domain::new(distribution.domain_name()))
    }
}

/// Distribution serving the bucket through the origin access control
/// `access_id`, with SPA fallback of 403/404 to the root document
fn distribution_config(
    bucket: &BucketName,
    access_id: &str,
) -> Result<DistributionConfig, BuildError> {
    let origin_id = format!("S3-{}", bucket);

    let origin = Origin::builder()
        .id(&origin_id)
        .domain_name(bucket.domain())
        .origin_access_control_id(access_id)
        // Empty: access goes through the origin access control instead
        .s3_origin_config(S3OriginConfig::builder().origin_access_identity("").build())
        .build()?;

    let cache_behavior = DefaultCacheBehavior::builder()
        .target_origin_id(&origin_id)
        .viewer_protocol_policy(ViewerProtocolPolicy::RedirectToHttps)
        .cache_policy_id(CACHING_OPTIMIZED_POLICY_ID)
        .compress(true)
        .build()?;

    let fallback = [403, 404]
        .into_iter()
        .map(|code| {
            CustomErrorResponse::builder()
                .error_code(code)
                .response_page_path(format!("/{DEFAULT_ROOT_OBJECT}"))
                .response_code("200")
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    DistributionConfig::builder()
        .caller_reference(caller_reference(bucket.as_str()))
        .origins(Origins::builder().quantity(1).items(origin).build()?)
        .default_cache_behavior(cache_behavior)
        .default_root_object(DEFAULT_ROOT_OBJECT)
        .custom_error_responses(
            CustomErrorResponses::builder()
                .quantity(fallback.len() as i32)
                .set_items(Some(fallback))
                .build()?,
        )
        .comment(format!("spare distribution for {}", bucket))
        .enabled(true)
        .build()
}

/// Unique token CloudFront uses to make create calls idempotent
fn caller_reference(scope: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("spare-{scope}-{nanos}")
}

fn invalid_request(err: BuildError) -> ServiceError {
    ServiceError::Remote(S3Error::InvalidConfig(err.to_string()))
}
