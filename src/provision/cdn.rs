//! CDN stage: origin access control, then the distribution

use tracing::info;

use super::{ProvisionError, Stage};
use crate::model::{BucketName, Domain};
use crate::protocol::CdnService;

/// Creates a CloudFront-style distribution in front of a bucket
#[derive(Debug)]
pub struct CdnProvisioner<C> {
    cdn: C,
}

impl<C: CdnService> CdnProvisioner<C> {
    pub fn new(cdn: C) -> Self {
        Self { cdn }
    }

    /// Create the origin access handle and the distribution bound to it;
    /// returns the distribution's public domain
    pub async fn create(&self, bucket: &BucketName) -> Result<Domain, ProvisionError> {
        info!(bucket = %bucket, stage = %Stage::CreateOriginAccessIdentity, "Provisioning");
        let access_id = self
            .cdn
            .create_origin_access_identity()
            .await
            .map_err(ProvisionError::stage(Stage::CreateOriginAccessIdentity, bucket))?;

        info!(bucket = %bucket, stage = %Stage::CreateDistribution, access_id = %access_id, "Provisioning");
        let domain = self
            .cdn
            .create_distribution(bucket, &access_id)
            .await
            .map_err(ProvisionError::stage(Stage::CreateDistribution, bucket))?;

        info!(bucket = %bucket, domain = %domain, "Distribution created");
        Ok(domain)
    }
}
