//! Ordered bucket provisioning

use tracing::info;

use super::{BucketState, CdnProvisioner, ProvisionError, ProvisionReport, Stage};
use crate::model::{BucketName, BucketPolicy, Region};
use crate::protocol::{CdnService, ServiceError, StorageService};

/// Provisions a private bucket, optionally fronted by a CDN
#[derive(Debug)]
pub struct StorageProvisioner<S, C> {
    storage: S,
    cdn: Option<CdnProvisioner<C>>,
}

impl<S: StorageService, C: CdnService> StorageProvisioner<S, C> {
    /// `cdn` of `None` skips the distribution stage
    pub fn new(storage: S, cdn: Option<C>) -> Self {
        Self {
            storage,
            cdn: cdn.map(CdnProvisioner::new),
        }
    }

    /// Run every stage in order, stopping at the first failure
    pub async fn provision(
        &self,
        bucket: &BucketName,
        region: &Region,
    ) -> Result<ProvisionReport, ProvisionError> {
        let bucket_state = self.create_bucket(bucket, region).await?;

        info!(bucket = %bucket, stage = %Stage::BlockPublicAccess, "Provisioning");
        self.storage
            .block_public_access(bucket, region)
            .await
            .map_err(ProvisionError::stage(Stage::BlockPublicAccess, bucket))?;

        info!(bucket = %bucket, stage = %Stage::AttachPolicy, "Provisioning");
        let account = self
            .storage
            .account_id()
            .await
            .map_err(ProvisionError::stage(Stage::AttachPolicy, bucket))?;
        let policy = BucketPolicy::allow_cloudfront(bucket, &account).to_json(bucket)?;
        self.storage
            .set_bucket_policy(bucket, &policy)
            .await
            .map_err(ProvisionError::stage(Stage::AttachPolicy, bucket))?;

        let cdn_domain = match &self.cdn {
            Some(cdn) => Some(cdn.create(bucket).await?),
            None => None,
        };

        Ok(ProvisionReport {
            bucket_state,
            cdn_domain,
        })
    }

    async fn create_bucket(
        &self,
        bucket: &BucketName,
        region: &Region,
    ) -> Result<BucketState, ProvisionError> {
        info!(bucket = %bucket, region = %region, stage = %Stage::CreateBucket, "Provisioning");
        match self.storage.create_bucket(bucket, region).await {
            Ok(()) => Ok(BucketState::Created),
            Err(ServiceError::BucketAlreadyOwnedByYou) => {
                info!(bucket = %bucket, "Bucket already exists and is owned by you");
                Ok(BucketState::AlreadyOwned)
            }
            Err(ServiceError::BucketAlreadyExists) => Err(ProvisionError::BucketOwnedByOther {
                bucket: bucket.clone(),
            }),
            Err(source) => Err(ProvisionError::Stage {
                stage: Stage::CreateBucket,
                bucket: bucket.clone(),
                source,
            }),
        }
    }
}
