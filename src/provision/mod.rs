/*!
 * Provisioning of the bucket and CDN that host a site
 *
 * `StorageProvisioner` drives the remote capabilities in a fixed order:
 * create the bucket, block public access, attach the CloudFront-only bucket
 * policy and, when a CDN capability is configured, create the distribution.
 * A stage only starts after the previous one succeeded and nothing is
 * retried or rolled back.
 */

pub mod cdn;
pub mod storage;

use std::fmt;

use thiserror::Error;

use crate::model::{BucketName, Domain, PolicyError};
use crate::protocol::ServiceError;

pub use cdn::CdnProvisioner;
pub use storage::StorageProvisioner;

/// One step of provisioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CreateBucket,
    BlockPublicAccess,
    AttachPolicy,
    CreateOriginAccessIdentity,
    CreateDistribution,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::CreateBucket => write!(f, "create bucket"),
            Stage::BlockPublicAccess => write!(f, "block public access"),
            Stage::AttachPolicy => write!(f, "attach bucket policy"),
            Stage::CreateOriginAccessIdentity => write!(f, "create origin access control"),
            Stage::CreateDistribution => write!(f, "create distribution"),
        }
    }
}

/// How the create-bucket stage ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketState {
    Created,
    /// The bucket already existed under the caller's account
    AlreadyOwned,
}

/// Outcome of a successful provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub bucket_state: BucketState,
    /// Public domain of the distribution, when one was created
    pub cdn_domain: Option<Domain>,
}

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("bucket {bucket} already exists and is owned by another account")]
    BucketOwnedByOther { bucket: BucketName },

    #[error("{stage} failed for bucket {bucket}: {source}")]
    Stage {
        stage: Stage,
        bucket: BucketName,
        #[source]
        source: ServiceError,
    },

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl ProvisionError {
    pub(crate) fn stage(stage: Stage, bucket: &BucketName) -> impl FnOnce(ServiceError) -> Self {
        let bucket = bucket.clone();
        move |source| ProvisionError::Stage {
            stage,
            bucket,
            source,
        }
    }

    /// Stage that failed, if the error came from a remote call
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            ProvisionError::BucketOwnedByOther { .. } => Some(Stage::CreateBucket),
            ProvisionError::Stage { stage, .. } => Some(*stage),
            ProvisionError::Policy(_) => Some(Stage::AttachPolicy),
        }
    }
}
