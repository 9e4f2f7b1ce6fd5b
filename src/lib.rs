/*!
 * spare - static single page application hosting on AWS
 *
 * Provisions a private S3 bucket fronted by a CloudFront distribution and
 * deploys a directory of built assets into it:
 * - Validation of bucket names, regions, domains and endpoints
 * - Idempotent, ordered provisioning (bucket, public access block, policy, CDN)
 * - Bounded-concurrency uploads with content type detection
 * - `.spare.yml` configuration with a LocalStack debug mode
 */

pub mod cli_style;
pub mod commands;
pub mod config;
pub mod deploy;
pub mod error;
pub mod logging;
pub mod model;
pub mod protocol;
pub mod provision;

// Re-export commonly used types
pub use config::Config;
pub use deploy::{DeployReport, PermitGate, UploadPipeline};
pub use error::{Result, SpareError};
pub use model::{BucketName, BucketPolicy, Domain, Region, Validate};
pub use protocol::{CdnService, ObjectUploader, ServiceError, StorageService};
pub use provision::{ProvisionReport, StorageProvisioner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }
}
