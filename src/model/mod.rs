/*!
 * Domain value types for spare
 *
 * Every value read from `.spare.yml` is parsed into one of these types and
 * validated before any remote call is attempted. Validation is pure: no I/O,
 * no network access.
 */

mod bucket;
mod domain;
mod endpoint;
mod error;
mod policy;
mod profile;
mod region;

pub use bucket::{BucketName, MAX_BUCKET_NAME_LEN, MIN_BUCKET_NAME_LEN, S3_DOMAIN_SUFFIX};
pub use domain::{AllowOrigins, Domain};
pub use endpoint::{Endpoint, DEBUG_LOCALSTACK_ENDPOINT};
pub use error::{PolicyError, ValidationError};
pub use policy::{BucketPolicy, PolicyStatement, POLICY_VERSION};
pub use profile::AwsProfile;
pub use region::{Region, KNOWN_REGIONS};

/// A value that can check its own invariants.
pub trait Validate {
    /// Returns the first violated rule, if any.
    fn validate(&self) -> Result<(), ValidationError>;
}
