//! AWS credentials profile selection

use std::env;
use std::fmt;

/// Environment variable consulted when no profile is given on the command line
pub const AWS_PROFILE_ENV: &str = "AWS_PROFILE";

const DEFAULT_PROFILE: &str = "default";

/// Name of the profile in `~/.aws/config` used to reach AWS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsProfile(String);

impl AwsProfile {
    /// An explicit, non-empty profile wins; otherwise `$AWS_PROFILE`, then `default`.
    pub fn new(explicit: Option<&str>) -> Self {
        Self::resolve(explicit, env::var(AWS_PROFILE_ENV).ok().as_deref())
    }

    fn resolve(explicit: Option<&str>, from_env: Option<&str>) -> Self {
        let name = [explicit, from_env]
            .into_iter()
            .flatten()
            .find(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PROFILE);
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AwsProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
