//! Bucket policy that keeps the bucket private to CloudFront
//!
//! The document denies `s3:GetObject` to anonymous callers and grants it to
//! the CloudFront service principal, but only for distributions owned by the
//! bucket's account. The distribution reaches the bucket through an origin
//! access control, which signs its requests as that service principal.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{BucketName, PolicyError};

/// IAM policy language version
pub const POLICY_VERSION: &str = "2012-10-17";

const CLOUDFRONT_SERVICE_PRINCIPAL: &str = "cloudfront.amazonaws.com";
const GET_OBJECT: &str = "s3:GetObject";

/// An S3 bucket policy document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketPolicy {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

/// One statement of a bucket policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub sid: String,
    pub effect: String,
    pub principal: Value,
    pub action: String,
    pub resource: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,
}

impl BucketPolicy {
    /// Build the origin-restricted read policy for `bucket`, owned by the
    /// AWS account `account_id`
    pub fn allow_cloudfront(bucket: &BucketName, account_id: &str) -> Self {
        let resource = bucket.objects_arn();
        Self {
            version: POLICY_VERSION.to_string(),
            statement: vec![
                PolicyStatement {
                    sid: "DenyAnonymousRead".to_string(),
                    effect: "Deny".to_string(),
                    principal: json!("*"),
                    action: GET_OBJECT.to_string(),
                    resource: resource.clone(),
                    condition: Some(json!({
                        "StringEquals": { "aws:PrincipalType": "Anonymous" }
                    })),
                },
                PolicyStatement {
                    sid: "AllowCloudFrontServicePrincipalReadOnly".to_string(),
                    effect: "Allow".to_string(),
                    principal: json!({ "Service": CLOUDFRONT_SERVICE_PRINCIPAL }),
                    action: GET_OBJECT.to_string(),
                    resource,
                    condition: Some(json!({
                        "StringEquals": { "AWS:SourceAccount": account_id }
                    })),
                },
            ],
        }
    }

    /// Render the policy as the JSON text S3 expects
    pub fn to_json(&self, bucket: &BucketName) -> Result<String, PolicyError> {
        serde_json::to_string(self).map_err(|source| PolicyError::Serialize {
            bucket: bucket.to_string(),
            source,
        })
    }
}
