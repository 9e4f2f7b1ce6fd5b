//! S3 support built on the official AWS SDK for Rust
//!
//! `S3Client` implements [`StorageService`](crate::protocol::StorageService)
//! for provisioning and [`ObjectUploader`](crate::protocol::ObjectUploader)
//! for deployment. Setting an endpoint switches the client to path-style
//! addressing so LocalStack and MinIO work out of the box.
//!
//! ```ignore
//! use spare::model::{AwsProfile, BucketName, Region};
//! use spare::protocol::{AwsSettings, ObjectUploader, S3Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = AwsSettings::new(AwsProfile::new(None), Region::default(), None);
//!     let client = S3Client::new(settings).await?;
//!     client
//!         .upload_object(
//!             &BucketName::new("my-site"),
//!             "index.html",
//!             bytes::Bytes::from_static(b"<html></html>"),
//!             "text/html; charset=utf-8",
//!         )
//!         .await?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod operations;

#[cfg(test)]
mod tests;

pub use client::S3Client;
pub use error::{S3Error, S3Result};
