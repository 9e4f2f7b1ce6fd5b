/*!
 * Deployment of a built site into its bucket
 *
 * Every regular file under the deploy target becomes one `UploadUnit`. The
 * `UploadPipeline` uploads them through a fixed pool of workers bounded by a
 * `PermitGate`, tagging each object with a detected content type. The first
 * failed upload cancels the rest of the run.
 */

pub mod content_type;
pub mod gate;
pub mod pipeline;
pub mod walk;

use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::protocol::ServiceError;

pub use gate::PermitGate;
pub use pipeline::UploadPipeline;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("deploy target {} does not exist or is not a directory", .0.display())]
    TargetNotFound(PathBuf),

    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is outside of the deploy target", .0.display())]
    OutsideTarget(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to upload {key}: {source}")]
    Upload {
        key: String,
        #[source]
        source: ServiceError,
    },

    #[error("upload worker stopped unexpectedly: {0}")]
    Worker(String),
}

impl DeployError {
    /// Object key of the failed upload, if the failure was an upload
    pub fn key(&self) -> Option<&str> {
        match self {
            DeployError::Upload { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// One file to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadUnit {
    pub path: PathBuf,
    pub key: String,
}

impl UploadUnit {
    /// Pair `path` with its object key relative to `root`
    pub fn new(root: &Path, path: PathBuf) -> Result<Self, DeployError> {
        match walk::object_key(root, &path) {
            Some(key) => Ok(Self { path, key }),
            None => Err(DeployError::OutsideTarget(path)),
        }
    }
}

/// An object stored by a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    pub key: String,
    pub content_type: String,
}

/// Result of a successful deployment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    /// Every uploaded object, in completion order
    pub uploaded: Vec<UploadedObject>,
}

impl DeployReport {
    pub fn len(&self) -> usize {
        self.uploaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uploaded.is_empty()
    }

    pub fn content_type_of(&self, key: &str) -> Option<&str> {
        self.uploaded
            .iter()
            .find(|object| object.key == key)
            .map(|object| object.content_type.as_str())
    }
}

/// Read `reader` to the end once and hand back two independent cursors over
/// the same bytes
pub async fn duplicate_stream<R>(mut reader: R) -> io::Result<(Cursor<Bytes>, Cursor<Bytes>)>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    let data = Bytes::from(buf);
    Ok((Cursor::new(data.clone()), Cursor::new(data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[tokio::test]
    async fn test_duplicate_stream_cursors_are_independent() {
        let (mut first, second) = duplicate_stream(&b"hello spare"[..]).await.unwrap();

        let mut head = [0u8; 5];
        Read::read_exact(&mut first, &mut head).unwrap();
        assert_eq!(&head, b"hello");
        assert_eq!(first.position(), 5);

        assert_eq!(second.position(), 0);
        assert_eq!(second.into_inner(), Bytes::from_static(b"hello spare"));
    }

    #[tokio::test]
    async fn test_duplicate_empty_stream() {
        let (first, second) = duplicate_stream(&b""[..]).await.unwrap();
        assert!(first.get_ref().is_empty());
        assert!(second.get_ref().is_empty());
    }

    #[test]
    fn test_upload_unit_key() {
        let root = Path::new("dist");
        let unit = UploadUnit::new(root, root.join("assets").join("app.js")).unwrap();
        assert_eq!(unit.key, "assets/app.js");

        let err = UploadUnit::new(root, PathBuf::from("elsewhere/a.js")).unwrap_err();
        assert!(matches!(err, DeployError::OutsideTarget(_)));
    }

    #[test]
    fn test_report_lookup() {
        let report = DeployReport {
            uploaded: vec![UploadedObject {
                key: "index.html".to_string(),
                content_type: "text/html; charset=utf-8".to_string(),
            }],
        };
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.content_type_of("index.html"),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(report.content_type_of("missing"), None);
    }
}
