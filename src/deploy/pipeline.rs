//! Concurrent upload of a deploy target

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{
    content_type, duplicate_stream, walk, DeployError, DeployReport, PermitGate, UploadUnit,
    UploadedObject,
};
use crate::model::BucketName;
use crate::protocol::ObjectUploader;

/// Uploads a directory tree into a bucket with bounded concurrency
pub struct UploadPipeline<U> {
    uploader: Arc<U>,
    gate: PermitGate,
}

impl<U: ObjectUploader + 'static> UploadPipeline<U> {
    pub fn new(uploader: Arc<U>, gate: PermitGate) -> Self {
        Self { uploader, gate }
    }

    /// Upload every file under `target` into `bucket`
    pub async fn deploy(
        &self,
        bucket: &BucketName,
        target: &Path,
    ) -> Result<DeployReport, DeployError> {
        let units = walk::collect_files(target)?
            .into_iter()
            .map(|path| UploadUnit::new(target, path))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            bucket = %bucket,
            target = %target.display(),
            files = units.len(),
            "Deploying"
        );
        self.upload_all(bucket, units).await
    }

    /// Upload `units` with at most `gate.max_concurrent()` transfers in flight.
    ///
    /// Returns the first upload error after every worker has stopped.
    pub async fn upload_all(
        &self,
        bucket: &BucketName,
        units: Vec<UploadUnit>,
    ) -> Result<DeployReport, DeployError> {
        if units.is_empty() {
            return Ok(DeployReport::default());
        }

        let workers = self.gate.max_concurrent().min(units.len());
        let shared = Arc::new(SharedState {
            units: units.into(),
            next: AtomicUsize::new(0),
            failed: OnceLock::new(),
            cancel: CancellationToken::new(),
        });
        debug!(workers, permits = self.gate.available(), "Starting upload workers");

        let mut set = JoinSet::new();
        for id in 0..workers {
            let worker = Worker {
                id,
                uploader: Arc::clone(&self.uploader),
                bucket: bucket.clone(),
                gate: self.gate.clone(),
                shared: Arc::clone(&shared),
            };
            set.spawn(worker.run());
        }

        let mut uploaded = Vec::with_capacity(shared.units.len());
        let mut first_error = None;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(Ok(objects)) => uploaded.extend(objects),
                Ok(Err(err)) => first_error = Some(err),
                Err(join_err) => {
                    if shared.failed.set(()).is_ok() {
                        shared.cancel.cancel();
                        first_error = Some(DeployError::Worker(join_err.to_string()));
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(DeployReport { uploaded }),
        }
    }
}

struct SharedState {
    units: Arc<[UploadUnit]>,
    /// Index of the next unclaimed unit
    next: AtomicUsize,
    /// Set once by the first failure
    failed: OnceLock<()>,
    cancel: CancellationToken,
}

struct Worker<U> {
    id: usize,
    uploader: Arc<U>,
    bucket: BucketName,
    gate: PermitGate,
    shared: Arc<SharedState>,
}

impl<U: ObjectUploader> Worker<U> {
    async fn run(self) -> Result<Vec<UploadedObject>, DeployError> {
        let mut uploaded = Vec::new();
        while !self.shared.cancel.is_cancelled() {
            let index = self.shared.next.fetch_add(1, Ordering::Relaxed);
            let Some(unit) = self.shared.units.get(index) else {
                break;
            };
            let Some(_permit) = self.gate.acquire(&self.shared.cancel).await else {
                break;
            };

            let result = tokio::select! {
                biased;
                _ = self.shared.cancel.cancelled() => break,
                result = upload_unit(self.uploader.as_ref(), &self.bucket, unit) => result,
            };

            match result {
                Ok(object) => {
                    info!(key = %object.key, content_type = %object.content_type, "Uploaded");
                    uploaded.push(object);
                }
                Err(err) => return self.fail(err, uploaded),
            }
        }
        Ok(uploaded)
    }

    fn fail(
        &self,
        err: DeployError,
        uploaded: Vec<UploadedObject>,
    ) -> Result<Vec<UploadedObject>, DeployError> {
        if self.shared.failed.set(()).is_ok() {
            warn!(worker = self.id, error = %err, "Upload failed, cancelling remaining uploads");
            self.shared.cancel.cancel();
            Err(err)
        } else {
            debug!(worker = self.id, error = %err, "Upload failed after cancellation");
            Ok(uploaded)
        }
    }
}

async fn upload_unit<U: ObjectUploader + ?Sized>(
    uploader: &U,
    bucket: &BucketName,
    unit: &UploadUnit,
) -> Result<UploadedObject, DeployError> {
    let read_error = |source| DeployError::Read {
        path: unit.path.clone(),
        source,
    };
    let file = tokio::fs::File::open(&unit.path).await.map_err(read_error)?;
    let (detect_stream, upload_stream) = duplicate_stream(file).await.map_err(read_error)?;

    let content_type = content_type::detect(&unit.key, detect_stream.get_ref());
    uploader
        .upload_object(bucket, &unit.key, upload_stream.into_inner(), &content_type)
        .await
        .map_err(|source| DeployError::Upload {
            key: unit.key.clone(),
            source,
        })?;

    Ok(UploadedObject {
        key: unit.key.clone(),
        content_type,
    })
}
