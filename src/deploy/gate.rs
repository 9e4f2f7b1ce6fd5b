/*!
 * Permit gate bounding simultaneous uploads
 *
 * A counting gate over a tokio semaphore. Acquisition races a cancellation
 * token, so workers blocked on a permit return as soon as a sibling upload
 * fails.
 */

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// A counting gate for concurrent uploads
#[derive(Clone, Debug)]
pub struct PermitGate {
    semaphore: Arc<Semaphore>,
    max: usize,
}

impl PermitGate {
    /// Create a new gate
    ///
    /// # Arguments
    /// * `max_concurrent` - Maximum number of concurrent uploads (0 = auto-detect)
    ///
    /// Auto-detection uses the number of available processing units and falls
    /// back to 1 when it cannot be determined.
    pub fn new(max_concurrent: usize) -> Self {
        let max = if max_concurrent == 0 {
            available_parallelism()
        } else {
            max_concurrent
        };

        Self {
            semaphore: Arc::new(Semaphore::new(max)),
            max,
        }
    }

    /// Wait for a permit, or return `None` once `cancel` fires
    pub async fn acquire(&self, cancel: &CancellationToken) -> Option<UploadPermit> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            permit = self.semaphore.clone().acquire_owned() => {
                // The semaphore is never closed, so an error only means shutdown
                permit.ok().map(|permit| UploadPermit { _permit: permit })
            }
        }
    }

    /// Maximum number of concurrent uploads allowed
    pub fn max_concurrent(&self) -> usize {
        self.max
    }

    /// Current number of free permits
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl Default for PermitGate {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Permission to run one upload; released on drop
#[derive(Debug)]
pub struct UploadPermit {
    _permit: OwnedSemaphorePermit,
}

/// Number of processing units, or 1 when detection fails
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to detect available parallelism, uploading one file at a time");
            1
        })
}
