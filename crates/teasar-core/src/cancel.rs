//! Cooperative cancellation for long-running skeletonizations

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Result, TeasarError};

/// Shared flag checked at the top of every invalidation iteration.
///
/// Clones share the same flag, so a signal handler can hold one clone
/// while component tasks poll another.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with [`TeasarError::Interrupted`] once cancellation was requested
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(TeasarError::Interrupted)
        } else {
            Ok(())
        }
    }
}
