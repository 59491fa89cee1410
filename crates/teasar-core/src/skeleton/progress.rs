//! Run context shared by every component task: cancellation, progress
//! observation and search metrics

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::cancel::CancelToken;
use crate::logging::SearchMetrics;

/// Receives coverage events while components are skeletonized.
///
/// Observers are called from worker threads and never influence the run.
pub trait ProgressObserver: Send + Sync {
    /// A component with `to_cover` initially valid vertices is starting
    fn component_started(&self, _label: usize, _to_cover: usize) {}

    /// One iteration invalidated `newly` vertices, `remaining` are still valid
    fn vertices_covered(&self, _label: usize, _newly: usize, _remaining: usize) {}

    /// A component finished with `paths` paths
    fn component_finished(&self, _label: usize, _paths: usize) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Observer that totals coverage across all components
#[derive(Debug, Default)]
pub struct CoverageCounter {
    to_cover: AtomicUsize,
    covered: AtomicUsize,
    components: AtomicUsize,
}

impl CoverageCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_cover(&self) -> usize {
        self.to_cover.load(Ordering::Relaxed)
    }

    pub fn covered(&self) -> usize {
        self.covered.load(Ordering::Relaxed)
    }

    /// Components that finished
    pub fn components(&self) -> usize {
        self.components.load(Ordering::Relaxed)
    }
}

impl ProgressObserver for CoverageCounter {
    fn component_started(&self, _label: usize, to_cover: usize) {
        self.to_cover.fetch_add(to_cover, Ordering::Relaxed);
    }

    fn vertices_covered(&self, _label: usize, newly: usize, _remaining: usize) {
        self.covered.fetch_add(newly, Ordering::Relaxed);
    }

    fn component_finished(&self, _label: usize, _paths: usize) {
        self.components.fetch_add(1, Ordering::Relaxed);
    }
}

/// Side channels for a skeletonization run
#[derive(Clone)]
pub struct RunContext {
    pub cancel: CancelToken,
    pub progress: Arc<dyn ProgressObserver>,
    pub metrics: Arc<SearchMetrics>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressObserver>) -> Self {
        self.progress = progress;
        self
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            cancel: CancelToken::new(),
            progress: Arc::new(NoProgress),
            metrics: Arc::new(SearchMetrics::new()),
        }
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("cancel", &self.cancel)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}
