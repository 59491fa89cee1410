use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Shortest-path search counters for structured logging.
///
/// Tracks how many queries a skeletonization issued and how many vertices
/// they settled, which shows how well the search-radius bound prunes.
/// All operations are atomic and lock-free so one instance can be shared
/// across component tasks.
#[derive(Debug, Default)]
pub struct SearchMetrics {
    /// Bounded searches from a target toward the skeleton
    branch_searches: AtomicU64,
    /// Multi-source invalidation sweeps
    sweeps: AtomicU64,
    /// Vertices settled across all searches
    settled: AtomicU64,
}

impl SearchMetrics {
    /// Create a new SearchMetrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one bounded branch search
    pub fn record_branch_search(&self, settled: usize) {
        self.branch_searches.fetch_add(1, Ordering::Relaxed);
        self.settled.fetch_add(settled as u64, Ordering::Relaxed);
    }

    /// Record one invalidation sweep
    pub fn record_sweep(&self, settled: usize) {
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        self.settled.fetch_add(settled as u64, Ordering::Relaxed);
    }

    pub fn branch_searches(&self) -> u64 {
        self.branch_searches.load(Ordering::Relaxed)
    }

    pub fn sweeps(&self) -> u64 {
        self.sweeps.load(Ordering::Relaxed)
    }

    pub fn settled(&self) -> u64 {
        self.settled.load(Ordering::Relaxed)
    }

    /// Average settled vertices per search (0.0 when nothing ran)
    pub fn settled_per_search(&self) -> f64 {
        let searches = self.branch_searches() + self.sweeps();
        if searches == 0 {
            0.0
        } else {
            self.settled() as f64 / searches as f64
        }
    }
}

/// Log search metrics at debug level.
///
/// Usage:
/// ```rust,ignore
/// let metrics = SearchMetrics::new();
/// // ... run searches ...
/// log_search_metrics!(&metrics, "component");
/// ```
#[macro_export]
macro_rules! log_search_metrics {
    ($metrics:expr, $name:expr) => {
        tracing::debug!(
            operation = $name,
            branch_searches = $metrics.branch_searches(),
            sweeps = $metrics.sweeps(),
            settled = $metrics.settled(),
            settled_per_search = $metrics.settled_per_search(),
            "search_metrics"
        );
    };
}

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "operation_name");
/// // Or with additional fields:
/// trace_time!(start, "operation_name", component = label);
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize structured logging based on CLI arguments
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (true, None) => "teasar=debug",
        (false, None) => "teasar=warn",
        (_, Some(level)) => return init_with_level(level, log_json),
    };

    init_with_level(level, log_json)
}

fn init_with_level(level: &str, log_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG wins, then TEASAR_LOG, then the CLI-derived level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("TEASAR_LOG"))
        .unwrap_or_else(|_| {
            EnvFilter::new(if level.contains('=') {
                level.to_string()
            } else {
                format!("teasar={}", level)
            })
        });

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(
                        tracing_subscriber::fmt::format::FmtSpan::NEW
                            | tracing_subscriber::fmt::format::FmtSpan::CLOSE,
                    ),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
