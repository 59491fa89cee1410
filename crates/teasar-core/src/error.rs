//! Error types and exit codes for teasar
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (including reachability failures inside a component)
//! - 2: Usage error (bad flags/args, invalid parameter values)
//! - 3: Input error (malformed mesh, mask or array shape mismatch)

mod macros;

use thiserror::Error;

/// Exit codes used by the teasar binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Input error - malformed mesh or arrays (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while building graphs and skeletonizing them
#[derive(Error, Debug)]
pub enum TeasarError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Input-shape errors (exit code 3)
    #[error("{what} has length {actual}, expected {expected}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("{context} index {index} out of range for {len} vertices")]
    VertexOutOfRange {
        context: String,
        index: usize,
        len: usize,
    },

    #[error("invalid mesh: {reason}")]
    InvalidMesh { reason: String },

    #[error("no edges found in skeleton paths")]
    EmptySkeleton,

    // Reachability errors (exit code 1)
    #[error("{count} valid vertices are unreachable from root {root} (first: {first})")]
    UnreachableVertices {
        root: usize,
        count: usize,
        first: usize,
    },

    #[error("target {target} cannot be reached from root {root}")]
    UnreachableTarget { root: usize, target: usize },

    #[error("path from target {target} to branch {branch} has infinite length")]
    InfinitePathLength { target: usize, branch: usize },

    #[error("predecessor chain from {from} ended at {stopped} before reaching {expected}")]
    BrokenPredecessorChain {
        from: usize,
        stopped: usize,
        expected: String,
    },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),

    #[error("skeletonization interrupted")]
    Interrupted,
}

impl TeasarError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        TeasarError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        TeasarError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an array whose length does not match the graph
    pub fn shape_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        TeasarError::ShapeMismatch {
            what: what.to_string(),
            expected,
            actual,
        }
    }

    /// Create an error for a vertex index outside the graph
    pub fn vertex_out_of_range(context: &str, index: usize, len: usize) -> Self {
        TeasarError::VertexOutOfRange {
            context: context.to_string(),
            index,
            len,
        }
    }

    /// Create an error for malformed mesh input
    pub fn invalid_mesh(reason: impl Into<String>) -> Self {
        TeasarError::InvalidMesh {
            reason: reason.into(),
        }
    }

    /// Whether this error signals a component whose root cannot reach its
    /// vertices (as opposed to bad input or an aborted run)
    pub fn is_reachability(&self) -> bool {
        matches!(
            self,
            TeasarError::UnreachableVertices { .. }
                | TeasarError::UnreachableTarget { .. }
                | TeasarError::InfinitePathLength { .. }
                | TeasarError::BrokenPredecessorChain { .. }
        )
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TeasarError::UnknownFormat(_)
            | TeasarError::UsageError(_)
            | TeasarError::InvalidValue { .. } => ExitCode::Usage,

            TeasarError::ShapeMismatch { .. }
            | TeasarError::VertexOutOfRange { .. }
            | TeasarError::InvalidMesh { .. }
            | TeasarError::EmptySkeleton => ExitCode::Data,

            TeasarError::UnreachableVertices { .. }
            | TeasarError::UnreachableTarget { .. }
            | TeasarError::InfinitePathLength { .. }
            | TeasarError::BrokenPredecessorChain { .. }
            | TeasarError::Io(_)
            | TeasarError::Json(_)
            | TeasarError::Toml(_)
            | TeasarError::FailedOperationWithTarget { .. }
            | TeasarError::Other(_)
            | TeasarError::Interrupted => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            TeasarError::UnknownFormat(_) => "unknown_format",
            TeasarError::UsageError(_) => "usage_error",
            TeasarError::InvalidValue { .. } => "invalid_value",
            TeasarError::ShapeMismatch { .. } => "shape_mismatch",
            TeasarError::VertexOutOfRange { .. } => "vertex_out_of_range",
            TeasarError::InvalidMesh { .. } => "invalid_mesh",
            TeasarError::EmptySkeleton => "empty_skeleton",
            TeasarError::UnreachableVertices { .. } => "unreachable_vertices",
            TeasarError::UnreachableTarget { .. } => "unreachable_target",
            TeasarError::InfinitePathLength { .. } => "infinite_path_length",
            TeasarError::BrokenPredecessorChain { .. } => "broken_predecessor_chain",
            TeasarError::Io(_) => "io_error",
            TeasarError::Json(_) => "json_error",
            TeasarError::Toml(_) => "toml_error",
            TeasarError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            TeasarError::Other(_) => "other",
            TeasarError::Interrupted => "interrupted",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for teasar operations
pub type Result<T> = std::result::Result<T, TeasarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(
            TeasarError::shape_mismatch("valid mask", 4, 3).exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            TeasarError::invalid_value("invalidation_d", -1.0).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            TeasarError::UnreachableTarget { root: 0, target: 5 }.exit_code(),
            ExitCode::Failure
        );
        assert_eq!(TeasarError::Interrupted.exit_code(), ExitCode::Failure);
    }

    #[test]
    fn test_reachability_classification() {
        assert!(TeasarError::InfinitePathLength {
            target: 1,
            branch: 0
        }
        .is_reachability());
        assert!(!TeasarError::EmptySkeleton.is_reachability());
        assert!(!TeasarError::Interrupted.is_reachability());
    }

    #[test]
    fn test_to_json_envelope() {
        let err = TeasarError::vertex_out_of_range("root index", 9, 4);
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "vertex_out_of_range");
        assert_eq!(
            json["error"]["message"],
            "root index index 9 out of range for 4 vertices"
        );
    }
}
