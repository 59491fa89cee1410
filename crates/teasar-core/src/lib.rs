//! Teasar Core Library
//!
//! TEASAR skeletonization of weighted spatial graphs: root selection,
//! the invalidation-covering loop, per-component driving and skeleton
//! assembly, plus the graph, mesh and configuration plumbing around them.

pub mod cancel;
pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod logging;
pub mod mesh;
pub mod skeleton;
