//! CLI commands for teasar

pub mod dispatch;
pub mod progress;
pub mod report;
pub mod root;
pub mod skeletonize;
