//! TEASAR skeletonization
//!
//! - `root`: double-sweep far-point root finder and root strategies
//! - `component`: the invalidation-covering loop for one component
//! - `driver`: per-component orchestration over a whole graph
//! - `assemble`: turning paths into a spatial skeleton
//! - `neuron`: mesh and soma-anchored entry points
//! - `progress`: run context (cancellation, observers, metrics)

pub mod assemble;
pub mod component;
pub mod driver;
pub mod neuron;
pub mod progress;
pub mod root;
pub mod types;

pub use assemble::{
    all_paths_to_edges, create_spatial_skeleton, paths_to_edges, reduce_vertices,
    SpatialSkeleton,
};
pub use component::skeletonize_component;
pub use driver::skeletonize_graph;
pub use neuron::{skeletonize_mesh, skeletonize_neuron, NeuronOptions};
pub use progress::{CoverageCounter, NoProgress, ProgressObserver, RunContext};
pub use root::{
    find_far_points, find_graph_root, FarPoints, RootSelection, RootSelector, RootStrategy,
    SomaAnchor,
};
pub use types::{
    ComponentSkeleton, MapEntry, Path, PhaseTiming, SkeletonResult, SkippedComponent,
    VertexMap,
};
