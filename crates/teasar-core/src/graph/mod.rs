//! Weighted spatial graphs and shortest-path operations
//!
//! Provides the graph side of skeletonization:
//! - Compressed sparse row graph type and shortest-path result arrays
//! - Mesh to graph conversion (Euclidean or unit weights)
//! - Dijkstra searches (single source, multi source, radius limited)
//! - Connected-component labelling and path reconstruction

pub mod algos;
pub mod build;
pub mod path;
pub mod types;

pub use algos::{
    connected_components, dijkstra, dijkstra_multi, largest_component_mask, ComponentLabels,
};
pub use build::{create_spatial_graph, euclidean, faces_to_edges};
pub use path::reconstruct_path;
pub use types::{CsGraph, EdgeWeighting, ShortestPaths};
