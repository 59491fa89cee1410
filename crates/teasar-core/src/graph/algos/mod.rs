//! Graph algorithm implementations
//!
//! Contains the shortest-path and labelling primitives the skeletonizer is
//! built on:
//! - `dijkstra`: single- and multi-source shortest paths with a radius limit
//! - `components`: connected-component labelling

pub mod components;
pub mod dijkstra;

pub use components::{connected_components, largest_component_mask, ComponentLabels};
pub use dijkstra::{dijkstra, dijkstra_multi};
