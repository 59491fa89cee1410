//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::graph::EdgeWeighting;

/// Default invalidation radius, tuned for nanometer-scale neuron meshes
pub const DEFAULT_INVALIDATION_D: f64 = 10_000.0;

/// Default soma radius, same units as the mesh vertices
pub const DEFAULT_SOMA_THRESH: f64 = 10_000.0;

/// Default component size threshold for neuron skeletonization
pub const DEFAULT_NEURON_CC_VERTEX_THRESH: usize = 100;

/// Top-level configuration, usually read from `teasar.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeasarConfig {
    /// Invalidation loop and driver settings
    #[serde(default)]
    pub skeleton: SkeletonConfig,

    /// Mesh to graph conversion settings
    #[serde(default)]
    pub graph: GraphConfig,

    /// Neuron (soma-anchored) skeletonization settings
    #[serde(default)]
    pub neuron: NeuronConfig,
}

/// Settings for the invalidation-covering loop and the component driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonConfig {
    /// Distance from a skeleton path within which vertices count as covered
    #[serde(default = "default_invalidation_d")]
    pub invalidation_d: f64,

    /// Components must have strictly more vertices than this to be skeletonized
    #[serde(default)]
    pub cc_vertex_thresh: usize,

    /// Track the nearest skeleton vertex for every covered vertex
    #[serde(default)]
    pub return_map: bool,

    /// Record per-phase timing for every component
    #[serde(default)]
    pub return_timing: bool,

    /// Skeletonize components concurrently
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// What to do when one component fails
    #[serde(default)]
    pub on_component_error: ComponentErrorPolicy,
}

/// Policy applied by the driver when a component fails to skeletonize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentErrorPolicy {
    /// Abort the whole run with the first component error
    #[default]
    Abort,
    /// Log the failure and leave the component out of the result
    Skip,
}

/// Settings for building the weighted graph from a mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Edge weights: Euclidean length or unit
    #[serde(default)]
    pub weighting: EdgeWeighting,
}

/// Settings for soma-anchored neuron skeletonization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronConfig {
    /// Vertices closer than this to the soma point are treated as soma
    #[serde(default = "default_soma_thresh")]
    pub soma_thresh: f64,

    /// Component size threshold used instead of `skeleton.cc_vertex_thresh`
    #[serde(default = "default_neuron_cc_vertex_thresh")]
    pub cc_vertex_thresh: usize,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            invalidation_d: DEFAULT_INVALIDATION_D,
            cc_vertex_thresh: 0,
            return_map: false,
            return_timing: false,
            parallel: true,
            on_component_error: ComponentErrorPolicy::Abort,
        }
    }
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            soma_thresh: DEFAULT_SOMA_THRESH,
            cc_vertex_thresh: DEFAULT_NEURON_CC_VERTEX_THRESH,
        }
    }
}

fn default_invalidation_d() -> f64 {
    DEFAULT_INVALIDATION_D
}

fn default_parallel() -> bool {
    true
}

fn default_soma_thresh() -> f64 {
    DEFAULT_SOMA_THRESH
}

fn default_neuron_cc_vertex_thresh() -> usize {
    DEFAULT_NEURON_CC_VERTEX_THRESH
}
