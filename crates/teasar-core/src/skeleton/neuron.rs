//! Mesh-level entry points
//!
//! [`skeletonize_mesh`] roots each component with the far-point heuristic.
//! [`skeletonize_neuron`] anchors the root at the soma instead: either a
//! given vertex, or every vertex within `soma_thresh` of a soma point.

use tracing::debug;

use crate::config::{SkeletonConfig, TeasarConfig};
use crate::error::Result;
use crate::mesh::MeshFile;
use crate::skeleton::driver::skeletonize_graph;
use crate::skeleton::progress::RunContext;
use crate::skeleton::root::{RootStrategy, SomaAnchor};
use crate::skeleton::types::SkeletonResult;

/// Where a neuron skeleton is anchored
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeuronOptions {
    /// Vertex to use as soma (and root) of its component
    pub root_index: Option<usize>,
    /// Soma center; vertices closer than `neuron.soma_thresh` are soma
    pub soma_pt: Option<Vec<f64>>,
}

/// Skeletonize every sufficiently large component of a mesh
pub fn skeletonize_mesh(
    mesh: &MeshFile,
    root_index: Option<usize>,
    config: &TeasarConfig,
    ctx: &RunContext,
) -> Result<SkeletonResult> {
    let graph = mesh.to_graph(config.graph.weighting)?;
    skeletonize_graph(
        &graph,
        root_index,
        &config.skeleton,
        &RootStrategy::FarthestPoint,
        ctx,
    )
}

/// Skeletonize a neuron mesh, rooting each component at its soma.
///
/// Uses `neuron.cc_vertex_thresh` as the component size threshold. A
/// `root_index` takes precedence over `soma_pt` and roots its own component;
/// without either, this is [`skeletonize_mesh`] with the neuron threshold.
pub fn skeletonize_neuron(
    mesh: &MeshFile,
    options: &NeuronOptions,
    config: &TeasarConfig,
    ctx: &RunContext,
) -> Result<SkeletonResult> {
    config.validate()?;
    let graph = mesh.to_graph(config.graph.weighting)?;
    let skeleton_config = SkeletonConfig {
        cc_vertex_thresh: config.neuron.cc_vertex_thresh,
        ..config.skeleton.clone()
    };

    let strategy = match (options.root_index, &options.soma_pt) {
        (Some(root), soma_pt) => {
            if soma_pt.is_some() {
                debug!(root, "root index given, ignoring soma point");
            }
            RootStrategy::Soma(SomaAnchor::from_root_vertex(&mesh.vertices, root)?)
        }
        (None, Some(soma_pt)) => {
            let anchor =
                SomaAnchor::from_point(&mesh.vertices, soma_pt, config.neuron.soma_thresh)?;
            debug!(soma_vertices = anchor.soma_count(), "soma from point");
            RootStrategy::Soma(anchor)
        }
        (None, None) => RootStrategy::FarthestPoint,
    };

    skeletonize_graph(
        &graph,
        options.root_index,
        &skeleton_config,
        &strategy,
        ctx,
    )
}
