//! Building a weighted graph from mesh vertices and edges or faces

use tracing::debug;

use crate::error::{Result, TeasarError};
use crate::graph::types::{CsGraph, EdgeWeighting};

/// Euclidean distance between two points of equal dimension
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Check that vertices form an N x K array of finite coordinates with K > 0.
///
/// Returns K, or 0 when there are no vertices.
pub fn vertex_dimension(vertices: &[Vec<f64>]) -> Result<usize> {
    let Some(first) = vertices.first() else {
        return Ok(0);
    };
    let dim = first.len();
    if dim == 0 {
        return Err(TeasarError::invalid_mesh(
            "vertices must be a NxK array with K > 0",
        ));
    }
    for (i, row) in vertices.iter().enumerate() {
        if row.len() != dim {
            return Err(TeasarError::invalid_mesh(format!(
                "vertex {} has {} coordinates, expected {}",
                i,
                row.len(),
                dim
            )));
        }
        if row.iter().any(|c| !c.is_finite()) {
            return Err(TeasarError::invalid_mesh(format!(
                "vertex {} has a non-finite coordinate",
                i
            )));
        }
    }
    Ok(dim)
}

/// All triangle edges of a face list, each undirected edge once.
///
/// Edges are normalized to `[low, high]` and sorted.
pub fn faces_to_edges(faces: &[[usize; 3]]) -> Vec<[usize; 2]> {
    let mut edges: Vec<[usize; 2]> = faces
        .iter()
        .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
        .map(|[u, v]| [u.min(v), u.max(v)])
        .collect();
    edges.sort_unstable();
    edges.dedup();
    edges
}

/// Build the undirected weighted graph of a mesh.
///
/// Weights are the Euclidean length of each edge, or 1 with
/// [`EdgeWeighting::Unit`]. Self-loop edges are dropped; out-of-range
/// indices and malformed coordinates are rejected.
pub fn create_spatial_graph(
    vertices: &[Vec<f64>],
    edges: &[[usize; 2]],
    weighting: EdgeWeighting,
) -> Result<CsGraph> {
    vertex_dimension(vertices)?;
    let n = vertices.len();

    let mut weighted = Vec::with_capacity(edges.len());
    let mut self_loops = 0usize;
    for &[u, v] in edges {
        if u >= n || v >= n {
            return Err(TeasarError::vertex_out_of_range(
                "edge endpoint",
                u.max(v),
                n,
            ));
        }
        if u == v {
            self_loops += 1;
            continue;
        }
        let w = match weighting {
            EdgeWeighting::Euclidean => euclidean(&vertices[u], &vertices[v]),
            EdgeWeighting::Unit => 1.0,
        };
        weighted.push((u, v, w));
    }

    if self_loops > 0 {
        debug!(self_loops, "dropped self-loop edges");
    }

    let graph = CsGraph::from_edges(n, &weighted)?;
    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        weighting = ?weighting,
        "built spatial graph"
    );
    Ok(graph)
}
