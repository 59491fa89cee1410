//! Assembling skeleton paths into a spatial skeleton
//!
//! Paths become edge lists over the original vertex indices, and the
//! vertices those edges use are pulled out into a compact vertex array.

use serde::Serialize;

use crate::error::{Result, TeasarError};
use crate::skeleton::types::{Path, SkeletonResult};

/// A skeleton as its own small graph embedded in space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialSkeleton {
    pub vertices: Vec<Vec<f64>>,
    /// Edges indexing into `vertices`
    pub edges: Vec<[usize; 2]>,
    /// Original mesh index of each skeleton vertex
    pub original_indices: Vec<usize>,
}

/// Consecutive vertex pairs of every path
pub fn paths_to_edges(paths: &[Path]) -> Vec<[usize; 2]> {
    paths
        .iter()
        .flat_map(|path| path.windows(2).map(|pair| [pair[0], pair[1]]))
        .collect()
}

/// Edges of every component's paths, failing when there are none
pub fn all_paths_to_edges(all_paths: &[&[Path]]) -> Result<Vec<[usize; 2]>> {
    let edges: Vec<[usize; 2]> = all_paths
        .iter()
        .flat_map(|paths| paths_to_edges(paths))
        .collect();
    if edges.is_empty() {
        return Err(TeasarError::EmptySkeleton);
    }
    Ok(edges)
}

/// Keep only the vertices used by `edges` and re-index the edges.
///
/// Returns the reduced vertices, the re-indexed edges and the original
/// index of each kept vertex (sorted ascending).
pub fn reduce_vertices(
    vertices: &[Vec<f64>],
    edges: &[[usize; 2]],
) -> Result<(Vec<Vec<f64>>, Vec<[usize; 2]>, Vec<usize>)> {
    let n = vertices.len();
    let mut seen = vec![false; n];
    for &v in edges.iter().flatten() {
        if v >= n {
            return Err(TeasarError::vertex_out_of_range("skeleton edge", v, n));
        }
        seen[v] = true;
    }

    // every edge endpoint is seen, so each gets its slot here
    let mut position = vec![0; n];
    let mut used = Vec::new();
    for v in (0..n).filter(|&v| seen[v]) {
        position[v] = used.len();
        used.push(v);
    }
    let reindexed = edges
        .iter()
        .map(|&[u, v]| [position[u], position[v]])
        .collect();
    let kept = used.iter().map(|&v| vertices[v].clone()).collect();
    Ok((kept, reindexed, used))
}

/// Spatial skeleton of all components' paths over the mesh `vertices`
pub fn create_spatial_skeleton(
    all_paths: &[&[Path]],
    vertices: &[Vec<f64>],
) -> Result<SpatialSkeleton> {
    let edges = all_paths_to_edges(all_paths)?;
    let (vertices, edges, original_indices) = reduce_vertices(vertices, &edges)?;
    tracing::debug!(
        vertices = vertices.len(),
        edges = edges.len(),
        "assembled spatial skeleton"
    );
    Ok(SpatialSkeleton {
        vertices,
        edges,
        original_indices,
    })
}

impl SkeletonResult {
    /// Assemble every component into one spatial skeleton
    pub fn assemble(&self, vertices: &[Vec<f64>]) -> Result<SpatialSkeleton> {
        create_spatial_skeleton(&self.all_paths(), vertices)
    }
}
