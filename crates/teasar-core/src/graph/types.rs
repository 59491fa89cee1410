use serde::{Deserialize, Serialize};

use crate::error::{Result, TeasarError};
use crate::{bail_invalid, ensure_vertex};

/// How edge weights are derived from vertex coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeWeighting {
    /// Euclidean distance between the endpoint coordinates
    #[default]
    Euclidean,
    /// Every edge has weight 1
    Unit,
}

impl std::str::FromStr for EdgeWeighting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "euclidean" => Ok(EdgeWeighting::Euclidean),
            "unit" => Ok(EdgeWeighting::Unit),
            other => Err(format!(
                "unknown weighting '{}' (expected: euclidean, unit)",
                other
            )),
        }
    }
}

/// Undirected weighted graph in compressed sparse row form.
///
/// Adjacency is symmetric, free of self-loops, and each row is sorted by
/// neighbor index with at most one entry per neighbor.
#[derive(Debug, Clone, PartialEq)]
pub struct CsGraph {
    offsets: Vec<usize>,
    neighbors: Vec<usize>,
    weights: Vec<f64>,
}

impl CsGraph {
    /// Build a graph over `n` vertices from undirected weighted edges.
    ///
    /// Each edge is inserted in both directions. Self-loops are dropped and
    /// parallel edges collapse to the lightest one. Negative or non-finite
    /// weights and out-of-range endpoints are rejected.
    pub fn from_edges(n: usize, edges: &[(usize, usize, f64)]) -> Result<Self> {
        let mut directed: Vec<(usize, usize, f64)> = Vec::with_capacity(edges.len() * 2);
        for &(u, v, w) in edges {
            ensure_vertex!("edge endpoint", u, n);
            ensure_vertex!("edge endpoint", v, n);
            if !w.is_finite() || w < 0.0 {
                bail_invalid!("edge weight", format!("{} on edge ({}, {})", w, u, v));
            }
            if u == v {
                continue;
            }
            directed.push((u, v, w));
            directed.push((v, u, w));
        }

        directed.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)).then(a.2.total_cmp(&b.2)));
        directed.dedup_by(|later, kept| later.0 == kept.0 && later.1 == kept.1);

        let mut offsets = vec![0usize; n + 1];
        for &(u, _, _) in &directed {
            offsets[u + 1] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }

        let (neighbors, weights): (Vec<usize>, Vec<f64>) =
            directed.into_iter().map(|(_, v, w)| (v, w)).unzip();

        Ok(Self {
            offsets,
            neighbors,
            weights,
        })
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Neighbors of `v` with the weight of the connecting edge
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.offsets[v]..self.offsets[v + 1];
        self.neighbors[range.clone()]
            .iter()
            .copied()
            .zip(self.weights[range].iter().copied())
    }

    /// Weight of the edge between `u` and `v`, if they are adjacent
    pub fn edge_weight(&self, u: usize, v: usize) -> Option<f64> {
        let range = self.offsets[u]..self.offsets[u + 1];
        self.neighbors[range.clone()]
            .binary_search(&v)
            .ok()
            .map(|i| self.weights[range.start + i])
    }
}

/// Output of a shortest-path query from one or more sources.
///
/// Unreached vertices (and, with a radius limit, vertices beyond it) have
/// infinite distance and no predecessor. Sources have distance 0 and no
/// predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    pub distances: Vec<f64>,
    pub predecessors: Vec<Option<usize>>,
    /// Nearest source per vertex; filled by multi-source queries only
    pub sources: Option<Vec<Option<usize>>>,
    /// Number of vertices settled by the search
    pub settled: usize,
}

impl ShortestPaths {
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn is_reached(&self, v: usize) -> bool {
        self.distances[v].is_finite()
    }

    /// Check that both arrays cover `n` vertices
    pub fn check_len(&self, what: &str, n: usize) -> Result<()> {
        if self.distances.len() != n {
            return Err(TeasarError::shape_mismatch(what, n, self.distances.len()));
        }
        if self.predecessors.len() != n {
            return Err(TeasarError::shape_mismatch(what, n, self.predecessors.len()));
        }
        Ok(())
    }
}
