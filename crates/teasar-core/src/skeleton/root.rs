//! Root selection
//!
//! The default root is found with a double-sweep far-point heuristic: start
//! anywhere, jump to the farthest valid vertex, and repeat while the
//! farthest distance keeps growing. The vertex the last improving sweep
//! started from is one end of an approximate diameter of the component.
//!
//! Neuron meshes are instead rooted at the soma, see [`SomaAnchor`].

use tracing::debug;

use crate::error::{Result, TeasarError};
use crate::graph::build::{euclidean, vertex_dimension};
use crate::graph::{dijkstra, largest_component_mask, CsGraph, ShortestPaths};
use crate::{bail_invalid, ensure_len, ensure_vertex};

/// Result of the double-sweep heuristic
#[derive(Debug, Clone, PartialEq)]
pub struct FarPoints {
    pub root: usize,
    /// Farthest valid vertex from `root`
    pub far: usize,
    pub max_distance: f64,
    /// Shortest paths from `root`
    pub paths: ShortestPaths,
}

/// A root with its (optional) shortest paths and the validity mask the
/// component loop should start from
#[derive(Debug, Clone, PartialEq)]
pub struct RootSelection {
    pub root: usize,
    /// Shortest paths from `root`; computed by the driver when absent
    pub paths: Option<ShortestPaths>,
    pub valid: Vec<bool>,
}

/// Farthest valid vertex with finite distance, lowest index on ties
fn farthest_valid(distances: &[f64], valid: Option<&[bool]>) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (v, &d) in distances.iter().enumerate() {
        let eligible = valid.map_or(true, |mask| mask[v]);
        if !eligible || !d.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, bd)| d > bd) {
            best = Some((v, d));
        }
    }
    best
}

/// Find a root and its farthest valid vertex by repeated sweeps.
///
/// Starts from the first valid vertex (vertex 0 without a mask). Vertices
/// outside `valid` are never chosen as far points but still carry paths.
pub fn find_far_points(graph: &CsGraph, valid: Option<&[bool]>) -> Result<FarPoints> {
    let n = graph.vertex_count();
    let start = match valid {
        Some(mask) => {
            ensure_len!("valid mask", mask, n);
            match mask.iter().position(|&v| v) {
                Some(first) => first,
                None => bail_invalid!("valid mask", "no valid vertices"),
            }
        }
        None if n == 0 => bail_invalid!("graph", "no vertices"),
        None => 0,
    };

    let mut current = start;
    let mut best: Option<FarPoints> = None;
    let mut sweeps = 0usize;
    loop {
        let paths = dijkstra(graph, current, None)?;
        sweeps += 1;
        let (far, distance) = farthest_valid(&paths.distances, valid).unwrap_or((current, 0.0));

        let improved = best.as_ref().map_or(distance > 0.0, |b| distance > b.max_distance);
        if improved {
            best = Some(FarPoints {
                root: current,
                far,
                max_distance: distance,
                paths,
            });
            current = far;
            continue;
        }

        let result = match best {
            Some(best) => best,
            // nothing reachable beyond the start
            None => FarPoints {
                root: current,
                far: current,
                max_distance: 0.0,
                paths,
            },
        };
        debug!(
            root = result.root,
            far = result.far,
            max_distance = result.max_distance,
            sweeps,
            "found far points"
        );
        return Ok(result);
    }
}

/// Choose a root with the far-point heuristic.
///
/// Without a mask, the search is restricted to the largest connected
/// component.
pub fn find_graph_root(graph: &CsGraph, valid: Option<Vec<bool>>) -> Result<RootSelection> {
    let valid = match valid {
        Some(mask) => mask,
        None => largest_component_mask(graph),
    };
    let far_points = find_far_points(graph, Some(&valid))?;
    Ok(RootSelection {
        root: far_points.root,
        paths: Some(far_points.paths),
        valid,
    })
}

/// Picks the root of one connected component.
///
/// `component_mask` selects the component's vertices. The returned mask may
/// already have vertices invalidated (for example a soma).
pub trait RootSelector: Send + Sync {
    fn select_root(&self, graph: &CsGraph, component_mask: Vec<bool>) -> Result<RootSelection>;
}

/// Soma vertices and each vertex's distance to the soma
#[derive(Debug, Clone, PartialEq)]
pub struct SomaAnchor {
    is_soma: Vec<bool>,
    soma_distance: Vec<f64>,
}

impl SomaAnchor {
    pub fn new(is_soma: Vec<bool>, soma_distance: Vec<f64>) -> Result<Self> {
        ensure_len!("soma distances", soma_distance, is_soma.len());
        Ok(Self {
            is_soma,
            soma_distance,
        })
    }

    /// Treat a single vertex as the soma
    pub fn from_root_vertex(vertices: &[Vec<f64>], root: usize) -> Result<Self> {
        ensure_vertex!("root index", root, vertices.len());
        let anchor = &vertices[root];
        Ok(Self {
            is_soma: (0..vertices.len()).map(|v| v == root).collect(),
            soma_distance: vertices.iter().map(|p| euclidean(p, anchor)).collect(),
        })
    }

    /// Vertices closer than `soma_thresh` to `soma_pt` form the soma
    pub fn from_point(vertices: &[Vec<f64>], soma_pt: &[f64], soma_thresh: f64) -> Result<Self> {
        let dim = vertex_dimension(vertices)?;
        if dim != 0 && soma_pt.len() != dim {
            return Err(TeasarError::shape_mismatch("soma point", dim, soma_pt.len()));
        }
        if soma_pt.iter().any(|c| !c.is_finite()) {
            bail_invalid!("soma point", format!("{:?}", soma_pt));
        }
        let soma_distance: Vec<f64> = vertices.iter().map(|p| euclidean(p, soma_pt)).collect();
        Ok(Self {
            is_soma: soma_distance.iter().map(|&d| d < soma_thresh).collect(),
            soma_distance,
        })
    }

    pub fn is_soma(&self) -> &[bool] {
        &self.is_soma
    }

    pub fn soma_distance(&self) -> &[f64] {
        &self.soma_distance
    }

    pub fn soma_count(&self) -> usize {
        self.is_soma.iter().filter(|&&s| s).count()
    }

    fn select(&self, graph: &CsGraph, mut valid: Vec<bool>) -> Result<RootSelection> {
        let n = graph.vertex_count();
        ensure_len!("component mask", valid, n);
        ensure_len!("soma flags", self.is_soma, n);

        // closest valid soma vertex; NaN distances rank last
        let soma_root = (0..n)
            .filter(|&v| self.is_soma[v] && valid[v])
            .min_by(|&a, &b| {
                let da = nan_last(self.soma_distance[a]);
                let db = nan_last(self.soma_distance[b]);
                da.total_cmp(&db).then(a.cmp(&b))
            });

        let (root, paths) = match soma_root {
            Some(root) => (root, dijkstra(graph, root, None)?),
            None => {
                let far_points = find_far_points(graph, Some(&valid))?;
                (far_points.root, far_points.paths)
            }
        };

        for (v, flag) in valid.iter_mut().enumerate() {
            if self.is_soma[v] {
                *flag = false;
            }
        }
        valid[root] = false;

        let mut unreachable = valid
            .iter()
            .enumerate()
            .filter(|&(v, &ok)| ok && !paths.is_reached(v))
            .map(|(v, _)| v);
        if let Some(first) = unreachable.next() {
            return Err(TeasarError::UnreachableVertices {
                root,
                count: 1 + unreachable.count(),
                first,
            });
        }

        debug!(
            root,
            from_soma = soma_root.is_some(),
            "selected neuron root"
        );
        Ok(RootSelection {
            root,
            paths: Some(paths),
            valid,
        })
    }
}

fn nan_last(d: f64) -> f64 {
    if d.is_nan() {
        f64::INFINITY
    } else {
        d
    }
}

/// Built-in root strategies
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RootStrategy {
    /// Double-sweep far-point heuristic on the component
    #[default]
    FarthestPoint,
    /// Closest soma vertex in the component, soma pre-invalidated
    Soma(SomaAnchor),
}

impl RootSelector for RootStrategy {
    fn select_root(&self, graph: &CsGraph, component_mask: Vec<bool>) -> Result<RootSelection> {
        match self {
            RootStrategy::FarthestPoint => find_graph_root(graph, Some(component_mask)),
            RootStrategy::Soma(anchor) => anchor.select(graph, component_mask),
        }
    }
}
