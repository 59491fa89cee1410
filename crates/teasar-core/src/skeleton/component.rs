//! The invalidation-covering loop for one connected component.
//!
//! Each iteration picks the valid vertex farthest from the root, connects
//! it to the existing skeleton along a shortest path, and invalidates every
//! vertex within `invalidation_d` of that path. The loop ends when no valid
//! vertex remains.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::SkeletonConfig;
use crate::error::{Result, TeasarError};
use crate::graph::path::walk_until;
use crate::graph::{dijkstra, dijkstra_multi, reconstruct_path, CsGraph, ShortestPaths};
use crate::skeleton::progress::RunContext;
use crate::skeleton::types::{ComponentSkeleton, Path, PhaseTiming, VertexMap};
use crate::{ensure_len, ensure_vertex, trace_time};

/// Relative widening of the branch search radius, so that summing the same
/// route in reverse cannot push the bounding skeleton vertex out of range
const RADIUS_SLACK: f64 = 1e-9;

/// Loop phases with their own timing bucket
#[derive(Debug, Clone, Copy)]
enum Phase {
    Target,
    BranchSearch,
    PathRecovery,
    Sweep,
    Invalidation,
}

struct ComponentState {
    valid: Vec<bool>,
    remaining: usize,
    /// Skeleton vertices in the order they joined
    visited: Vec<usize>,
    on_skeleton: Vec<bool>,
    paths: Vec<Path>,
    path_lengths: Vec<f64>,
    map: Option<VertexMap>,
    timing: Option<PhaseTiming>,
}

impl ComponentState {
    fn new(root: usize, valid: Vec<bool>, config: &SkeletonConfig) -> Self {
        let n = valid.len();
        let remaining = valid.iter().filter(|&&v| v).count();
        let mut on_skeleton = vec![false; n];
        on_skeleton[root] = true;
        Self {
            valid,
            remaining,
            visited: vec![root],
            on_skeleton,
            paths: Vec::new(),
            path_lengths: Vec::new(),
            map: config.return_map.then(|| VertexMap::new(n)),
            timing: config.return_timing.then(PhaseTiming::default),
        }
    }

    fn lap(&mut self, phase: Phase, started: Instant) {
        let Some(timing) = self.timing.as_mut() else {
            return;
        };
        let elapsed = started.elapsed();
        let bucket: &mut Duration = match phase {
            Phase::Target => &mut timing.target_selection,
            Phase::BranchSearch => &mut timing.branch_search,
            Phase::PathRecovery => &mut timing.path_recovery,
            Phase::Sweep => &mut timing.sweep,
            Phase::Invalidation => &mut timing.invalidation,
        };
        *bucket += elapsed;
    }

    /// Valid vertex farthest from the root, lowest index on ties
    fn select_target(&self, root_distances: &[f64]) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (v, &ok) in self.valid.iter().enumerate() {
            if !ok {
                continue;
            }
            if best.map_or(true, |b| root_distances[v] > root_distances[b]) {
                best = Some(v);
            }
        }
        best
    }

    /// Skeleton vertex closest to the target, lowest index on ties
    fn nearest_visited(&self, local_distances: &[f64]) -> usize {
        let mut best = self.visited[0];
        for &v in &self.visited[1..] {
            let (d, bd) = (local_distances[v], local_distances[best]);
            if d < bd || (d == bd && v < best) {
                best = v;
            }
        }
        best
    }

    /// Record a path ordered target to branch; every vertex except the
    /// branch joins the skeleton
    fn add_path(&mut self, path: Path, length: f64) {
        if let Some((_, joining)) = path.split_last() {
            for &v in joining {
                self.on_skeleton[v] = true;
                self.visited.push(v);
            }
        }
        self.paths.push(path);
        self.path_lengths.push(length);
    }

    /// Invalidate every vertex reached by the sweep. Returns how many were
    /// newly invalidated.
    fn invalidate(&mut self, sweep: &ShortestPaths) -> usize {
        let sources = sweep.sources.as_deref();
        let mut newly = 0;
        for (v, &d) in sweep.distances.iter().enumerate() {
            if !d.is_finite() {
                continue;
            }
            if self.valid[v] {
                self.valid[v] = false;
                newly += 1;
            }
            if let (Some(map), Some(Some(source))) =
                (self.map.as_mut(), sources.map(|s| s[v]))
            {
                map.offer(v, source, d);
            }
        }
        self.remaining -= newly;
        newly
    }
}

fn search_radius(bound: f64) -> f64 {
    let bound = bound.max(0.0);
    bound + bound * RADIUS_SLACK
}

fn check_reachable(root: usize, root_distances: &[f64], valid: &[bool]) -> Result<()> {
    let mut unreachable = valid
        .iter()
        .zip(root_distances)
        .enumerate()
        .filter(|&(_, (&ok, d))| ok && !d.is_finite())
        .map(|(v, _)| v);
    match unreachable.next() {
        Some(first) => Err(TeasarError::UnreachableVertices {
            root,
            count: 1 + unreachable.count(),
            first,
        }),
        None => Ok(()),
    }
}

/// Skeletonize the component containing `root`.
///
/// `root_paths` are the unbounded shortest paths from `root`, and `valid`
/// marks the vertices still to cover (normally the component minus the
/// root). Every valid vertex must be reachable from `root`.
///
/// Returns the paths in the order they were found, each running from its
/// target to the skeleton vertex it joins.
#[tracing::instrument(skip_all, fields(component = label, root = root))]
pub fn skeletonize_component(
    graph: &CsGraph,
    label: usize,
    root: usize,
    root_paths: &ShortestPaths,
    valid: Vec<bool>,
    config: &SkeletonConfig,
    ctx: &RunContext,
) -> Result<ComponentSkeleton> {
    let started = Instant::now();
    let n = graph.vertex_count();
    ensure_vertex!("root", root, n);
    ensure_len!("valid mask", valid, n);
    root_paths.check_len("root paths", n)?;
    config.validate()?;

    let root_distances = &root_paths.distances;
    check_reachable(root, root_distances, &valid)?;

    let mut state = ComponentState::new(root, valid, config);
    ctx.progress.component_started(label, state.remaining);
    debug!(to_cover = state.remaining, "skeletonizing component");

    while state.remaining > 0 {
        ctx.cancel.check()?;

        let t = Instant::now();
        let Some(target) = state.select_target(root_distances) else {
            break;
        };
        if !root_distances[target].is_finite() {
            return Err(TeasarError::UnreachableTarget { root, target });
        }
        state.lap(Phase::Target, t);

        let t = Instant::now();
        let bound_vertex = walk_until(target, &root_paths.predecessors, |v| {
            state.on_skeleton[v]
        })?;
        let bound = root_distances[target] - root_distances[bound_vertex];
        let local = dijkstra(graph, target, Some(search_radius(bound)))?;
        ctx.metrics.record_branch_search(local.settled);
        let branch = state.nearest_visited(&local.distances);
        let length = local.distances[branch];
        if !length.is_finite() {
            return Err(TeasarError::InfinitePathLength { target, branch });
        }
        state.lap(Phase::BranchSearch, t);

        let t = Instant::now();
        let path = reconstruct_path(target, branch, &local.predecessors)?;
        state.add_path(path, length);
        state.lap(Phase::PathRecovery, t);

        let t = Instant::now();
        let sweep = match state.paths.last() {
            Some(path) => dijkstra_multi(graph, path, Some(config.invalidation_d))?,
            None => break,
        };
        ctx.metrics.record_sweep(sweep.settled);
        state.lap(Phase::Sweep, t);

        let t = Instant::now();
        let newly = state.invalidate(&sweep);
        state.lap(Phase::Invalidation, t);
        if let Some(timing) = state.timing.as_mut() {
            timing.iterations += 1;
        }

        ctx.progress.vertices_covered(label, newly, state.remaining);
        trace_time!(t, "invalidation", newly = newly, remaining = state.remaining);
    }

    let ComponentState {
        paths,
        path_lengths,
        map,
        mut timing,
        ..
    } = state;
    if let Some(timing) = timing.as_mut() {
        timing.total = started.elapsed();
    }

    ctx.progress.component_finished(label, paths.len());
    debug!(
        paths = paths.len(),
        total_length = path_lengths.iter().sum::<f64>(),
        elapsed = ?started.elapsed(),
        "component skeletonized"
    );

    Ok(ComponentSkeleton {
        label,
        root,
        paths,
        path_lengths,
        mapping: map.map(|m| m.entries().collect()),
        timing,
    })
}

#[cfg(test)]
mod tests;
