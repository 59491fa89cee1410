use std::sync::{Arc, Mutex};

use super::*;
use crate::cancel::CancelToken;
use crate::graph::{create_spatial_graph, EdgeWeighting};
use crate::skeleton::progress::ProgressObserver;

fn square() -> CsGraph {
    create_spatial_graph(
        &[
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
            vec![1.0, 0.0],
        ],
        &[[0, 1], [1, 2], [2, 3], [3, 0]],
        EdgeWeighting::Euclidean,
    )
    .unwrap()
}

/// Main line 0..=10 along x, a branch of three off vertex 2 and a branch
/// off vertex 5 whose last edge has length 3
fn branched_line() -> CsGraph {
    let mut vertices: Vec<Vec<f64>> = (0..=10).map(|x| vec![x as f64, 0.0]).collect();
    vertices.extend([
        vec![2.0, 1.0],
        vec![2.0, 2.0],
        vec![2.0, 3.0],
        vec![5.0, -1.0],
        vec![5.0, -2.0],
        vec![5.0, -5.0],
    ]);
    let mut edges: Vec<[usize; 2]> = (1..=10).map(|v| [v - 1, v]).collect();
    edges.extend([[2, 11], [11, 12], [12, 13], [5, 14], [14, 15], [15, 16]]);
    create_spatial_graph(&vertices, &edges, EdgeWeighting::Euclidean).unwrap()
}

fn config(invalidation_d: f64) -> SkeletonConfig {
    SkeletonConfig {
        invalidation_d,
        return_map: true,
        return_timing: true,
        ..SkeletonConfig::default()
    }
}

fn run_with(
    graph: &CsGraph,
    root: usize,
    config: &SkeletonConfig,
    ctx: &RunContext,
) -> Result<ComponentSkeleton> {
    let paths = dijkstra(graph, root, None).unwrap();
    let mut valid = vec![true; graph.vertex_count()];
    valid[root] = false;
    skeletonize_component(graph, 0, root, &paths, valid, config, ctx)
}

fn run(graph: &CsGraph, root: usize, invalidation_d: f64) -> ComponentSkeleton {
    run_with(graph, root, &config(invalidation_d), &RunContext::new()).unwrap()
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<(usize, usize)>>,
    started: Mutex<Option<usize>>,
}

impl ProgressObserver for Recorder {
    fn component_started(&self, _label: usize, to_cover: usize) {
        *self.started.lock().unwrap() = Some(to_cover);
    }

    fn vertices_covered(&self, _label: usize, newly: usize, remaining: usize) {
        self.events.lock().unwrap().push((newly, remaining));
    }
}

#[test]
fn test_square_single_path() {
    let skeleton = run(&square(), 0, 10.0);
    assert_eq!(skeleton.root, 0);
    assert_eq!(skeleton.paths, vec![vec![2, 1, 0]]);
    assert_eq!(skeleton.path_lengths, vec![2.0]);
}

#[test]
fn test_square_small_radius_breaks_branch_tie_by_index() {
    // vertex 3 is equally close to 0 and 2; the lower index wins
    let skeleton = run(&square(), 0, 0.5);
    assert_eq!(skeleton.paths, vec![vec![2, 1, 0], vec![3, 0]]);
    assert_eq!(skeleton.path_lengths, vec![2.0, 1.0]);
}

#[test]
fn test_branched_line_radius_controls_branches() {
    let g = branched_line();
    assert_eq!(run(&g, 0, 1.1).path_lengths, vec![10.0, 5.0, 3.0]);
    assert_eq!(run(&g, 0, 3.1).path_lengths, vec![10.0, 5.0]);
    assert_eq!(run(&g, 0, 5.1).path_lengths, vec![10.0]);
}

#[test]
fn test_target_ties_pick_lowest_index() {
    // vertices 10 and 16 are both 10 away from the root
    let skeleton = run(&branched_line(), 0, 1.1);
    assert_eq!(skeleton.paths[0].first(), Some(&10));
    assert_eq!(skeleton.paths[1], vec![16, 15, 14, 5]);
    assert_eq!(skeleton.paths[2], vec![13, 12, 11, 2]);
}

#[test]
fn test_paths_follow_edges_and_lengths_match() {
    let g = branched_line();
    let skeleton = run(&g, 0, 1.1);
    for (path, &length) in skeleton.paths.iter().zip(&skeleton.path_lengths) {
        let summed: f64 = path
            .windows(2)
            .map(|pair| g.edge_weight(pair[0], pair[1]).unwrap())
            .sum();
        assert_eq!(summed, length);

        let last = *path.last().unwrap();
        let exact = dijkstra(&g, path[0], None).unwrap().distances[last];
        assert_eq!(exact, length);
    }
}

#[test]
fn test_every_vertex_is_covered_within_radius() {
    let g = branched_line();
    for d in [0.5, 1.1, 3.1, 5.1] {
        let skeleton = run(&g, 0, d);
        let mapping = skeleton.mapping.unwrap();
        assert_eq!(mapping.len(), g.vertex_count());
        assert!(mapping.iter().all(|entry| entry.distance <= d));
    }
}

#[test]
fn test_map_keeps_strictly_closer_source() {
    let skeleton = run(&branched_line(), 0, 1.1);
    let mapping = skeleton.mapping.unwrap();
    let entry = |v: usize| *mapping.iter().find(|e| e.vertex == v).unwrap();

    // first covered by the main path at distance 1, later lies on a path
    assert_eq!(entry(14).nearest, 14);
    assert_eq!(entry(14).distance, 0.0);
    assert_eq!(entry(11).nearest, 11);
    assert_eq!(entry(0).nearest, 0);
}

#[test]
fn test_valid_count_strictly_decreases_to_zero() {
    let recorder = Arc::new(Recorder::default());
    let ctx = RunContext::new().with_progress(recorder.clone());
    let g = branched_line();
    let skeleton = run_with(&g, 0, &config(1.1), &ctx).unwrap();

    let events = recorder.events.lock().unwrap();
    assert_eq!(*recorder.started.lock().unwrap(), Some(16));
    assert_eq!(events.len(), skeleton.paths.len());
    assert!(events.iter().all(|&(newly, _)| newly > 0));
    assert!(events.windows(2).all(|w| w[1].1 < w[0].1));
    assert_eq!(events.last().map(|e| e.1), Some(0));
    assert_eq!(events.iter().map(|e| e.0).sum::<usize>(), 16);
}

#[test]
fn test_timing_counts_iterations() {
    let skeleton = run(&branched_line(), 0, 1.1);
    let timing = skeleton.timing.unwrap();
    assert_eq!(timing.iterations, 3);
    assert!(timing.total >= timing.sweep);

    let plain = run_with(
        &square(),
        0,
        &SkeletonConfig::default(),
        &RunContext::new(),
    )
    .unwrap();
    assert!(plain.timing.is_none());
    assert!(plain.mapping.is_none());
}

#[test]
fn test_nothing_to_cover_yields_no_paths() {
    let g = square();
    let paths = dijkstra(&g, 0, None).unwrap();
    let skeleton = skeletonize_component(
        &g,
        0,
        0,
        &paths,
        vec![false; 4],
        &config(1.0),
        &RunContext::new(),
    )
    .unwrap();
    assert!(skeleton.paths.is_empty());
}

#[test]
fn test_rejects_bad_inputs() {
    let g = square();
    let paths = dijkstra(&g, 0, None).unwrap();
    let ctx = RunContext::new();

    let err = skeletonize_component(&g, 0, 0, &paths, vec![true; 3], &config(1.0), &ctx)
        .unwrap_err();
    assert!(matches!(err, TeasarError::ShapeMismatch { .. }));

    let err = skeletonize_component(&g, 0, 9, &paths, vec![true; 4], &config(1.0), &ctx)
        .unwrap_err();
    assert!(matches!(err, TeasarError::VertexOutOfRange { .. }));

    let err = skeletonize_component(&g, 0, 0, &paths, vec![true; 4], &config(-1.0), &ctx)
        .unwrap_err();
    assert!(matches!(err, TeasarError::InvalidValue { .. }));
}

#[test]
fn test_rejects_mask_spanning_components() {
    let g = CsGraph::from_edges(4, &[(0, 1, 1.0), (2, 3, 1.0)]).unwrap();
    let err = run_with(&g, 0, &config(1.0), &RunContext::new()).unwrap_err();
    assert!(matches!(
        err,
        TeasarError::UnreachableVertices {
            root: 0,
            count: 2,
            first: 2
        }
    ));
    assert!(err.is_reachability());
}

#[test]
fn test_cancelled_run_is_interrupted() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let ctx = RunContext::new().with_cancel(cancel);
    let err = run_with(&square(), 0, &config(1.0), &ctx).unwrap_err();
    assert!(matches!(err, TeasarError::Interrupted));
}

#[test]
fn test_search_metrics_recorded() {
    let ctx = RunContext::new();
    let skeleton = run_with(&branched_line(), 0, &config(1.1), &ctx).unwrap();
    let searches = skeleton.paths.len() as u64;
    assert_eq!(ctx.metrics.branch_searches(), searches);
    assert_eq!(ctx.metrics.sweeps(), searches);
    assert!(ctx.metrics.settled() > 0);
}
