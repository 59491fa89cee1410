//! Skeletonizing every connected component of a graph

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::{ComponentErrorPolicy, SkeletonConfig};
use crate::error::{Result, TeasarError};
use crate::graph::{connected_components, dijkstra, ComponentLabels, CsGraph};
use crate::skeleton::component::skeletonize_component;
use crate::skeleton::progress::RunContext;
use crate::skeleton::root::{RootSelection, RootSelector};
use crate::skeleton::types::{ComponentSkeleton, SkeletonResult, SkippedComponent};
use crate::{ensure_len, ensure_vertex, log_search_metrics};

/// Skeletonize each connected component with more than
/// `config.cc_vertex_thresh` vertices.
///
/// The component containing `root_index` (if given) is rooted there; every
/// other component gets its root from `selector`. Components are processed
/// in parallel unless `config.parallel` is off, and reported in label order.
/// Components that produce no paths are left out.
pub fn skeletonize_graph(
    graph: &CsGraph,
    root_index: Option<usize>,
    config: &SkeletonConfig,
    selector: &dyn RootSelector,
    ctx: &RunContext,
) -> Result<SkeletonResult> {
    let started = Instant::now();
    config.validate()?;
    let n = graph.vertex_count();
    if let Some(root) = root_index {
        ensure_vertex!("root index", root, n);
    }

    let components = connected_components(graph);
    let qualifying: Vec<usize> = (0..components.count())
        .filter(|&label| components.sizes[label] > config.cc_vertex_thresh)
        .collect();
    debug!(
        components = components.count(),
        qualifying = qualifying.len(),
        cc_vertex_thresh = config.cc_vertex_thresh,
        "labelled components"
    );

    let run = |label: usize| {
        skeletonize_labelled(graph, &components, label, root_index, config, selector, ctx)
    };
    let outcomes: Vec<Result<ComponentSkeleton>> = if config.parallel {
        qualifying.par_iter().map(|&label| run(label)).collect()
    } else {
        qualifying.iter().map(|&label| run(label)).collect()
    };

    let mut result = SkeletonResult::new(n, config.return_map);
    for (label, outcome) in qualifying.into_iter().zip(outcomes) {
        match outcome {
            Ok(skeleton) if skeleton.paths.is_empty() => {
                debug!(component = label, "component produced no paths");
            }
            Ok(skeleton) => result.push(skeleton),
            Err(TeasarError::Interrupted) => return Err(TeasarError::Interrupted),
            Err(e) if config.on_component_error == ComponentErrorPolicy::Skip => {
                warn!(component = label, error = %e, "skipping component");
                result.skipped.push(SkippedComponent {
                    label,
                    error_type: e.error_type(),
                    message: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    log_search_metrics!(ctx.metrics, "skeletonize_graph");
    debug!(
        skeletons = result.components.len(),
        skipped = result.skipped.len(),
        elapsed = ?started.elapsed(),
        "graph skeletonized"
    );
    Ok(result)
}

fn skeletonize_labelled(
    graph: &CsGraph,
    components: &ComponentLabels,
    label: usize,
    root_index: Option<usize>,
    config: &SkeletonConfig,
    selector: &dyn RootSelector,
    ctx: &RunContext,
) -> Result<ComponentSkeleton> {
    let n = graph.vertex_count();
    let mask = components.mask(label);
    let selection = match root_index {
        Some(root) if components.labels[root] == label => RootSelection {
            root,
            paths: None,
            valid: mask,
        },
        _ => selector.select_root(graph, mask)?,
    };

    let RootSelection {
        root,
        paths,
        mut valid,
    } = selection;
    ensure_vertex!("selected root", root, n);
    ensure_len!("root selection mask", valid, n);
    let paths = match paths {
        Some(paths) => paths,
        None => dijkstra(graph, root, None)?,
    };
    valid[root] = false;

    skeletonize_component(graph, label, root, &paths, valid, config, ctx)
}
