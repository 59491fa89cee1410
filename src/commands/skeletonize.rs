//! `teasar skeletonize` command - skeletonize every component of a mesh

use std::fs;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cli::SkeletonizeArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::progress::CommandProgress;
use crate::commands::report::{
    ComponentReport, CoverageReport, MapReport, SearchReport, SkeletonReport,
};
use teasar_core::cancel::CancelToken;
use teasar_core::config::{ComponentErrorPolicy, TeasarConfig};
use teasar_core::error::{Result, TeasarError};
use teasar_core::graph::EdgeWeighting;
use teasar_core::mesh::MeshFile;
use teasar_core::skeleton::{skeletonize_mesh, skeletonize_neuron, NeuronOptions, RunContext};

/// Execute the skeletonize command
pub fn execute(ctx: &CommandContext, args: &SkeletonizeArgs) -> Result<()> {
    let cli = ctx.cli;
    let mut config = ctx.load_config()?;
    apply_overrides(&mut config, args);
    config.validate()?;

    let mesh = MeshFile::load(&args.mesh)?;
    debug!(elapsed = ?ctx.start.elapsed(), "load_mesh");

    let cancel = CancelToken::new();
    let handle = cancel.clone();
    let _ = ctrlc::set_handler(move || handle.cancel());

    let progress = Arc::new(CommandProgress::new(args.progress && !cli.quiet));
    let run_ctx = RunContext::new()
        .with_cancel(cancel)
        .with_progress(progress.clone());

    let neuron = args.neuron_mode();
    let outcome = if neuron {
        let options = NeuronOptions {
            root_index: args.root_index,
            soma_pt: args.soma_pt.clone(),
        };
        skeletonize_neuron(&mesh, &options, &config, &run_ctx)
    } else {
        skeletonize_mesh(&mesh, args.root_index, &config, &run_ctx)
    };
    progress.finish();
    let result = outcome?;
    debug!(elapsed = ?ctx.start.elapsed(), "skeletonize");

    let skeleton = match result.assemble(&mesh.vertices) {
        Ok(skeleton) => Some(skeleton),
        Err(TeasarError::EmptySkeleton) => {
            warn!("no component produced a skeleton path");
            None
        }
        Err(e) => return Err(e),
    };

    let report = SkeletonReport {
        mesh: args.mesh.display().to_string(),
        mode: if neuron { "neuron" } else { "mesh" },
        vertices: mesh.vertex_count(),
        invalidation_d: config.skeleton.invalidation_d,
        roots: result.roots(),
        path_lengths: result.path_lengths(),
        components: result.components.iter().map(ComponentReport::from).collect(),
        skipped: &result.skipped,
        skeleton,
        vertex_map: result.vertex_map.as_ref().map(MapReport::from),
        coverage: CoverageReport::from(progress.counter()),
        search: SearchReport::from(run_ctx.metrics.as_ref()),
    };

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .map_err(|e| TeasarError::io_operation("write report", path.display(), e))?;
        debug!(path = %path.display(), "wrote report");
    }

    crate::output_by_format_result!(cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok::<(), TeasarError>(())
        },
        human => {
            if !cli.quiet {
                print_summary(&report);
            }
        }
    )
}

/// CLI flags win over config file values
fn apply_overrides(config: &mut TeasarConfig, args: &SkeletonizeArgs) {
    if let Some(d) = args.invalidation_d {
        config.skeleton.invalidation_d = d;
    }
    if let Some(thresh) = args.cc_vertex_thresh {
        if args.neuron_mode() {
            config.neuron.cc_vertex_thresh = thresh;
        } else {
            config.skeleton.cc_vertex_thresh = thresh;
        }
    }
    if let Some(thresh) = args.soma_thresh {
        config.neuron.soma_thresh = thresh;
    }
    config.skeleton.return_map |= args.map;
    config.skeleton.return_timing |= args.timing;
    if args.unit_weights {
        config.graph.weighting = EdgeWeighting::Unit;
    }
    if args.sequential {
        config.skeleton.parallel = false;
    }
    if args.skip_failed {
        config.skeleton.on_component_error = ComponentErrorPolicy::Skip;
    }
}

fn print_summary(report: &SkeletonReport) {
    println!(
        "{}: {} vertices, {} component(s) skeletonized",
        report.mesh,
        report.vertices,
        report.components.len()
    );
    println!(
        "  covered {}/{} vertices",
        report.coverage.covered, report.coverage.to_cover
    );
    for component in &report.components {
        println!(
            "  component {}: root {}, {} path(s), length {:.3}",
            component.label,
            component.root,
            component.paths.len(),
            component.total_length
        );
    }
    for skipped in report.skipped {
        println!(
            "  component {} skipped: {}",
            skipped.label, skipped.message
        );
    }
    match &report.skeleton {
        Some(skeleton) => println!(
            "skeleton: {} vertices, {} edges",
            skeleton.vertices.len(),
            skeleton.edges.len()
        ),
        None => println!("skeleton: empty"),
    }
}
