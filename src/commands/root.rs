//! `teasar root` command - far-point root of the largest component

use crate::cli::RootArgs;
use crate::commands::dispatch::CommandContext;
use teasar_core::error::{Result, TeasarError};
use teasar_core::graph::{largest_component_mask, EdgeWeighting};
use teasar_core::mesh::MeshFile;
use teasar_core::skeleton::find_far_points;

/// Execute the root command
pub fn execute(ctx: &CommandContext, args: &RootArgs) -> Result<()> {
    let cli = ctx.cli;
    let mut config = ctx.load_config()?;
    if args.unit_weights {
        config.graph.weighting = EdgeWeighting::Unit;
    }

    let mesh = MeshFile::load(&args.mesh)?;
    let graph = mesh.to_graph(config.graph.weighting)?;
    if graph.is_empty() {
        return Err(TeasarError::invalid_mesh("mesh has no vertices"));
    }

    let mask = largest_component_mask(&graph);
    let component_vertices = mask.iter().filter(|&&v| v).count();
    let far_points = find_far_points(&graph, Some(&mask))?;

    crate::output_by_format_result!(cli.format,
        json => {
            println!(
                "{}",
                serde_json::json!({
                    "root": far_points.root,
                    "far": far_points.far,
                    "max_distance": far_points.max_distance,
                    "component_vertices": component_vertices,
                })
            );
            Ok::<(), TeasarError>(())
        },
        human => {
            if cli.quiet {
                println!("{}", far_points.root);
            } else {
                println!(
                    "root {} (far point {}, distance {:.3}, {} vertices in largest component)",
                    far_points.root,
                    far_points.far,
                    far_points.max_distance,
                    component_vertices
                );
            }
        }
    )
}
