//! Command argument structures

use clap::Args;
use std::path::PathBuf;

use crate::cli::parse::{parse_distance, parse_point};

/// Arguments for the skeletonize command.
#[derive(Args, Debug)]
pub struct SkeletonizeArgs {
    /// Mesh file (JSON with `vertices` and `edges` or `faces`)
    pub mesh: PathBuf,

    /// Distance from a skeleton path within which vertices count as covered
    #[arg(long, short = 'd', value_parser = parse_distance)]
    pub invalidation_d: Option<f64>,

    /// Skip components with this many vertices or fewer
    #[arg(long)]
    pub cc_vertex_thresh: Option<usize>,

    /// Root the component containing this vertex here
    #[arg(long)]
    pub root_index: Option<usize>,

    /// Neuron mode: anchor roots at the soma around this point (x,y,z)
    #[arg(long, value_parser = parse_point)]
    pub soma_pt: Option<::std::vec::Vec<f64>>,

    /// Soma radius around --soma-pt
    #[arg(long, value_parser = parse_distance, requires = "soma_pt")]
    pub soma_thresh: Option<f64>,

    /// Neuron mode without a soma point (--root-index becomes the soma)
    #[arg(long)]
    pub neuron: bool,

    /// Include the vertex to skeleton map in the report
    #[arg(long)]
    pub map: bool,

    /// Include per-phase timing in the report
    #[arg(long)]
    pub timing: bool,

    /// Weight every edge 1 instead of its Euclidean length
    #[arg(long)]
    pub unit_weights: bool,

    /// Process components one after another
    #[arg(long)]
    pub sequential: bool,

    /// Leave failing components out instead of aborting
    #[arg(long)]
    pub skip_failed: bool,

    /// Write the JSON report to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Show a progress bar on stderr
    #[arg(long)]
    pub progress: bool,
}

impl SkeletonizeArgs {
    /// Whether the soma-anchored neuron entry point applies
    pub fn neuron_mode(&self) -> bool {
        self.neuron || self.soma_pt.is_some()
    }
}

/// Arguments for the root command.
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Mesh file (JSON with `vertices` and `edges` or `faces`)
    pub mesh: PathBuf,

    /// Weight every edge 1 instead of its Euclidean length
    #[arg(long)]
    pub unit_weights: bool,
}
