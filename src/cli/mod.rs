//! CLI argument parsing for teasar
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json,
//! --config

pub mod args;
pub mod format;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{RootArgs, SkeletonizeArgs};
use parse::parse_output_format;
pub use teasar_core::format::OutputFormat;

/// teasar - skeletonize meshes and weighted spatial graphs
#[derive(Parser, Debug)]
#[command(name = "teasar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter directive (e.g. `teasar=trace`), overrides --verbose
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, env = "TEASAR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Skeletonize every component of a mesh
    Skeletonize(SkeletonizeArgs),

    /// Find the far-point root of the largest component
    Root(RootArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_skeletonize_flags() {
        let cli = Cli::try_parse_from([
            "teasar",
            "--format",
            "json",
            "skeletonize",
            "mesh.json",
            "--invalidation-d",
            "2.5",
            "--soma-pt",
            "1,2,3",
            "--map",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        let Some(Commands::Skeletonize(args)) = cli.command else {
            panic!("expected skeletonize");
        };
        assert_eq!(args.invalidation_d, Some(2.5));
        assert_eq!(args.soma_pt, Some(vec![1.0, 2.0, 3.0]));
        assert!(args.map);
        assert!(!args.timing);
    }

    #[test]
    fn test_rejects_malformed_soma_point() {
        let err = Cli::try_parse_from(["teasar", "skeletonize", "m.json", "--soma-pt", "1,x"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
