//! Command trait and context for dispatching commands

use std::time::Instant;

use crate::cli::Cli;
use teasar_core::config::TeasarConfig;
use teasar_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, start: Instant) -> Self {
        Self { cli, start }
    }

    /// Configuration from `--config`, or defaults when none is given
    pub fn load_config(&self) -> Result<TeasarConfig> {
        match &self.cli.config {
            Some(path) => TeasarConfig::load(path),
            None => Ok(TeasarConfig::default()),
        }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("teasar {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("TEASAR skeletonization of meshes and weighted spatial graphs.");
        println!();
        println!("Run `teasar --help` for usage information.");
        Ok(())
    }
}
