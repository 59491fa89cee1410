//! Command implementations for all teasar commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{root, skeletonize};
use teasar_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Skeletonize(args) => skeletonize::execute(ctx, args),
            Commands::Root(args) => root::execute(ctx, args),
        }
    }
}
