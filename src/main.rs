//! teasar - TEASAR skeletonization CLI
//!
//! Reduces meshes and weighted spatial graphs to centerline skeletons:
//! one tree of paths per connected component, covering every vertex
//! within an invalidation radius.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use teasar_core::error::{ExitCode as TeasarExitCode, TeasarError};
use teasar_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if argv_requests_json() => {
            // parse failed, so `cli.format` is unknown; argv is the only hint
            let error = parse_failure(err);
            eprintln!("{}", error.to_json());
            return exit_with(error.exit_code());
        }
        Err(err) => err.exit(),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("warning: logging disabled: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => exit_with(TeasarExitCode::Success),
        Err(e) => {
            report_failure(&cli, &e);
            exit_with(e.exit_code())
        }
    }
}

/// Map a clap failure onto the error envelope; help and version still print
/// and exit the way clap does
fn parse_failure(err: clap::Error) -> TeasarError {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::ArgumentConflict => TeasarError::UsageError(err.to_string()),
        _ => TeasarError::Other(err.to_string()),
    }
}

fn report_failure(cli: &Cli, error: &TeasarError) {
    match cli.format {
        OutputFormat::Json => eprintln!("{}", error.to_json()),
        OutputFormat::Human if !cli.quiet => eprintln!("error: {}", error),
        OutputFormat::Human => {}
    }
}

fn exit_with(code: TeasarExitCode) -> ExitCode {
    ExitCode::from(code as u8)
}

/// Whether argv asks for `--format json`, checked without clap
fn argv_requests_json() -> bool {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format=json" => return true,
            "--format" if args.next().as_deref() == Some("json") => return true,
            _ => {}
        }
    }
    false
}
