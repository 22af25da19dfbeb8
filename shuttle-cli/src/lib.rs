//! Command-line interface for the shuttle pickup dispatcher.
//!
//! `shuttle optimize` plans a morning's pickups from a JSON request and
//! `shuttle compare` runs every sequencing heuristic over the same request.
//! Both share one set of options, layered from CLI flags, the `cmds.dispatch`
//! table of a configuration file and `SHUTTLE_CMDS_DISPATCH_*` variables.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

mod dispatch;
mod error;

pub use error::CliError;

use dispatch::{DispatchArgs, run_compare, run_optimize};

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_STRATEGY: &str = "strategy";
pub(crate) const ARG_BOARDING_MINUTES: &str = "boarding-minutes";
pub(crate) const ARG_WINDOW_TOLERANCE: &str = "window-tolerance-minutes";
pub(crate) const ARG_ARRIVAL_BUFFER: &str = "arrival-buffer-minutes";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ENV_REQUEST: &str = "SHUTTLE_CMDS_DISPATCH_REQUEST_PATH";

/// Run the shuttle CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments, configuration, the request file or
/// the dispatch itself fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    match cli.command {
        Command::Optimize(args) => run_optimize(args),
        Command::Compare(args) => run_compare(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    if let Err(err) = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
    {
        log::debug!("logging already initialised: {err}");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "shuttle",
    about = "Plan tour-guest pickups across a vehicle fleet",
    version
)]
struct Cli {
    /// Log per-phase detail to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assign, sequence and score pickups for a request.
    Optimize(DispatchArgs),
    /// Run every sequencing strategy and report the best.
    Compare(DispatchArgs),
}

#[cfg(test)]
mod tests;
