//! `optimize` and `compare` command implementation.

use std::io::{BufReader, Write};
use std::time::Instant;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use shuttle_core::{Dispatcher, OptimizeRequest, SequencingStrategy};
use shuttle_fs::open_utf8_file;
use shuttle_planner::{DispatcherConfig, HeuristicDispatcher};
use shuttle_scorer::RunStatistics;

use crate::{
    ARG_ARRIVAL_BUFFER, ARG_BOARDING_MINUTES, ARG_OUTPUT, ARG_REQUEST, ARG_STRATEGY,
    ARG_WINDOW_TOLERANCE, CliError, ENV_REQUEST,
};

/// CLI arguments shared by the `optimize` and `compare` subcommands.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "dispatch",
    long_about = "Plan pickups for a JSON-encoded OptimizeRequest holding \
                 guests, vehicles, the activity and optional weather. \
                 Scheduling options can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Dispatch a pickup request"
)]
#[ortho_config(prefix = "SHUTTLE")]
pub(crate) struct DispatchArgs {
    /// Path to a JSON file containing an `OptimizeRequest`.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Force one sequencing strategy for every vehicle.
    #[arg(long = ARG_STRATEGY, value_name = "name")]
    #[serde(default)]
    pub(crate) strategy: Option<SequencingStrategy>,
    /// Minutes spent loading each party.
    #[arg(long = ARG_BOARDING_MINUTES, value_name = "minutes")]
    #[serde(default)]
    pub(crate) boarding_minutes: Option<u32>,
    /// Window deviation reported but not corrected.
    #[arg(long = ARG_WINDOW_TOLERANCE, value_name = "minutes")]
    #[serde(default)]
    pub(crate) window_tolerance_minutes: Option<u32>,
    /// Minutes before the activity start vehicles should arrive.
    #[arg(long = ARG_ARRIVAL_BUFFER, value_name = "minutes")]
    #[serde(default)]
    pub(crate) arrival_buffer_minutes: Option<u32>,
    /// Write JSON here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl DispatchArgs {
    pub(crate) fn into_config(self) -> Result<DispatchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DispatchConfig::try_from(merged)
    }
}

/// Resolved dispatch command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DispatchConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Validated scheduling parameters.
    pub(crate) dispatcher: DispatcherConfig,
    /// Destination file; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl DispatchConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match shuttle_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn build_dispatcher(&self) -> Result<HeuristicDispatcher, CliError> {
        HeuristicDispatcher::default()
            .with_config(self.dispatcher)
            .map_err(CliError::from)
    }
}

impl TryFrom<DispatchArgs> for DispatchConfig {
    type Error = CliError;

    fn try_from(args: DispatchArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_REQUEST,
        })?;

        let defaults = DispatcherConfig::default();
        let dispatcher = DispatcherConfig {
            boarding_minutes: args.boarding_minutes.unwrap_or(defaults.boarding_minutes),
            window_tolerance_minutes: args
                .window_tolerance_minutes
                .unwrap_or(defaults.window_tolerance_minutes),
            arrival_buffer_minutes: args
                .arrival_buffer_minutes
                .unwrap_or(defaults.arrival_buffer_minutes),
            strategy_override: args.strategy,
        }
        .validate()?;

        Ok(Self {
            request_path,
            dispatcher,
            output: args.output,
        })
    }
}

pub(crate) fn run_optimize(args: DispatchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_optimize_with(args, &mut stdout)
}

pub(crate) fn run_optimize_with(
    args: DispatchArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    let request = load_request(&config.request_path)?;
    let dispatcher = config.build_dispatcher()?;

    let mut stats = RunStatistics::new();
    let started = Instant::now();
    let outcome = dispatcher.optimize(&request);
    let elapsed = started.elapsed();
    match &outcome {
        Ok(result) => stats.record_success(result, elapsed),
        Err(_) => stats.record_failure(elapsed),
    }
    log_statistics(&stats);

    let result = outcome.map_err(CliError::Dispatch)?;
    write_output(&config, writer, &result)
}

pub(crate) fn run_compare(args: DispatchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_compare_with(args, &mut stdout)
}

pub(crate) fn run_compare_with(
    args: DispatchArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    if let Some(strategy) = config.dispatcher.strategy_override {
        log::warn!("--{ARG_STRATEGY} {strategy} is ignored when comparing strategies");
    }
    let request = load_request(&config.request_path)?;
    let dispatcher = config.build_dispatcher()?;
    let comparison = dispatcher
        .compare_strategies(&request)
        .map_err(CliError::Dispatch)?;
    match comparison.best {
        Some(best) => log::info!("best strategy: {best}"),
        None => log::info!("no guests to dispatch; no strategy preferred"),
    }
    write_output(&config, writer, &comparison)
}

fn resolve_config(args: DispatchArgs) -> Result<DispatchConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`OptimizeRequest`] from disk.
pub(crate) fn load_request(path: &Utf8Path) -> Result<OptimizeRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output<T: Serialize>(
    config: &DispatchConfig,
    writer: &mut dyn Write,
    payload: &T,
) -> Result<(), CliError> {
    let mut text = serde_json::to_string_pretty(payload).map_err(CliError::SerialiseOutput)?;
    text.push('\n');
    match &config.output {
        Some(path) => {
            shuttle_fs::write_utf8_file(path, text.as_bytes()).map_err(CliError::WriteOutput)?;
            log::info!("wrote {path}");
        }
        None => writer
            .write_all(text.as_bytes())
            .map_err(CliError::WriteOutput)?,
    }
    Ok(())
}

fn log_statistics(stats: &RunStatistics) {
    log::info!(
        "runs: {} succeeded, {} failed, mean solve time {:?}",
        stats.successes(),
        stats.failures(),
        stats.mean_solve_time()
    );
    if let Some(score) = stats.best_score() {
        log::info!("best efficiency: {score:.1}");
    }
    for (strategy, routes) in stats.strategy_usage() {
        log::debug!("{strategy}: {routes} route(s)");
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<DispatchConfig, CliError> {
    let merged = DispatchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    DispatchConfig::try_from(merged)
}
