//! Focused unit tests covering dispatch configuration and request handling.

use super::helpers::{Workspace, write_request, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use crate::dispatch::{
    DispatchConfig, config_from_layers_for_test, load_request, run_compare_with,
    run_optimize_with,
};
use rstest::rstest;
use serde_json::Value;
use shuttle_core::test_support::ishigaki_morning_tour;
use shuttle_core::{OptimizationResult, OptimizeError, SequencingStrategy};
use shuttle_planner::{DispatcherConfig, DispatcherConfigError};

fn args_for(workspace: &Workspace) -> DispatchArgs {
    DispatchArgs {
        request_path: Some(workspace.request_path.clone()),
        ..DispatchArgs::default()
    }
}

#[rstest]
fn converting_without_request_errors() {
    let err = DispatchConfig::try_from(DispatchArgs::default())
        .expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(env, ENV_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn unset_options_fall_back_to_dispatcher_defaults() {
    let workspace = Workspace::new();
    let config = DispatchConfig::try_from(args_for(&workspace)).expect("config should build");
    assert_eq!(config.request_path, workspace.request_path);
    assert_eq!(config.dispatcher, DispatcherConfig::default());
    assert!(config.output.is_none());
}

#[rstest]
fn explicit_options_override_defaults() {
    let workspace = Workspace::new();
    let args = DispatchArgs {
        strategy: Some(SequencingStrategy::TimeWindow),
        boarding_minutes: Some(3),
        window_tolerance_minutes: Some(15),
        arrival_buffer_minutes: Some(20),
        ..args_for(&workspace)
    };
    let config = DispatchConfig::try_from(args).expect("config should build");
    assert_eq!(config.dispatcher.boarding_minutes, 3);
    assert_eq!(config.dispatcher.window_tolerance_minutes, 15);
    assert_eq!(config.dispatcher.arrival_buffer_minutes, 20);
    assert_eq!(
        config.dispatcher.strategy_override,
        Some(SequencingStrategy::TimeWindow)
    );
}

#[rstest]
fn zero_boarding_time_is_rejected() {
    let workspace = Workspace::new();
    let args = DispatchArgs {
        boarding_minutes: Some(0),
        ..args_for(&workspace)
    };
    let err = DispatchConfig::try_from(args).expect_err("zero boarding should fail");
    match err {
        CliError::InvalidConfig(DispatcherConfigError::ZeroBoardingTime) => {}
        other => panic!("expected InvalidConfig, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_missing_request() {
    let workspace = Workspace::new();
    let config = DispatchConfig::try_from(args_for(&workspace)).expect("config should build");
    match config.validate_sources().expect_err("request is absent") {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(path, workspace.request_path);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let workspace = Workspace::new();
    std::fs::create_dir(workspace.request_path.as_std_path()).expect("request directory");
    let config = DispatchConfig::try_from(args_for(&workspace)).expect("config should build");
    match config.validate_sources().expect_err("directory is not a request") {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_REQUEST),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_request_decodes_json() {
    let workspace = Workspace::with_morning_tour();
    let request = load_request(&workspace.request_path).expect("request should load");
    assert_eq!(request.guests.len(), 10);
    assert_eq!(request.vehicles.len(), 3);
    assert!(request.weather.is_none());
}

#[rstest]
fn load_request_reports_invalid_json() {
    let workspace = Workspace::new();
    write_utf8(&workspace.request_path, b"{ \"guests\": [");
    match load_request(&workspace.request_path).expect_err("truncated JSON") {
        CliError::ParseRequest { path, .. } => assert_eq!(path, workspace.request_path),
        other => panic!("expected ParseRequest, found {other:?}"),
    }
}

#[rstest]
fn load_request_reports_malformed_clock_times() {
    let workspace = Workspace::with_morning_tour();
    let text = std::fs::read_to_string(workspace.request_path.as_std_path()).expect("read");
    write_utf8(
        &workspace.request_path,
        text.replacen("\"08:30\"", "\"8.30\"", 1).as_bytes(),
    );
    assert!(matches!(
        load_request(&workspace.request_path),
        Err(CliError::ParseRequest { .. })
    ));
}

#[rstest]
fn optimize_writes_pretty_json_result() {
    let workspace = Workspace::with_morning_tour();
    let mut stdout = Vec::new();
    run_optimize_with(args_for(&workspace), &mut stdout).expect("optimize should succeed");

    let text = String::from_utf8(stdout).expect("stdout utf-8");
    assert!(text.ends_with("}\n"));
    let result: OptimizationResult = serde_json::from_str(&text).expect("result JSON");
    assert_eq!(result.guests_served(), 10);
    assert!(result.overall_efficiency > 0.0);
}

#[rstest]
fn optimize_honours_output_path() {
    let workspace = Workspace::with_morning_tour();
    let output = workspace.root.join("plans/today.json");
    let args = DispatchArgs {
        output: Some(output.clone()),
        ..args_for(&workspace)
    };
    let mut stdout = Vec::new();
    run_optimize_with(args, &mut stdout).expect("optimize should succeed");

    assert!(stdout.is_empty());
    let text = std::fs::read_to_string(output.as_std_path()).expect("output written");
    let result: OptimizationResult = serde_json::from_str(&text).expect("result JSON");
    assert_eq!(result.routes.len(), result.diagnostics.vehicles_used);
}

#[rstest]
fn optimize_surfaces_structural_failures() {
    let workspace = Workspace::new();
    let mut request = ishigaki_morning_tour(None);
    request.vehicles.clear();
    write_request(&workspace.request_path, &request);

    let mut stdout = Vec::new();
    let err = run_optimize_with(args_for(&workspace), &mut stdout)
        .expect_err("an empty fleet cannot serve guests");
    match err {
        CliError::Dispatch(OptimizeError::NoVehiclesAvailable { guests }) => assert_eq!(guests, 10),
        other => panic!("expected Dispatch, found {other:?}"),
    }
    assert!(stdout.is_empty());
}

#[rstest]
fn compare_lists_every_strategy() {
    let workspace = Workspace::with_morning_tour();
    let mut stdout = Vec::new();
    run_compare_with(args_for(&workspace), &mut stdout).expect("compare should succeed");

    let value: Value = serde_json::from_slice(&stdout).expect("comparison JSON");
    let strategies: Vec<&str> = value["summaries"]
        .as_array()
        .expect("summaries array")
        .iter()
        .filter_map(|summary| summary["strategy"].as_str())
        .collect();
    assert_eq!(
        strategies,
        ["angular_sweep", "time_window", "nearest_neighbour"]
    );
    assert!(value["best"].is_string());
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "boarding_minutes": "slow" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let workspace = Workspace::new();
    let env_request = workspace.root.join("from-env.json");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "request_path": workspace.root.join("from-file.json").as_str(),
            "boarding_minutes": 7,
            "window_tolerance_minutes": 45,
            "strategy": "angular_sweep",
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": env_request.as_str(),
        "boarding_minutes": 6,
    }));
    composer.push_cli(json!({
        "boarding_minutes": 4,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, env_request);
    assert_eq!(config.dispatcher.boarding_minutes, 4);
    assert_eq!(config.dispatcher.window_tolerance_minutes, 45);
    assert_eq!(
        config.dispatcher.strategy_override,
        Some(SequencingStrategy::AngularSweep)
    );
    assert_eq!(
        config.dispatcher.arrival_buffer_minutes,
        DispatcherConfig::default().arrival_buffer_minutes
    );
}

#[rstest]
#[case::optimize("optimize")]
#[case::compare("compare")]
fn subcommands_share_dispatch_options(#[case] subcommand: &str) {
    let cli = Cli::try_parse_from([
        "shuttle",
        "--verbose",
        subcommand,
        "request.json",
        "--strategy",
        "time_window",
        "--boarding-minutes",
        "2",
    ])
    .expect("arguments should parse");
    assert!(cli.verbose);
    let args = match cli.command {
        Command::Optimize(args) | Command::Compare(args) => args,
    };
    assert_eq!(args.strategy, Some(SequencingStrategy::TimeWindow));
    assert_eq!(args.boarding_minutes, Some(2));
    assert_eq!(args.request_path, Some(Utf8PathBuf::from("request.json")));
}

#[rstest]
fn unknown_strategies_fail_parsing() {
    let err = Cli::try_parse_from(["shuttle", "optimize", "r.json", "--strategy", "random"])
        .expect_err("unknown strategy");
    assert!(err.to_string().contains("unknown strategy"));
}
