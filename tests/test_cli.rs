//! Tests for CLI argument parsing and the predict/batch commands

use std::path::PathBuf;

use assert_cmd::Command;
use clap::Parser;
use custseg::cli::{Cli, Commands};
use custseg::pipeline::{BatchVariant, Thresholds};
use predicates::prelude::*;

mod common;

use common::*;

#[test]
fn test_cli_defaults_to_wizard() {
    let cli = Cli::parse_from(["custseg"]);

    assert!(cli.command.is_none());
    assert_eq!(cli.artifacts, PathBuf::from("artifacts"));
    assert!(!cli.no_confirm);
    assert_eq!(cli.log_level(), "warn");
}

#[test]
fn test_artifact_overrides() {
    let cli = Cli::parse_from([
        "custseg",
        "--artifacts",
        "/models",
        "--scaler",
        "/other/scaler.json",
        "wizard",
    ]);

    let paths = cli.artifact_paths();
    assert_eq!(paths.model, PathBuf::from("/models/model.json"));
    assert_eq!(paths.scaler, PathBuf::from("/other/scaler.json"));
    assert_eq!(paths.columns, PathBuf::from("/models/training_columns.json"));
}

#[test]
fn test_predict_defaults() {
    let cli = Cli::parse_from(["custseg", "predict", "--income", "42000", "--wines", "12.5"]);

    let Some(Commands::Predict(args)) = cli.command else {
        panic!("expected predict command");
    };
    let customer = args.customer();
    assert_eq!(customer.income, 42000.0);
    assert_eq!(customer.spending.wines, 12.5);
    assert_eq!(customer.spending.gold, 0.0);
    assert_eq!(args.thresholds(), Thresholds::default());
    assert!(!args.interactive);
}

#[test]
fn test_predict_rejects_negative_amounts() {
    let result = Cli::try_parse_from(["custseg", "predict", "--fish", "-3"]);
    assert!(result.is_err());
}

#[test]
fn test_batch_output_defaults_next_to_input() {
    let cli = Cli::parse_from(["custseg", "batch", "-i", "/data/customers.csv"]);

    let Some(Commands::Batch(args)) = cli.command else {
        panic!("expected batch command");
    };
    assert_eq!(args.variant, BatchVariant::Labeled);
    assert_eq!(args.infer_schema_length, 10000);
    assert_eq!(args.output_path(), PathBuf::from("/data/labeled_predictions.csv"));
}

#[test]
fn test_batch_predictions_variant_file_name() {
    let cli = Cli::parse_from([
        "custseg",
        "batch",
        "-i",
        "/data/customers.csv",
        "--variant",
        "predictions",
    ]);

    let Some(Commands::Batch(args)) = cli.command else {
        panic!("expected batch command");
    };
    assert_eq!(args.output_path(), PathBuf::from("/data/predictions.csv"));
}

#[test]
fn test_predict_command_prints_result_lines() {
    let (_temp_dir, paths) = write_artifacts(&wine_split_forest());

    Command::cargo_bin("custseg")
        .unwrap()
        .args(["--model", paths.model.to_str().unwrap()])
        .args(["--scaler", paths.scaler.to_str().unwrap()])
        .args(["--columns", paths.columns.to_str().unwrap()])
        .args(["predict", "--income", "40000", "--wines", "900"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Predicted NumWebPurchases: 15.00"))
        .stdout(predicate::str::contains("Category: Low Income, High Buy"));
}

#[test]
fn test_predict_without_artifacts_fails() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    Command::cargo_bin("custseg")
        .unwrap()
        .args(["--artifacts", temp_dir.path().to_str().unwrap()])
        .args(["predict", "--income", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Predicted").not());
}

#[test]
fn test_batch_command_writes_labeled_csv_and_summary() {
    let (artifact_dir, _paths) = write_artifacts(&wine_split_forest());
    let mut df = create_upload_dataframe();
    let (data_dir, input) = create_temp_csv(&mut df);
    let summary = data_dir.path().join("summary.json");

    Command::cargo_bin("custseg")
        .unwrap()
        .args(["--artifacts", artifact_dir.path().to_str().unwrap(), "--no-confirm"])
        .args(["batch", "-i", input.to_str().unwrap()])
        .args(["--summary-json", summary.to_str().unwrap()])
        .assert()
        .success();

    let output = data_dir.path().join("labeled_predictions.csv");
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.lines().next().unwrap().ends_with("Predicted NumWebPurchases,Category"));
    assert_eq!(written.lines().count(), 5);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(json["rows"], 4);
    assert_eq!(json["metadata"]["variant"], "labeled");
    assert_eq!(json["thresholds"]["income"], 52500.0);
}

#[test]
fn test_batch_command_reports_malformed_upload() {
    let (artifact_dir, _paths) = write_artifacts(&wine_split_forest());
    let (data_dir, input) = create_temp_csv_text("MntWines\n10\n");

    Command::cargo_bin("custseg")
        .unwrap()
        .args(["--artifacts", artifact_dir.path().to_str().unwrap(), "--no-confirm"])
        .args(["batch", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Income"));

    assert!(!data_dir.path().join("labeled_predictions.csv").exists());
}
