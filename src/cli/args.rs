//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::pipeline::{
    default_output_path, ArtifactPaths, BatchVariant, CustomerInput, Spending, Thresholds,
    DEFAULT_INCOME_THRESHOLD, DEFAULT_PURCHASE_THRESHOLD,
};

/// custseg - Predict customer web purchases and label income/buying segments
#[derive(Parser, Debug)]
#[command(name = "custseg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Operating mode. Runs the step-by-step wizard when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding model.json, scaler.json and training_columns.json
    #[arg(short, long, default_value = "artifacts", global = true)]
    pub artifacts: PathBuf,

    /// Model artifact path (overrides <ARTIFACTS>/model.json)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Scaler artifact path (overrides <ARTIFACTS>/scaler.json)
    #[arg(long, global = true)]
    pub scaler: Option<PathBuf>,

    /// Training column list path (overrides <ARTIFACTS>/training_columns.json)
    #[arg(long, global = true)]
    pub columns: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false", global = true)]
    pub no_confirm: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict and label a single customer
    Predict(PredictArgs),

    /// Predict and label every row of an uploaded CSV file
    Batch(BatchArgs),

    /// Collect a customer's details step by step, then predict
    Wizard,
}

/// Single-record form fields
#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Yearly household income
    #[arg(long, default_value = "0", value_parser = validate_non_negative)]
    pub income: f64,

    /// Amount spent on wine
    #[arg(long, default_value = "0", value_parser = validate_non_negative)]
    pub wines: f64,

    /// Amount spent on fruits
    #[arg(long, default_value = "0", value_parser = validate_non_negative)]
    pub fruits: f64,

    /// Amount spent on meat products
    #[arg(long, default_value = "0", value_parser = validate_non_negative)]
    pub meat: f64,

    /// Amount spent on fish products
    #[arg(long, default_value = "0", value_parser = validate_non_negative)]
    pub fish: f64,

    /// Amount spent on sweets
    #[arg(long, default_value = "0", value_parser = validate_non_negative)]
    pub sweets: f64,

    /// Amount spent on gold products
    #[arg(long, default_value = "0", value_parser = validate_non_negative)]
    pub gold: f64,

    /// Incomes strictly below this value are labeled "Low Income"
    #[arg(long, default_value_t = DEFAULT_INCOME_THRESHOLD)]
    pub income_threshold: f64,

    /// Predicted purchases strictly above this value are labeled "High Buy"
    #[arg(long, default_value_t = DEFAULT_PURCHASE_THRESHOLD)]
    pub purchase_threshold: f64,

    /// Prompt for each field instead of reading flags
    #[arg(long, default_value = "false")]
    pub interactive: bool,
}

impl PredictArgs {
    pub fn customer(&self) -> CustomerInput {
        CustomerInput {
            income: self.income,
            spending: Spending {
                wines: self.wines,
                fruits: self.fruits,
                meat: self.meat,
                fish: self.fish,
                sweets: self.sweets,
                gold: self.gold,
            },
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.income_threshold, self.purchase_threshold)
    }
}

/// Bulk upload options
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Uploaded CSV file (first row is the header)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV path.
    /// Defaults to the upload's directory with the variant's fixed file name
    /// (labeled_predictions.csv or predictions.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output variant: "labeled" (median-threshold categories) or "predictions" (rounded predictions only)
    #[arg(long, default_value = "labeled")]
    pub variant: BatchVariant,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Maximum number of result rows printed to the terminal
    #[arg(long, default_value = "20")]
    pub show_rows: usize,

    /// Also write a JSON run summary to this path
    #[arg(long)]
    pub summary_json: Option<PathBuf>,
}

impl BatchArgs {
    /// Output path, defaulting to the variant's fixed file name next to the upload
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input, self.variant))
    }
}

impl Cli {
    /// Artifact locations after applying per-file overrides
    pub fn artifact_paths(&self) -> ArtifactPaths {
        let defaults = ArtifactPaths::from_dir(&self.artifacts);
        ArtifactPaths {
            model: self.model.clone().unwrap_or(defaults.model),
            scaler: self.scaler.clone().unwrap_or(defaults.scaler),
            columns: self.columns.clone().unwrap_or(defaults.columns),
        }
    }

    pub fn artifacts_dir(&self) -> &Path {
        &self.artifacts
    }

    /// Default log filter for env_logger
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Validator for amounts and income: finite and not negative
fn validate_non_negative(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !value.is_finite() || value < 0.0 {
        Err(format!("value must be a finite number >= 0, got {}", value))
    } else {
        Ok(value)
    }
}
