//! Bulk prediction over an uploaded table

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::context::InferenceContext;
use super::labeler::{label_batch, Category, ThresholdPolicy, Thresholds};
use super::loader::{records_from_frame, required_numeric_column};
use super::record::INCOME;

pub const PREDICTION_COLUMN: &str = "Predicted NumWebPurchases";
pub const CATEGORY_COLUMN: &str = "Category";

/// Output flavour of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchVariant {
    /// Raw predictions labeled against the batch medians
    #[default]
    Labeled,
    /// Predictions rounded to whole purchases, no labels
    Predictions,
}

impl BatchVariant {
    /// Fixed file name of the downloadable result
    pub fn default_file_name(&self) -> &'static str {
        match self {
            BatchVariant::Labeled => "labeled_predictions.csv",
            BatchVariant::Predictions => "predictions.csv",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchVariant::Labeled => "labeled",
            BatchVariant::Predictions => "predictions",
        }
    }
}

impl FromStr for BatchVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "labeled" | "labelled" => Ok(BatchVariant::Labeled),
            "predictions" | "plain" => Ok(BatchVariant::Predictions),
            _ => Err(format!(
                "Unknown batch variant: {}. Use labeled or predictions.",
                s
            )),
        }
    }
}

/// Result of a batch run
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub variant: BatchVariant,
    /// Uploaded columns plus the prediction column (and category column when labeled)
    pub frame: DataFrame,
    pub predictions: Vec<f64>,
    /// Present for the labeled variant only
    pub labels: Option<BatchLabels>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchLabels {
    pub incomes: Vec<f64>,
    pub categories: Vec<Category>,
    pub thresholds: Thresholds,
}

impl BatchOutcome {
    pub fn row_count(&self) -> usize {
        self.predictions.len()
    }

    /// Number of rows per category, in the fixed category order
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        let Some(labels) = &self.labels else {
            return Vec::new();
        };
        Category::ALL
            .iter()
            .map(|c| (*c, labels.categories.iter().filter(|x| *x == c).count()))
            .collect()
    }

    /// Columns shown on screen: income, prediction and category, or just the prediction
    pub fn display_frame(&self) -> Result<DataFrame> {
        let columns: Vec<&str> = match self.variant {
            BatchVariant::Labeled => vec![INCOME, PREDICTION_COLUMN, CATEGORY_COLUMN],
            BatchVariant::Predictions => vec![PREDICTION_COLUMN],
        };
        Ok(self.frame.select(columns)?)
    }
}

/// Predict every row of an uploaded table.
///
/// The labeled variant needs an `Income` column and labels rows against the
/// batch medians of income and predicted purchases.
pub fn run_batch(ctx: &InferenceContext, df: &DataFrame, variant: BatchVariant) -> Result<BatchOutcome> {
    if df.height() == 0 {
        anyhow::bail!("Uploaded file contains no data rows");
    }

    // Validate the income column before predicting so errors surface early
    let incomes = match variant {
        BatchVariant::Labeled => Some(required_numeric_column(df, INCOME)?),
        BatchVariant::Predictions => None,
    };

    let records = records_from_frame(df)?;
    let predictions = ctx
        .predict_batch(&records)
        .context("Uploaded data does not match the model's inputs")?;

    let mut frame = df.clone();
    let (predictions, labels) = match incomes {
        Some(incomes) => {
            let (thresholds, categories) =
                label_batch(&incomes, &predictions, &ThresholdPolicy::BatchMedian)?;

            frame.with_column(Column::new(PREDICTION_COLUMN.into(), predictions.clone()))?;
            let names: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
            frame.with_column(Column::new(CATEGORY_COLUMN.into(), names))?;

            let labels = BatchLabels {
                incomes,
                categories,
                thresholds,
            };
            (predictions, Some(labels))
        }
        None => {
            let rounded: Vec<f64> = predictions.iter().map(|p| p.round_ties_even()).collect();
            frame.with_column(Column::new(PREDICTION_COLUMN.into(), rounded.clone()))?;
            (rounded, None)
        }
    };

    Ok(BatchOutcome {
        variant,
        frame,
        predictions,
        labels,
    })
}

/// Default result location: the variant's fixed file name next to the upload
pub fn default_output_path(input: &Path, variant: BatchVariant) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    parent.join(variant.default_file_name())
}

/// Write a result table as CSV
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    Ok(())
}
