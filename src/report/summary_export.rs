//! JSON export of a batch run summary

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{BatchOutcome, Category, Thresholds};

/// Metadata about the run
#[derive(Debug, Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub custseg_version: String,
    pub input_file: String,
    pub output_file: String,
    pub variant: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Complete run summary
#[derive(Debug, Serialize)]
pub struct RunSummaryExport {
    pub metadata: RunMetadata,
    pub rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Thresholds>,
    pub mean_prediction: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryCount>,
}

/// Paths and model description recorded with a summary
pub struct ExportParams<'a> {
    pub input_file: &'a Path,
    pub output_file: &'a Path,
    pub model: &'a str,
}

impl RunSummaryExport {
    pub fn new(outcome: &BatchOutcome, params: &ExportParams<'_>) -> Self {
        let rows = outcome.row_count();
        let mean_prediction = if rows > 0 {
            outcome.predictions.iter().sum::<f64>() / rows as f64
        } else {
            0.0
        };

        Self {
            metadata: RunMetadata {
                timestamp: Utc::now().to_rfc3339(),
                custseg_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: params.input_file.display().to_string(),
                output_file: params.output_file.display().to_string(),
                variant: outcome.variant.as_str().to_string(),
                model: params.model.to_string(),
            },
            rows,
            thresholds: outcome.labels.as_ref().map(|l| l.thresholds),
            mean_prediction,
            categories: outcome
                .category_counts()
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
        }
    }
}

/// Write the run summary as pretty-printed JSON
pub fn export_run_summary(
    outcome: &BatchOutcome,
    params: &ExportParams<'_>,
    path: &Path,
) -> Result<()> {
    let export = RunSummaryExport::new(outcome, params);
    let json = serde_json::to_string_pretty(&export).context("Failed to serialize run summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write run summary: {}", path.display()))?;
    Ok(())
}
