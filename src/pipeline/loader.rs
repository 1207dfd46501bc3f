//! Loader for uploaded customer tables (CSV with a header row)

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::record::{RawRecord, RawValue};
use crate::utils::{create_spinner, finish_with_success};

/// Load an uploaded CSV file into a DataFrame.
///
/// `infer_schema_length` of 0 scans the whole file for type inference.
pub fn load_upload(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension != "csv" {
        anyhow::bail!(
            "Unsupported upload format: '{}'. Upload a .csv file with a header row",
            extension
        );
    }

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(schema_length)
        .finish()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to parse CSV file: {}", path.display()))?;

    log::debug!(
        "Loaded upload {} with shape {:?}",
        path.display(),
        df.shape()
    );
    Ok(df)
}

/// Load an upload behind a spinner, returning the frame with its row and column counts
pub fn load_upload_with_progress(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, usize, usize)> {
    let spinner = create_spinner(&format!("Reading {}...", path.display()));
    let df = load_upload(path, infer_schema_length)?;
    let (rows, cols) = df.shape();
    finish_with_success(&spinner, "Upload loaded");
    Ok((df, rows, cols))
}

/// Raw values of one column, one per row
pub fn column_values(column: &Column) -> Result<Vec<RawValue>> {
    let series = column.as_materialized_series();
    let name = series.name().to_string();
    let dtype = series.dtype();

    if dtype.is_primitive_numeric() || dtype.is_bool() {
        let cast = series
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' could not be read as numbers", name))?;
        return Ok(cast
            .f64()?
            .into_iter()
            .map(|v| v.map_or(RawValue::Missing, RawValue::Number))
            .collect());
    }

    let text = if matches!(dtype, DataType::String) {
        series.clone()
    } else {
        series
            .cast(&DataType::String)
            .with_context(|| format!("Column '{}' could not be read as text", name))?
    };

    Ok(text
        .str()?
        .into_iter()
        .map(|v| v.map_or(RawValue::Missing, |s| RawValue::Category(s.to_string())))
        .collect())
}

/// Convert every row of an uploaded table into a raw record
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<RawRecord>> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut columns = Vec::with_capacity(names.len());
    for column in df.get_columns() {
        columns.push(column_values(column)?);
    }

    let records = (0..df.height())
        .map(|row| {
            names
                .iter()
                .zip(&columns)
                .map(|(name, values)| (name.clone(), values[row].clone()))
                .collect::<RawRecord>()
        })
        .collect();

    Ok(records)
}

/// Numeric values of a required column; every row must hold a number
pub fn required_numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df.column(name).map_err(|_| {
        let available: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        anyhow::anyhow!(
            "Column '{}' not found in upload. Available columns: {:?}",
            name,
            available
        )
    })?;

    column_values(column)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            RawValue::Number(v) => Ok(v),
            RawValue::Category(text) => text.trim().parse::<f64>().map_err(|_| {
                anyhow::anyhow!(
                    "Column '{}' must be numeric but contains '{}' (row {})",
                    name,
                    text,
                    row + 1
                )
            }),
            RawValue::Missing => Err(anyhow::anyhow!(
                "Column '{}' has a missing value (row {})",
                name,
                row + 1
            )),
        })
        .collect()
}
