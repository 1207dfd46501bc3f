//! Feature alignment: one-hot expansion and reindexing to the training columns
//!
//! Alignment is row-local. A record aligns to the same values whether it is
//! submitted alone or as one row of an uploaded batch, so category values that
//! happen to be absent from a batch never shift another row's encoding.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use super::artifacts::TrainingSchema;
use super::record::{RawRecord, RawValue};

/// Separator between a categorical field name and its value in indicator columns
pub const ONE_HOT_SEPARATOR: char = '_';

fn describe_row(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(" (row {})", r + 1),
        None => String::new(),
    }
}

/// Errors raised when a record cannot be aligned to the training columns
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignError {
    #[error("column '{column}' must be numeric but contains '{value}'{}", describe_row(.row))]
    NonNumeric {
        column: String,
        value: String,
        row: Option<usize>,
    },

    #[error("column '{column}' has a missing value{}", describe_row(.row))]
    MissingValue { column: String, row: Option<usize> },

    #[error("column '{column}' contains a non-finite value{}", describe_row(.row))]
    NonFinite { column: String, row: Option<usize> },
}

impl AlignError {
    /// Attach a zero-based batch row index
    pub fn at_row(self, index: usize) -> Self {
        match self {
            AlignError::NonNumeric { column, value, .. } => AlignError::NonNumeric {
                column,
                value,
                row: Some(index),
            },
            AlignError::MissingValue { column, .. } => AlignError::MissingValue {
                column,
                row: Some(index),
            },
            AlignError::NonFinite { column, .. } => AlignError::NonFinite {
                column,
                row: Some(index),
            },
        }
    }
}

/// Column name to numeric value after one-hot expansion
pub type EncodedRecord = BTreeMap<String, f64>;

/// Indicator column name for a categorical value
pub fn indicator_column(field: &str, value: &str) -> String {
    format!("{}{}{}", field, ONE_HOT_SEPARATOR, value)
}

/// Expand categorical fields into indicator columns.
///
/// Numbers keep their field name, a category `v` of field `f` becomes column
/// `f_v` set to 1, and missing values produce no column at all.
pub fn encode_record(record: &RawRecord) -> EncodedRecord {
    let mut encoded = EncodedRecord::new();
    for (name, value) in record.iter() {
        match value {
            RawValue::Number(v) => {
                encoded.insert(name.to_string(), *v);
            }
            RawValue::Category(v) => {
                encoded.insert(indicator_column(name, v), 1.0);
            }
            RawValue::Missing => {}
        }
    }
    encoded
}

/// A record laid out exactly as the training columns, in order
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRecord {
    columns: Arc<[String]>,
    values: Vec<f64>,
}

impl AlignedRecord {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    /// View the aligned values as an encoded record again
    pub fn to_encoded(&self) -> EncodedRecord {
        self.columns
            .iter()
            .cloned()
            .zip(self.values.iter().copied())
            .collect()
    }
}

/// Reindex an encoded record to the schema: absent columns become 0, extras are dropped
pub fn reindex(encoded: &EncodedRecord, schema: &TrainingSchema) -> AlignedRecord {
    let values: Vec<f64> = schema
        .columns()
        .iter()
        .map(|column| encoded.get(column).copied().unwrap_or(0.0))
        .collect();

    if log::log_enabled!(log::Level::Trace) {
        let dropped: Vec<&String> = encoded.keys().filter(|k| !schema.contains(k)).collect();
        if !dropped.is_empty() {
            log::trace!("Dropped columns outside the training layout: {:?}", dropped);
        }
    }

    AlignedRecord {
        columns: schema.shared_columns(),
        values,
    }
}

/// Resolve fields that are themselves training columns into numbers.
///
/// Such fields must hold numeric data. Categorical text that parses as a number
/// is accepted (CSV columns with one bad cell are read as text throughout).
fn normalize_numeric_fields(
    record: &RawRecord,
    schema: &TrainingSchema,
) -> Result<RawRecord, AlignError> {
    let mut normalized = RawRecord::new();
    for (name, value) in record.iter() {
        if !schema.contains(name) {
            normalized.insert(name, value.clone());
            continue;
        }

        let number = match value {
            RawValue::Number(v) => *v,
            RawValue::Category(text) => {
                text.trim()
                    .parse::<f64>()
                    .map_err(|_| AlignError::NonNumeric {
                        column: name.to_string(),
                        value: text.clone(),
                        row: None,
                    })?
            }
            RawValue::Missing => {
                return Err(AlignError::MissingValue {
                    column: name.to_string(),
                    row: None,
                })
            }
        };

        if !number.is_finite() {
            return Err(AlignError::NonFinite {
                column: name.to_string(),
                row: None,
            });
        }
        normalized.insert(name, number);
    }
    Ok(normalized)
}

/// Encode and reindex one raw record
pub fn align_record(record: &RawRecord, schema: &TrainingSchema) -> Result<AlignedRecord, AlignError> {
    let normalized = normalize_numeric_fields(record, schema)?;
    Ok(reindex(&encode_record(&normalized), schema))
}

/// Row-major matrix of aligned records sharing one column layout
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedBatch {
    columns: Arc<[String]>,
    data: Vec<f64>,
    n_rows: usize,
}

impl AlignedBatch {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, index: usize) -> &[f64] {
        let n_cols = self.n_cols();
        &self.data[index * n_cols..(index + 1) * n_cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.n_cols())
    }

    /// Flat row-major storage
    pub fn data(&self) -> &[f64] {
        &self.data
    }
}

/// Align every record of a batch; errors report the offending row
pub fn align_batch(records: &[RawRecord], schema: &TrainingSchema) -> Result<AlignedBatch, AlignError> {
    let mut data = Vec::with_capacity(records.len() * schema.len());
    for (index, record) in records.iter().enumerate() {
        let aligned = align_record(record, schema).map_err(|e| e.at_row(index))?;
        data.extend(aligned.into_values());
    }

    log::debug!(
        "Aligned {} record(s) to {} training columns",
        records.len(),
        schema.len()
    );

    Ok(AlignedBatch {
        columns: schema.shared_columns(),
        data,
        n_rows: records.len(),
    })
}
