//! Immutable inference context: schema, scaler and model loaded once per process

use rayon::prelude::*;

use super::align::{align_batch, align_record, AlignError, AlignedRecord};
use super::artifacts::{
    load_schema, read_json, ArtifactError, ArtifactKind, ArtifactPaths, TrainingSchema,
};
use super::labeler::{label_with, Category, Thresholds};
use super::model::{RegressionModel, Regressor};
use super::record::{CustomerRecord, RawRecord};
use super::scaler::StandardScaler;

/// Everything needed to turn raw records into predictions
#[derive(Debug)]
pub struct InferenceContext {
    schema: TrainingSchema,
    scaler: StandardScaler,
    model: Box<dyn Regressor>,
}

impl InferenceContext {
    /// Build a context from already-constructed parts, checking they agree
    pub fn new(
        schema: TrainingSchema,
        scaler: StandardScaler,
        model: Box<dyn Regressor>,
    ) -> Result<Self, ArtifactError> {
        scaler.validate()?;
        scaler.check_schema(&schema)?;
        model.validate()?;

        if model.n_features() != schema.len() {
            return Err(ArtifactError::FeatureCountMismatch {
                kind: ArtifactKind::Model,
                expected: schema.len(),
                actual: model.n_features(),
            });
        }

        Ok(Self {
            schema,
            scaler,
            model,
        })
    }

    /// Load all three artifacts. Any failure leaves no usable context.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let schema = load_schema(&paths.columns)?;

        let scaler: StandardScaler = read_json(&paths.scaler, ArtifactKind::Scaler)?;
        log::debug!(
            "Loaded scaler with {} features from {}",
            scaler.n_features(),
            paths.scaler.display()
        );

        let model: RegressionModel = read_json(&paths.model, ArtifactKind::Model)?;
        log::debug!(
            "Loaded {} from {}",
            model.describe(),
            paths.model.display()
        );

        Self::new(schema, scaler, Box::new(model))
    }

    pub fn schema(&self) -> &TrainingSchema {
        &self.schema
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn model(&self) -> &dyn Regressor {
        self.model.as_ref()
    }

    /// Align a record to the training layout
    pub fn align(&self, record: &RawRecord) -> Result<AlignedRecord, AlignError> {
        align_record(record, &self.schema)
    }

    /// Align and scale a record into the model's input row
    pub fn prepare(&self, record: &RawRecord) -> Result<Vec<f64>, AlignError> {
        let mut row = self.align(record)?.into_values();
        self.scaler.transform_in_place(&mut row);
        Ok(row)
    }

    pub fn predict_record(&self, record: &RawRecord) -> Result<f64, AlignError> {
        let row = self.prepare(record)?;
        Ok(self.model.predict_row(&row))
    }

    /// Predict every record, preserving input order
    pub fn predict_batch(&self, records: &[RawRecord]) -> Result<Vec<f64>, AlignError> {
        let batch = align_batch(records, &self.schema)?;
        let n_cols = batch.n_cols();

        let predictions = batch
            .data()
            .par_chunks(n_cols)
            .map(|row| {
                let scaled = self.scaler.transform_row(row);
                self.model.predict_row(&scaled)
            })
            .collect();

        Ok(predictions)
    }
}

/// Numeric prediction and segment for one customer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinglePrediction {
    pub prediction: f64,
    pub category: Category,
}

/// Predict and label one customer under fixed thresholds
pub fn predict_single<R: CustomerRecord>(
    ctx: &InferenceContext,
    customer: &R,
    thresholds: &Thresholds,
) -> Result<SinglePrediction, AlignError> {
    let prediction = ctx.predict_record(&customer.to_record())?;
    Ok(SinglePrediction {
        prediction,
        category: label_with(customer.income(), prediction, thresholds),
    })
}
