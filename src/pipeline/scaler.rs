//! Standard scaler applying the per-column affine transform fixed at training time

use serde::{Deserialize, Serialize};

use super::artifacts::{ArtifactError, ArtifactKind, TrainingSchema};

/// Fitted standardization parameters: `(x - mean) / scale` per column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
    /// Column names seen when the scaler was fit, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        let scaler = Self {
            mean,
            scale,
            feature_names: None,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Identity transform over `n` columns
    pub fn identity(n: usize) -> Self {
        Self {
            mean: vec![0.0; n],
            scale: vec![1.0; n],
            feature_names: None,
        }
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    /// Structural checks independent of the training schema
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.mean.len() != self.scale.len() {
            return Err(ArtifactError::invalid(
                ArtifactKind::Scaler,
                format!(
                    "mean has {} entries but scale has {}",
                    self.mean.len(),
                    self.scale.len()
                ),
            ));
        }
        if let Some(i) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(ArtifactError::invalid(
                ArtifactKind::Scaler,
                format!("mean[{}] is not finite", i),
            ));
        }
        if let Some(i) = self.scale.iter().position(|s| !s.is_finite() || *s < 0.0) {
            return Err(ArtifactError::invalid(
                ArtifactKind::Scaler,
                format!("scale[{}] must be finite and non-negative", i),
            ));
        }
        Ok(())
    }

    /// Check the scaler against the training column layout
    pub fn check_schema(&self, schema: &TrainingSchema) -> Result<(), ArtifactError> {
        if self.n_features() != schema.len() {
            return Err(ArtifactError::FeatureCountMismatch {
                kind: ArtifactKind::Scaler,
                expected: schema.len(),
                actual: self.n_features(),
            });
        }
        if let Some(names) = &self.feature_names {
            if names.len() != schema.len() {
                return Err(ArtifactError::FeatureCountMismatch {
                    kind: ArtifactKind::Scaler,
                    expected: schema.len(),
                    actual: names.len(),
                });
            }
            for (position, (found, expected)) in names.iter().zip(schema.columns()).enumerate() {
                if found != expected {
                    return Err(ArtifactError::FeatureNameMismatch {
                        position,
                        expected: expected.clone(),
                        found: found.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Scale one aligned row in place
    pub fn transform_in_place(&self, row: &mut [f64]) {
        for ((x, mean), scale) in row.iter_mut().zip(&self.mean).zip(&self.scale) {
            // Constant training columns were stored with zero scale
            let scale = if *scale == 0.0 { 1.0 } else { *scale };
            *x = (*x - mean) / scale;
        }
    }

    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        let mut scaled = row.to_vec();
        self.transform_in_place(&mut scaled);
        scaled
    }
}
