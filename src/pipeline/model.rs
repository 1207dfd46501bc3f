//! Regression models used as the prediction oracle
//!
//! The pipeline only needs "scaled feature row in, one number out", expressed
//! by the [`Regressor`] trait. Two serialized model kinds are supported:
//! a random forest of array-encoded regression trees, and a linear model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::artifacts::{ArtifactError, ArtifactKind};

/// Child index marking a leaf node
const LEAF: i64 = -1;

/// Maps a scaled feature row to a predicted purchase count
pub trait Regressor: Send + Sync + fmt::Debug {
    /// Number of features expected per row
    fn n_features(&self) -> usize;

    /// Predict for a single scaled row of length `n_features()`
    fn predict_row(&self, features: &[f64]) -> f64;

    /// Short human-readable description for status output
    fn describe(&self) -> String;

    /// Structural checks that make `predict_row` safe on rows of `n_features()`
    fn validate(&self) -> Result<(), ArtifactError>;
}

/// A single regression tree in flattened array layout.
///
/// Node `i` is a leaf when `children_left[i] == -1`; otherwise rows go left when
/// `x[feature[i]] <= threshold[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.value.len()
    }

    /// Check array lengths, child links and feature indices
    pub fn validate(&self, n_features: usize) -> Result<(), ArtifactError> {
        let n = self.value.len();
        if n == 0 {
            return Err(ArtifactError::invalid(ArtifactKind::Model, "tree has no nodes"));
        }
        if self.children_left.len() != n
            || self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
        {
            return Err(ArtifactError::invalid(
                ArtifactKind::Model,
                "tree node arrays have different lengths",
            ));
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];
            if left == LEAF {
                if right != LEAF {
                    return Err(ArtifactError::invalid(
                        ArtifactKind::Model,
                        format!("node {} has a right child but no left child", node),
                    ));
                }
                continue;
            }

            // Children always come after their parent, which rules out cycles
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(ArtifactError::invalid(
                        ArtifactKind::Model,
                        format!("node {} links to invalid child {}", node, child),
                    ));
                }
            }

            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(ArtifactError::invalid(
                    ArtifactKind::Model,
                    format!(
                        "node {} splits on feature {} (model has {} features)",
                        node, feature, n_features
                    ),
                ));
            }
        }

        Ok(())
    }

    pub fn predict_row(&self, features: &[f64]) -> f64 {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left == LEAF {
                return self.value[node];
            }
            // Splits were learned on single-precision inputs
            let x = features[self.feature[node] as usize] as f32 as f64;
            node = if x <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

/// Averaging ensemble of regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl Regressor for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_row(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict_row(features)).sum();
        total / self.trees.len() as f64
    }

    fn describe(&self) -> String {
        format!("random forest ({} trees)", self.trees.len())
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::invalid(ArtifactKind::Model, "forest has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features).map_err(|e| match e {
                ArtifactError::Invalid { kind, message } => ArtifactError::Invalid {
                    kind,
                    message: format!("tree {}: {}", i, message),
                },
                other => other,
            })?;
        }
        Ok(())
    }
}

/// `intercept + coefficients · x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl Regressor for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }

    fn describe(&self) -> String {
        "linear regression".to_string()
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        if self.coefficients.iter().any(|c| !c.is_finite()) || !self.intercept.is_finite() {
            return Err(ArtifactError::invalid(
                ArtifactKind::Model,
                "linear model parameters must be finite",
            ));
        }
        Ok(())
    }
}

/// Serialized model artifact, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    RandomForest(RandomForest),
    Linear(LinearModel),
}

impl Regressor for RegressionModel {
    fn n_features(&self) -> usize {
        match self {
            RegressionModel::RandomForest(forest) => forest.n_features(),
            RegressionModel::Linear(linear) => linear.n_features(),
        }
    }

    fn predict_row(&self, features: &[f64]) -> f64 {
        match self {
            RegressionModel::RandomForest(forest) => forest.predict_row(features),
            RegressionModel::Linear(linear) => linear.predict_row(features),
        }
    }

    fn describe(&self) -> String {
        match self {
            RegressionModel::RandomForest(forest) => forest.describe(),
            RegressionModel::Linear(linear) => linear.describe(),
        }
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        match self {
            RegressionModel::RandomForest(forest) => forest.validate(),
            RegressionModel::Linear(linear) => linear.validate(),
        }
    }
}
