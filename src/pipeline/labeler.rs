//! Income/purchase segment labeling
//!
//! Every customer falls into one of four segments from two comparisons:
//! income strictly below the income threshold is "Low Income", and a predicted
//! purchase count strictly above the purchase threshold is "High Buy".

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_INCOME_THRESHOLD: f64 = 50_000.0;
pub const DEFAULT_PURCHASE_THRESHOLD: f64 = 10.0;

/// Customer segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Low Income, High Buy")]
    LowIncomeHighBuy,
    #[serde(rename = "Low Income, Low Buy")]
    LowIncomeLowBuy,
    #[serde(rename = "High Income, High Buy")]
    HighIncomeHighBuy,
    #[serde(rename = "High Income, Low Buy")]
    HighIncomeLowBuy,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::LowIncomeHighBuy,
        Category::LowIncomeLowBuy,
        Category::HighIncomeHighBuy,
        Category::HighIncomeLowBuy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::LowIncomeHighBuy => "Low Income, High Buy",
            Category::LowIncomeLowBuy => "Low Income, Low Buy",
            Category::HighIncomeHighBuy => "High Income, High Buy",
            Category::HighIncomeLowBuy => "High Income, Low Buy",
        }
    }

    pub fn is_low_income(&self) -> bool {
        matches!(self, Category::LowIncomeHighBuy | Category::LowIncomeLowBuy)
    }

    pub fn is_high_buy(&self) -> bool {
        matches!(self, Category::LowIncomeHighBuy | Category::HighIncomeHighBuy)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pair of thresholds used by the labeler
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub income: f64,
    pub purchase: f64,
}

impl Thresholds {
    pub fn new(income: f64, purchase: f64) -> Self {
        Self { income, purchase }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            income: DEFAULT_INCOME_THRESHOLD,
            purchase: DEFAULT_PURCHASE_THRESHOLD,
        }
    }
}

/// How thresholds are chosen for a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdPolicy {
    /// Constant thresholds (single-record and wizard modes)
    Fixed(Thresholds),
    /// Medians of the current batch's income and predicted values
    BatchMedian,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelError {
    #[error("cannot compute median thresholds: {0} has no numeric values")]
    EmptyColumn(&'static str),

    #[error("{incomes} income value(s) but {predictions} prediction(s)")]
    LengthMismatch { incomes: usize, predictions: usize },
}

impl ThresholdPolicy {
    /// Thresholds for a batch of incomes and predictions
    pub fn resolve(&self, incomes: &[f64], predictions: &[f64]) -> Result<Thresholds, LabelError> {
        match self {
            ThresholdPolicy::Fixed(thresholds) => Ok(*thresholds),
            ThresholdPolicy::BatchMedian => {
                let income = median(incomes).ok_or(LabelError::EmptyColumn("income"))?;
                let purchase =
                    median(predictions).ok_or(LabelError::EmptyColumn("prediction"))?;
                log::debug!(
                    "Batch median thresholds: income={}, purchase={}",
                    income,
                    purchase
                );
                Ok(Thresholds::new(income, purchase))
            }
        }
    }
}

/// Assign the segment for one customer
pub fn label(income: f64, predicted: f64, income_threshold: f64, purchase_threshold: f64) -> Category {
    let low_income = income < income_threshold;
    let high_buy = predicted > purchase_threshold;
    match (low_income, high_buy) {
        (true, true) => Category::LowIncomeHighBuy,
        (true, false) => Category::LowIncomeLowBuy,
        (false, true) => Category::HighIncomeHighBuy,
        (false, false) => Category::HighIncomeLowBuy,
    }
}

pub fn label_with(income: f64, predicted: f64, thresholds: &Thresholds) -> Category {
    label(income, predicted, thresholds.income, thresholds.purchase)
}

/// Label a batch under a threshold policy, returning the thresholds used
pub fn label_batch(
    incomes: &[f64],
    predictions: &[f64],
    policy: &ThresholdPolicy,
) -> Result<(Thresholds, Vec<Category>), LabelError> {
    if incomes.len() != predictions.len() {
        return Err(LabelError::LengthMismatch {
            incomes: incomes.len(),
            predictions: predictions.len(),
        });
    }

    let thresholds = policy.resolve(incomes, predictions)?;
    let categories = incomes
        .iter()
        .zip(predictions)
        .map(|(income, predicted)| label_with(*income, *predicted, &thresholds))
        .collect();

    Ok((thresholds, categories))
}

/// Quantile with linear interpolation between closest ranks, ignoring NaN
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}
