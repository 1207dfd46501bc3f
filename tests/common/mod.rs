//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use custseg::pipeline::{
    ArtifactPaths, DecisionTree, InferenceContext, LinearModel, RandomForest, RegressionModel,
    StandardScaler, TrainingSchema, COLUMNS_FILE, MODEL_FILE, SCALER_FILE,
};
use polars::prelude::*;
use tempfile::TempDir;

/// Training layout used by every fixture: seven numeric fields, a few
/// indicator columns and the customer tenure.
pub fn schema_columns() -> Vec<String> {
    [
        "Income",
        "MntWines",
        "MntFruits",
        "MntMeatProducts",
        "MntFishProducts",
        "MntSweetProducts",
        "MntGoldProds",
        "Education_Graduation",
        "Education_PhD",
        "Marital_Status_Married",
        "Marital_Status_Single",
        "Customer_Tenure",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn schema() -> TrainingSchema {
    TrainingSchema::new(schema_columns()).unwrap()
}

/// Linear model predicting `1 + total spending / 100`
pub fn spending_linear_model() -> RegressionModel {
    let mut coefficients = vec![0.0; schema_columns().len()];
    for c in coefficients.iter_mut().take(7).skip(1) {
        *c = 0.01;
    }
    RegressionModel::Linear(LinearModel {
        coefficients,
        intercept: 1.0,
    })
}

/// One-tree forest: 2 purchases when wine spending <= 500, otherwise 15
pub fn wine_split_forest() -> RegressionModel {
    RegressionModel::RandomForest(RandomForest {
        n_features: schema_columns().len(),
        trees: vec![DecisionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![1, -2, -2],
            threshold: vec![500.0, -2.0, -2.0],
            value: vec![8.5, 2.0, 15.0],
        }],
    })
}

/// Model that predicts the same value for every row
pub fn constant_model(value: f64) -> RegressionModel {
    RegressionModel::Linear(LinearModel {
        coefficients: vec![0.0; schema_columns().len()],
        intercept: value,
    })
}

/// Context over the fixture schema with an identity scaler
pub fn context_with(model: RegressionModel) -> InferenceContext {
    let n = schema_columns().len();
    InferenceContext::new(schema(), StandardScaler::identity(n), Box::new(model)).unwrap()
}

/// Write all three artifacts for `model` into a fresh temporary directory
pub fn write_artifacts(model: &RegressionModel) -> (TempDir, ArtifactPaths) {
    let temp_dir = TempDir::new().unwrap();
    let n = schema_columns().len();
    write_json(&temp_dir.path().join(COLUMNS_FILE), &schema_columns());
    write_json(
        &temp_dir.path().join(SCALER_FILE),
        &StandardScaler::identity(n).with_feature_names(schema_columns()),
    );
    write_json(&temp_dir.path().join(MODEL_FILE), model);
    let paths = ArtifactPaths::from_dir(temp_dir.path());
    (temp_dir, paths)
}

pub fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// A small upload with extra columns and a categorical field
pub fn create_upload_dataframe() -> DataFrame {
    df! {
        "ID" => [1i64, 2, 3, 4],
        "Income" => [30000.0f64, 45000.0, 60000.0, 90000.0],
        "Education" => ["PhD", "Graduation", "Masters", "PhD"],
        "MntWines" => [100.0f64, 800.0, 50.0, 900.0],
        "MntFruits" => [10.0f64, 20.0, 0.0, 40.0],
        "MntMeatProducts" => [50.0f64, 300.0, 20.0, 400.0],
        "MntFishProducts" => [5.0f64, 40.0, 0.0, 60.0],
        "MntSweetProducts" => [0.0f64, 10.0, 5.0, 30.0],
        "MntGoldProds" => [20.0f64, 30.0, 10.0, 70.0],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("customers.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Write raw CSV text into a temporary directory
pub fn create_temp_csv_text(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("customers.csv");
    std::fs::write(&csv_path, contents).unwrap();
    (temp_dir, csv_path)
}
