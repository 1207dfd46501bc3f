//! Integration tests for bulk upload prediction

use custseg::pipeline::*;
use polars::prelude::*;

mod common;

use common::*;

fn string_column(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap().to_string())
        .collect()
}

#[test]
fn test_labeled_batch_uses_median_thresholds() {
    let ctx = context_with(wine_split_forest());
    let df = create_upload_dataframe();

    let outcome = run_batch(&ctx, &df, BatchVariant::Labeled).unwrap();

    assert_eq!(outcome.predictions, vec![2.0, 15.0, 2.0, 15.0]);
    let labels = outcome.labels.as_ref().unwrap();
    assert_eq!(labels.thresholds, Thresholds::new(52500.0, 8.5));
    assert_eq!(
        labels.categories,
        vec![
            Category::LowIncomeLowBuy,
            Category::LowIncomeHighBuy,
            Category::HighIncomeLowBuy,
            Category::HighIncomeHighBuy,
        ]
    );
}

#[test]
fn test_labeled_output_keeps_original_columns() {
    let ctx = context_with(wine_split_forest());
    let df = create_upload_dataframe();

    let outcome = run_batch(&ctx, &df, BatchVariant::Labeled).unwrap();

    assert_eq!(outcome.frame.width(), df.width() + 2);
    assert!(outcome.frame.column("ID").is_ok());
    assert!(outcome.frame.column("Education").is_ok());
    assert_eq!(
        string_column(&outcome.frame, CATEGORY_COLUMN)[1],
        "Low Income, High Buy"
    );

    let display = outcome.display_frame().unwrap();
    let names: Vec<String> = display
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names, vec![INCOME, PREDICTION_COLUMN, CATEGORY_COLUMN]);
}

#[test]
fn test_constant_model_labels_every_row_low_buy() {
    let ctx = context_with(constant_model(7.0));
    let df = create_upload_dataframe();

    let outcome = run_batch(&ctx, &df, BatchVariant::Labeled).unwrap();

    let labels = outcome.labels.unwrap();
    assert!(labels.categories.iter().all(|c| !c.is_high_buy()));
}

#[test]
fn test_batch_matches_single_record_predictions() {
    let ctx = context_with(spending_linear_model());
    let df = create_upload_dataframe();

    let outcome = run_batch(&ctx, &df, BatchVariant::Labeled).unwrap();

    let records = records_from_frame(&df).unwrap();
    for (record, batch_prediction) in records.iter().zip(&outcome.predictions) {
        let single = ctx.predict_record(record).unwrap();
        assert!((single - batch_prediction).abs() < 1e-12);
    }
}

#[test]
fn test_predictions_variant_rounds_half_to_even() {
    let df = create_upload_dataframe();

    let outcome = run_batch(&context_with(constant_model(2.5)), &df, BatchVariant::Predictions).unwrap();
    assert!(outcome.labels.is_none());
    assert!(outcome.predictions.iter().all(|p| *p == 2.0));
    assert!(outcome.frame.column(CATEGORY_COLUMN).is_err());

    let outcome = run_batch(&context_with(constant_model(3.5)), &df, BatchVariant::Predictions).unwrap();
    assert!(outcome.predictions.iter().all(|p| *p == 4.0));
}

#[test]
fn test_predictions_variant_does_not_need_income() {
    let ctx = context_with(wine_split_forest());
    let df = df! {
        "MntWines" => [100.0f64, 900.0],
    }
    .unwrap();

    let outcome = run_batch(&ctx, &df, BatchVariant::Predictions).unwrap();

    assert_eq!(outcome.predictions, vec![2.0, 15.0]);
}

#[test]
fn test_labeled_batch_requires_income() {
    let ctx = context_with(wine_split_forest());
    let df = df! {
        "MntWines" => [100.0f64, 900.0],
    }
    .unwrap();

    let err = run_batch(&ctx, &df, BatchVariant::Labeled).unwrap_err();

    assert!(err.to_string().contains("Income"));
}

#[test]
fn test_empty_upload_is_rejected() {
    let ctx = context_with(wine_split_forest());
    let (_temp_dir, path) = create_temp_csv_text("Income,MntWines\n");
    let df = load_upload(&path, 100).unwrap();

    let err = run_batch(&ctx, &df, BatchVariant::Labeled).unwrap_err();

    assert!(err.to_string().contains("no data rows"));
}

#[test]
fn test_non_numeric_value_names_column_and_row() {
    let ctx = context_with(wine_split_forest());
    let (_temp_dir, path) = create_temp_csv_text("Income,MntWines\n1000,5\n2000,plenty\n");
    let df = load_upload(&path, 100).unwrap();

    let err = run_batch(&ctx, &df, BatchVariant::Labeled).unwrap_err();
    let message = format!("{:#}", err);

    assert!(message.contains("MntWines"), "{}", message);
    assert!(message.contains("row 2"), "{}", message);
}

#[test]
fn test_missing_income_value_is_rejected() {
    let ctx = context_with(wine_split_forest());
    let (_temp_dir, path) = create_temp_csv_text("Income,MntWines\n1000,5\n,7\n");
    let df = load_upload(&path, 100).unwrap();

    let err = run_batch(&ctx, &df, BatchVariant::Labeled).unwrap_err();

    assert!(err.to_string().contains("Income"));
    assert!(err.to_string().contains("row 2"));
}

#[test]
fn test_category_counts_cover_every_row() {
    let ctx = context_with(wine_split_forest());
    let df = create_upload_dataframe();

    let outcome = run_batch(&ctx, &df, BatchVariant::Labeled).unwrap();
    let total: usize = outcome.category_counts().iter().map(|(_, n)| n).sum();

    assert_eq!(total, outcome.row_count());
}

#[test]
fn test_write_and_default_output_names() {
    let ctx = context_with(wine_split_forest());
    let mut df = create_upload_dataframe();
    let (temp_dir, input) = create_temp_csv(&mut df);

    let output = default_output_path(&input, BatchVariant::Labeled);
    assert_eq!(output, temp_dir.path().join("labeled_predictions.csv"));
    assert_eq!(
        default_output_path(&input, BatchVariant::Predictions),
        temp_dir.path().join("predictions.csv")
    );

    let uploaded = load_upload(&input, 100).unwrap();
    let mut outcome = run_batch(&ctx, &uploaded, BatchVariant::Labeled).unwrap();
    write_csv(&mut outcome.frame, &output).unwrap();

    let written = load_upload(&output, 100).unwrap();
    assert_eq!(written.height(), 4);
    assert_eq!(
        string_column(&written, CATEGORY_COLUMN),
        vec![
            "Low Income, Low Buy",
            "Low Income, High Buy",
            "High Income, Low Buy",
            "High Income, High Buy",
        ]
    );
}
