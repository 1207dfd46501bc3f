//! Integration tests for aligning records to the training layout

use custseg::pipeline::*;

mod common;

use common::*;

#[test]
fn test_aligned_record_matches_schema_exactly() {
    let schema = schema();
    let record = RawRecord::new()
        .with(INCOME, 40000.0)
        .with(MNT_WINES, 120.0)
        .with(EDUCATION, "PhD")
        .with("Unseen_Field", 99.0);

    let aligned = align_record(&record, &schema).unwrap();

    assert_eq!(aligned.columns(), schema.columns());
    assert_eq!(aligned.values().len(), schema.len());
    assert_eq!(aligned.get("Income"), Some(40000.0));
    assert_eq!(aligned.get("MntWines"), Some(120.0));
    assert_eq!(aligned.get("Education_PhD"), Some(1.0));
    assert_eq!(aligned.get("Education_Graduation"), Some(0.0));
    assert_eq!(aligned.get("Unseen_Field"), None, "extras are dropped");
}

#[test]
fn test_columns_absent_from_input_are_zero() {
    let schema = schema();
    let input = CustomerInput {
        income: 75000.0,
        spending: Spending::default(),
    };

    let aligned = align_record(&input.to_record(), &schema).unwrap();

    for column in ["Education_Graduation", "Education_PhD", "Marital_Status_Single", "Customer_Tenure"] {
        assert_eq!(aligned.get(column), Some(0.0), "{} should default to 0", column);
    }
}

#[test]
fn test_unseen_category_leaves_all_indicators_zero() {
    let schema = schema();
    let record = RawRecord::new().with(INCOME, 1.0).with(EDUCATION, "Basic");

    let aligned = align_record(&record, &schema).unwrap();

    assert_eq!(aligned.get("Education_PhD"), Some(0.0));
    assert_eq!(aligned.get("Education_Graduation"), Some(0.0));
}

#[test]
fn test_reindex_is_idempotent() {
    let schema = schema();
    let record = RawRecord::new()
        .with(INCOME, 52000.0)
        .with(MARITAL_STATUS, "Married")
        .with("ID", 7.0);

    let once = align_record(&record, &schema).unwrap();
    let twice = reindex(&once.to_encoded(), &schema);

    assert_eq!(once, twice);
}

#[test]
fn test_batch_row_matches_single_alignment() {
    let schema = schema();
    let records = vec![
        RawRecord::new().with(INCOME, 10.0).with(EDUCATION, "PhD"),
        RawRecord::new().with(INCOME, 20.0).with(EDUCATION, "Graduation"),
    ];

    let batch = align_batch(&records, &schema).unwrap();

    assert_eq!(batch.n_rows(), 2);
    assert_eq!(batch.n_cols(), schema.len());
    for (i, record) in records.iter().enumerate() {
        let single = align_record(record, &schema).unwrap();
        assert_eq!(batch.row(i), single.values());
    }
}

#[test]
fn test_non_numeric_schema_column_reports_row() {
    let schema = schema();
    let records = vec![
        RawRecord::new().with(INCOME, 10.0),
        RawRecord::new().with(INCOME, "lots"),
    ];

    let err = align_batch(&records, &schema).unwrap_err();

    assert_eq!(
        err,
        AlignError::NonNumeric {
            column: "Income".to_string(),
            value: "lots".to_string(),
            row: Some(1),
        }
    );
    assert_eq!(
        err.to_string(),
        "column 'Income' must be numeric but contains 'lots' (row 2)"
    );
}

#[test]
fn test_missing_schema_value_is_rejected() {
    let schema = schema();
    let record = RawRecord::new().with(MNT_GOLD, RawValue::Missing);

    let err = align_record(&record, &schema).unwrap_err();

    assert!(matches!(err, AlignError::MissingValue { ref column, row: None } if column == "MntGoldProds"));
}

#[test]
fn test_numeric_text_is_accepted_in_schema_column() {
    let schema = schema();
    let record = RawRecord::new().with(INCOME, " 4200.5 ");

    let aligned = align_record(&record, &schema).unwrap();

    assert_eq!(aligned.get("Income"), Some(4200.5));
}

#[test]
fn test_wizard_profile_sets_indicators_and_tenure() {
    let schema = schema();
    let profile = CustomerProfile {
        income: 40000.0,
        education: Education::PhD,
        marital_status: MaritalStatus::Single,
        customer_tenure: 365,
        spending: Spending::default(),
    };

    let aligned = align_record(&profile.to_record(), &schema).unwrap();

    assert_eq!(aligned.get("Education_PhD"), Some(1.0));
    assert_eq!(aligned.get("Marital_Status_Single"), Some(1.0));
    assert_eq!(aligned.get("Marital_Status_Married"), Some(0.0));
    assert_eq!(aligned.get("Customer_Tenure"), Some(365.0));
}
