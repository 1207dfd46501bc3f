//! Tests for reading uploaded CSV files into records

use custseg::pipeline::*;

mod common;

use common::*;

#[test]
fn test_load_upload_reads_header_and_rows() {
    let mut df = create_upload_dataframe();
    let (_temp_dir, path) = create_temp_csv(&mut df);

    let loaded = load_upload(&path, 100).unwrap();

    assert_eq!(loaded.shape(), df.shape());
}

#[test]
fn test_full_scan_schema_inference() {
    let (_temp_dir, path) = create_temp_csv_text("Income,Education\n100,PhD\n200,Master\n");

    let loaded = load_upload(&path, 0).unwrap();

    assert_eq!(loaded.height(), 2);
}

#[test]
fn test_non_csv_upload_rejected() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("customers.xlsx");
    std::fs::write(&path, "not a spreadsheet").unwrap();

    let err = load_upload(&path, 100).unwrap_err();

    assert!(err.to_string().contains("Unsupported upload format"));
}

#[test]
fn test_records_keep_numbers_text_and_gaps() {
    let (_temp_dir, path) = create_temp_csv_text("Income,Education\n100,PhD\n,Graduation\n300,\n");
    let df = load_upload(&path, 100).unwrap();

    let records = records_from_frame(&df).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].get("Income"), Some(&RawValue::Number(100.0)));
    assert_eq!(
        records[0].get("Education"),
        Some(&RawValue::Category("PhD".to_string()))
    );
    assert_eq!(records[1].get("Income"), Some(&RawValue::Missing));
    assert_eq!(records[2].get("Education"), Some(&RawValue::Missing));
}

#[test]
fn test_required_numeric_column_reports_missing_column() {
    let (_temp_dir, path) = create_temp_csv_text("MntWines\n1\n");
    let df = load_upload(&path, 100).unwrap();

    let err = required_numeric_column(&df, "Income").unwrap_err();

    assert!(err.to_string().contains("Column 'Income' not found"));
}

#[test]
fn test_uploaded_rows_align_like_form_records() {
    let ctx = context_with(spending_linear_model());
    let (_temp_dir, path) = create_temp_csv_text(
        "Income,MntWines,MntFruits,MntMeatProducts,MntFishProducts,MntSweetProducts,MntGoldProds\n\
         40000,100,10,50,5,0,20\n",
    );
    let df = load_upload(&path, 100).unwrap();
    let records = records_from_frame(&df).unwrap();

    let form = CustomerInput {
        income: 40000.0,
        spending: Spending {
            wines: 100.0,
            fruits: 10.0,
            meat: 50.0,
            fish: 5.0,
            sweets: 0.0,
            gold: 20.0,
        },
    };

    assert_eq!(
        ctx.prepare(&records[0]).unwrap(),
        ctx.prepare(&form.to_record()).unwrap()
    );
}
