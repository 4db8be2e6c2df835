//! Integration tests for a full train/test processing run

use hotelprep::pipeline::*;
use polars::prelude::*;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn setup_run(dir: &TempDir, train: &mut DataFrame, test: &mut DataFrame) -> DataProcessor {
    let train_path = dir.path().join("train.csv");
    let test_path = dir.path().join("test.csv");
    write_csv(train, &train_path);
    write_csv(test, &test_path);

    let config_path = write_config(dir.path(), &booking_config(5.0));
    DataProcessor::new(train_path, test_path, dir.path().join("processed"), &config_path).unwrap()
}

#[test]
fn test_process_writes_balanced_splits() {
    let dir = TempDir::new().unwrap();
    let mut train = create_booking_dataframe(100, 20);
    let mut test = create_booking_dataframe(40, 10);
    let processor = setup_run(&dir, &mut train, &mut test);

    let summary = processor.process(OutputFormat::Csv, 10000).unwrap();

    let train_out = dir.path().join("processed").join("processed_train.csv");
    let test_out = dir.path().join("processed").join("processed_test.csv");
    assert!(train_out.exists());
    assert!(test_out.exists());
    assert_eq!(summary.train.output, train_out);

    let train_df = load_dataset(&train_out, 10000).unwrap();
    assert_missing_columns(&train_df, &["Unnamed: 0", "Booking_ID"]);
    let counts = class_counts(&train_df, "booking_status");
    assert_eq!(counts.values().copied().collect::<Vec<_>>(), vec![80, 80]);

    assert_eq!(summary.train.rows_loaded, 100);
    assert_eq!(summary.train.rows_balanced, 160);
    assert_eq!(summary.train.synthetic_rows(), 60);
    assert_eq!(summary.test.rows_balanced, 60);
    assert!(summary.diverging_mappings.is_empty());
}

#[test]
fn test_process_parquet_output() {
    let dir = TempDir::new().unwrap();
    let mut train = create_booking_dataframe(50, 10);
    let mut test = create_booking_dataframe(30, 8);
    let processor = setup_run(&dir, &mut train, &mut test);

    processor.process(OutputFormat::Parquet, 10000).unwrap();

    let test_df = load_dataset(
        &dir.path().join("processed").join("processed_test.parquet"),
        10000,
    )
    .unwrap();
    assert_eq!(test_df.height(), 44);
}

#[test]
fn test_process_flags_diverging_mappings() {
    let dir = TempDir::new().unwrap();
    let mut train = create_booking_dataframe(60, 12);
    // Test split only ever sees the first two meal plans
    let mut test = create_booking_dataframe(40, 10);
    let meal: Vec<&str> = (0..40).map(|i| MEAL_PLANS[i % 2]).collect();
    test.with_column(Column::new("type_of_meal_plan".into(), meal)).unwrap();
    let processor = setup_run(&dir, &mut train, &mut test);

    let summary = processor.process(OutputFormat::Csv, 10000).unwrap();

    assert_eq!(summary.diverging_mappings, vec!["type_of_meal_plan".to_string()]);

    let processed = dir.path().join("processed");
    let train_df = load_dataset(&processed.join("processed_train.csv"), 10000).unwrap();
    let test_df = load_dataset(&processed.join("processed_test.csv"), 10000).unwrap();
    assert_eq!(train_df.width(), test_df.width());
}

#[test]
fn test_process_reports_missing_input() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), &booking_config(5.0));
    let processor = DataProcessor::new(
        dir.path().join("nope_train.csv"),
        dir.path().join("nope_test.csv"),
        dir.path().join("processed"),
        &config_path,
    )
    .unwrap();

    assert!(processor.process(OutputFormat::Csv, 100).is_err());
}
