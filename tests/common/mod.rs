//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use hotelprep::pipeline::{Config, DataProcessingConfig, DataProcessor};

pub const MEAL_PLANS: [&str; 3] = ["Meal Plan 1", "Meal Plan 2", "Not Selected"];
pub const ROOM_TYPES: [&str; 2] = ["Room_Type 1", "Room_Type 4"];

/// Create a booking DataFrame in the raw dataset layout
///
/// This DataFrame includes:
/// - `Unnamed: 0` / `Booking_ID`: index artifact and identifier (dropped by processing)
/// - `type_of_meal_plan`, `room_type_reserved`: string categoricals
/// - `lead_time`: unique per row, roughly symmetric
/// - `avg_price_per_room`: repeating price ladder
/// - `no_of_special_requests`: heavily right-skewed (mostly zero)
/// - `booking_status`: the first `canceled` rows are "Canceled", the rest "Not_Canceled"
pub fn create_booking_dataframe(rows: usize, canceled: usize) -> DataFrame {
    let index: Vec<i64> = (0..rows as i64).collect();
    let ids: Vec<String> = (0..rows).map(|i| format!("INN{:05}", i + 1)).collect();
    let meal: Vec<&str> = (0..rows).map(|i| MEAL_PLANS[i % MEAL_PLANS.len()]).collect();
    let room: Vec<&str> = (0..rows).map(|i| ROOM_TYPES[i % ROOM_TYPES.len()]).collect();
    let lead_time: Vec<i64> = (0..rows as i64).collect();
    let price: Vec<f64> = (0..rows).map(|i| 50.0 + (i % 10) as f64 * 7.5).collect();
    let requests: Vec<i64> = (0..rows).map(|i| if i % 25 == 0 { 5 } else { 0 }).collect();
    let status: Vec<&str> = (0..rows)
        .map(|i| if i < canceled { "Canceled" } else { "Not_Canceled" })
        .collect();

    df! {
        "Unnamed: 0" => index,
        "Booking_ID" => ids,
        "type_of_meal_plan" => meal,
        "room_type_reserved" => room,
        "lead_time" => lead_time,
        "avg_price_per_room" => price,
        "no_of_special_requests" => requests,
        "booking_status" => status,
    }
    .unwrap()
}

/// The `data_processing` section matching `create_booking_dataframe`
pub fn booking_config(threshold: f64) -> DataProcessingConfig {
    DataProcessingConfig {
        categorical_columns: vec![
            "type_of_meal_plan".to_string(),
            "room_type_reserved".to_string(),
            "booking_status".to_string(),
        ],
        numerical_columns: vec![
            "lead_time".to_string(),
            "avg_price_per_room".to_string(),
            "no_of_special_requests".to_string(),
        ],
        skewness_threshold: threshold,
    }
}

/// Write a YAML config file for the given section
pub fn write_config(dir: &Path, section: &DataProcessingConfig) -> PathBuf {
    let path = dir.join("config.yaml");
    let list = |cols: &[String]| {
        cols.iter()
            .map(|c| format!("    - \"{}\"\n", c))
            .collect::<String>()
    };
    let yaml = format!(
        "data_processing:\n  categorical_columns:\n{}  \
         numerical_columns:\n{}  skewness_threshold: {}\n",
        list(&section.categorical_columns),
        list(&section.numerical_columns),
        section.skewness_threshold
    );
    std::fs::write(&path, yaml).unwrap();
    path
}

/// Processor over a temp dir with an in-memory config
pub fn create_processor(dir: &TempDir, section: DataProcessingConfig) -> DataProcessor {
    DataProcessor::with_config(
        dir.path().join("train.csv"),
        dir.path().join("test.csv"),
        dir.path().join("processed"),
        Config::from_section(section),
    )
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Write a frame as CSV into an existing directory
pub fn write_csv(df: &mut DataFrame, path: &Path) {
    let mut file = std::fs::File::create(path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
}

/// Values of an integer column
pub fn i64_values(df: &DataFrame, name: &str) -> Vec<i64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

/// Values of a column as f64
pub fn f64_values(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

/// Row count per distinct value of an integer column
pub fn class_counts(df: &DataFrame, name: &str) -> std::collections::BTreeMap<i64, usize> {
    let mut counts = std::collections::BTreeMap::new();
    for v in i64_values(df, name) {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
