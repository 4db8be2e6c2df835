//! Data processor - cleaning, encoding, skew correction and balancing
//!
//! `DataProcessor` owns the configuration and the input/output paths.
//! `data_processing` and `balance_data` never modify the frame they are
//! given; they return new frames.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;

use super::cleaning::{drop_columns, remove_duplicates, require_columns, DROPPED_COLUMNS};
use super::config::{load_config, Config, DataProcessingConfig};
use super::encoding::{encode_columns, mapping_differences, LabelMappings};
use super::error::{DataFault, DataProcessingError};
use super::loader::{load_dataset, save_dataset};
use super::skew::{apply_log1p, measure_skewness, SkewDecision};
use super::smote::Smote;
use crate::report::{ProcessingSummary, SplitSummary};

/// Name of the label column
pub const TARGET_COLUMN: &str = "booking_status";

const PROCESSING_FAILED: &str = "Error while preprocessing data.";
const BALANCING_FAILED: &str = "Error while balancing data.";

/// Result of `DataProcessor::data_processing`
#[derive(Debug, Clone)]
pub struct ProcessedData {
    /// The cleaned, encoded and skew-corrected frame
    pub df: DataFrame,
    /// Label → code mapping per categorical column
    pub label_mappings: LabelMappings,
    /// Skewness and transform decision per numerical column
    pub skew: Vec<SkewDecision>,
    /// Rows removed as exact duplicates
    pub duplicates_removed: usize,
}

impl ProcessedData {
    /// Names of the columns that received log1p
    pub fn transformed_columns(&self) -> Vec<String> {
        self.skew
            .iter()
            .filter(|d| d.transformed)
            .map(|d| d.column.clone())
            .collect()
    }
}

/// Output file format of a full processing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            other => Err(format!(
                "Unsupported output format: {}. Supported formats: csv, parquet",
                other
            )),
        }
    }
}

/// Log the fault at error level and wrap it
fn fail(message: &str, cause: DataFault) -> DataProcessingError {
    tracing::error!(error = %cause, "{}", message);
    DataProcessingError::new(message, cause)
}

/// Cleans, encodes, skew-corrects and balances booking datasets
#[derive(Debug, Clone)]
pub struct DataProcessor {
    train_path: PathBuf,
    test_path: PathBuf,
    processed_dir: PathBuf,
    config: Config,
}

impl DataProcessor {
    /// Load the configuration and make sure the output directory exists.
    ///
    /// Configuration failures surface as `ConfigError` inside the returned error.
    pub fn new(
        train_path: impl Into<PathBuf>,
        test_path: impl Into<PathBuf>,
        processed_dir: impl Into<PathBuf>,
        config_path: &Path,
    ) -> Result<Self> {
        let config = load_config(config_path)?;
        Self::with_config(train_path, test_path, processed_dir, config)
    }

    /// Build a processor from an already loaded configuration
    pub fn with_config(
        train_path: impl Into<PathBuf>,
        test_path: impl Into<PathBuf>,
        processed_dir: impl Into<PathBuf>,
        config: Config,
    ) -> Result<Self> {
        let processed_dir = processed_dir.into();
        if !processed_dir.exists() {
            std::fs::create_dir_all(&processed_dir).with_context(|| {
                format!(
                    "Failed to create output directory: {}",
                    processed_dir.display()
                )
            })?;
            tracing::info!(dir = %processed_dir.display(), "Created output directory");
        }

        Ok(Self {
            train_path: train_path.into(),
            test_path: test_path.into(),
            processed_dir,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn processed_dir(&self) -> &Path {
        &self.processed_dir
    }

    fn settings(&self) -> &DataProcessingConfig {
        self.config.data_processing()
    }

    /// Drop index/identifier columns, remove duplicates, label-encode
    /// categorical columns and log1p-transform skewed numerical columns.
    pub fn data_processing(&self, df: &DataFrame) -> Result<ProcessedData, DataProcessingError> {
        tracing::info!(rows = df.height(), columns = df.width(), "Starting data processing");
        let settings = self.settings();

        let df = drop_columns(df, &DROPPED_COLUMNS).map_err(|e| fail(PROCESSING_FAILED, e))?;
        tracing::info!(columns = ?DROPPED_COLUMNS, "Dropped columns");

        require_columns(
            &df,
            settings
                .categorical_columns
                .iter()
                .chain(settings.numerical_columns.iter())
                .map(String::as_str),
        )
        .map_err(|e| fail(PROCESSING_FAILED, e))?;

        let rows_before = df.height();
        let df = remove_duplicates(&df).map_err(|e| fail(PROCESSING_FAILED, e))?;
        let duplicates_removed = rows_before - df.height();
        tracing::info!(removed = duplicates_removed, rows = df.height(), "Removed duplicate rows");

        tracing::info!("Applying label encoding");
        let (df, label_mappings) = encode_columns(&df, &settings.categorical_columns)
            .map_err(|e| fail(PROCESSING_FAILED, e))?;
        for (column, mapping) in &label_mappings {
            let rendered = serde_json::to_string(&mapping.to_map()).unwrap_or_default();
            tracing::info!(column = %column, mapping = %rendered, "Label mapping");
        }

        tracing::info!("Handling skewness");
        let threshold = settings.skewness_threshold;
        let skew = measure_skewness(&df, &settings.numerical_columns, threshold)
            .map_err(|e| fail(PROCESSING_FAILED, e))?;
        for decision in &skew {
            tracing::info!(
                column = %decision.column,
                skewness = decision.skewness,
                threshold,
                transformed = decision.transformed,
                "Skewness check"
            );
        }
        let df = apply_log1p(&df, &skew).map_err(|e| fail(PROCESSING_FAILED, e))?;

        Ok(ProcessedData {
            df,
            label_mappings,
            skew,
            duplicates_removed,
        })
    }

    /// Oversample minority classes of `booking_status` with SMOTE until all
    /// classes have the majority count. Feature columns come back as Float64.
    pub fn balance_data(&self, df: &DataFrame) -> Result<DataFrame, DataProcessingError> {
        self.balance_with(df, &Smote::new())
    }

    /// `balance_data` with an explicitly configured sampler
    pub fn balance_with(
        &self,
        df: &DataFrame,
        smote: &Smote,
    ) -> Result<DataFrame, DataProcessingError> {
        tracing::info!(rows = df.height(), "Handling imbalanced data");
        let balanced = balance_frame(df, smote).map_err(|e| fail(BALANCING_FAILED, e))?;
        tracing::info!(rows = balanced.height(), "Data balanced successfully");
        Ok(balanced)
    }

    /// Load, process, balance and save both splits
    pub fn process(
        &self,
        format: OutputFormat,
        infer_schema_length: usize,
    ) -> Result<ProcessingSummary> {
        let train_df = load_dataset(&self.train_path, infer_schema_length)?;
        let test_df = load_dataset(&self.test_path, infer_schema_length)?;

        let train = self
            .data_processing(&train_df)
            .context("Processing the train split failed")?;
        let test = self
            .data_processing(&test_df)
            .context("Processing the test split failed")?;

        let diverging_mappings = mapping_differences(&train.label_mappings, &test.label_mappings);
        for column in &diverging_mappings {
            tracing::warn!(
                column = %column,
                "Label mapping differs between train and test splits; codes are not comparable"
            );
        }

        let mut train_balanced = self
            .balance_data(&train.df)
            .context("Balancing the train split failed")?;
        let mut test_balanced = self
            .balance_data(&test.df)
            .context("Balancing the test split failed")?;

        let ext = format.extension();
        let train_out = self.processed_dir.join(format!("processed_train.{}", ext));
        let test_out = self.processed_dir.join(format!("processed_test.{}", ext));
        save_dataset(&mut train_balanced, &train_out)?;
        save_dataset(&mut test_balanced, &test_out)?;

        Ok(ProcessingSummary {
            train: SplitSummary::new(&train_df, &train, &train_balanced, train_out),
            test: SplitSummary::new(&test_df, &test, &test_balanced, test_out),
            diverging_mappings,
        })
    }
}

/// Resample a processed frame. Target keeps its dtype; features become Float64.
fn balance_frame(df: &DataFrame, smote: &Smote) -> Result<DataFrame, DataFault> {
    let target = df
        .column(TARGET_COLUMN)
        .map_err(|_| DataFault::MissingColumn(TARGET_COLUMN.to_string()))?;

    if target.null_count() > 0 {
        return Err(DataFault::NullValues {
            column: TARGET_COLUMN.to_string(),
            count: target.null_count(),
        });
    }

    let feature_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .filter(|name| name != TARGET_COLUMN)
        .collect();

    // Column-major feature values
    let mut feature_values: Vec<Vec<f64>> = Vec::with_capacity(feature_names.len());
    for name in &feature_names {
        let column = df.column(name)?;
        if !column.dtype().is_primitive_numeric() {
            return Err(DataFault::NonNumeric {
                column: name.clone(),
                dtype: column.dtype().to_string(),
            });
        }
        if column.null_count() > 0 {
            return Err(DataFault::NullValues {
                column: name.clone(),
                count: column.null_count(),
            });
        }
        let floats = column.cast(&DataType::Float64)?;
        feature_values.push(floats.f64()?.into_no_null_iter().collect());
    }

    let n_rows = df.height();
    let rows: Vec<Vec<f64>> = (0..n_rows)
        .map(|r| feature_values.iter().map(|col| col[r]).collect())
        .collect();

    let class_keys = target.cast(&DataType::String)?;
    let classes: Vec<&str> = class_keys.str()?.into_no_null_iter().collect();

    let resampled = smote.fit_resample(&rows, &classes)?;

    let mut columns: Vec<Column> = Vec::with_capacity(feature_names.len() + 1);
    for (j, name) in feature_names.iter().enumerate() {
        let values: Vec<f64> = feature_values[j]
            .iter()
            .copied()
            .chain(resampled.synthetic.iter().map(|row| row[j]))
            .collect();
        columns.push(Column::new(name.as_str().into(), values));
    }

    let target_rows: Vec<IdxSize> = (0..n_rows)
        .chain(resampled.source_rows.iter().copied())
        .map(|r| r as IdxSize)
        .collect();
    let idx = IdxCa::from_vec("idx".into(), target_rows);
    columns.push(target.take(&idx)?);

    Ok(DataFrame::new(columns)?)
}
