//! Error types for configuration loading and data processing.
//!
//! `ConfigError` covers everything that can go wrong while reading the YAML
//! configuration. `DataProcessingError` is the single failure signal of the
//! processing and balancing steps; it carries a readable message and the
//! underlying `DataFault` as its source.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while loading the processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("Failed to read configuration file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML.
    #[error("Failed to parse configuration file: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A required key is absent.
    #[error("Missing required configuration key: {key}")]
    MissingKey { key: String },

    /// A section exists but does not have the expected shape.
    #[error("Invalid configuration section '{key}'")]
    InvalidSection {
        key: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Root cause of a processing failure.
#[derive(Debug, Error)]
pub enum DataFault {
    #[error("column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("column '{column}' is not numeric (dtype {dtype})")]
    NonNumeric { column: String, dtype: String },

    #[error("column '{column}' contains {count} null value(s)")]
    NullValues { column: String, count: usize },

    #[error("column '{column}' has value {value} outside the log1p domain (x > -1)")]
    Log1pDomain { column: String, value: f64 },

    #[error("class '{class}' has {count} sample(s), SMOTE needs at least {required}")]
    TooFewSamples {
        class: String,
        count: usize,
        required: usize,
    },

    #[error("SMOTE needs at least two classes, found {0}")]
    SingleClass(usize),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Failure of `data_processing` or `balance_data`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DataProcessingError {
    pub message: String,
    #[source]
    pub cause: DataFault,
}

impl DataProcessingError {
    pub fn new(message: impl Into<String>, cause: impl Into<DataFault>) -> Self {
        Self {
            message: message.into(),
            cause: cause.into(),
        }
    }

    /// The underlying fault
    pub fn fault(&self) -> &DataFault {
        &self.cause
    }
}
