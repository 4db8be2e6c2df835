//! YAML configuration loader

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use super::error::ConfigError;

/// Key of the section consumed by the data processor
pub const DATA_PROCESSING_KEY: &str = "data_processing";

/// Column roles and the skewness threshold used by `DataProcessor`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataProcessingConfig {
    /// Columns to label-encode
    pub categorical_columns: Vec<String>,
    /// Columns checked for skewness
    pub numerical_columns: Vec<String>,
    /// Columns whose skewness exceeds this value receive log1p
    pub skewness_threshold: f64,
}

/// Parsed configuration document.
///
/// Keeps the raw YAML tree for key-path lookups next to the typed
/// `data_processing` section.
#[derive(Debug, Clone)]
pub struct Config {
    raw: Value,
    data_processing: DataProcessingConfig,
}

impl Config {
    /// Build a configuration from an already parsed YAML tree
    pub fn from_value(raw: Value) -> Result<Self, ConfigError> {
        let section = raw
            .get(DATA_PROCESSING_KEY)
            .cloned()
            .ok_or_else(|| ConfigError::MissingKey {
                key: DATA_PROCESSING_KEY.to_string(),
            })?;

        for key in ["categorical_columns", "numerical_columns", "skewness_threshold"] {
            if section.get(key).is_none() {
                return Err(ConfigError::MissingKey {
                    key: format!("{}.{}", DATA_PROCESSING_KEY, key),
                });
            }
        }

        let data_processing: DataProcessingConfig =
            serde_yaml::from_value(section).map_err(|source| ConfigError::InvalidSection {
                key: DATA_PROCESSING_KEY.to_string(),
                source,
            })?;

        Ok(Self {
            raw,
            data_processing,
        })
    }

    /// Build a configuration directly from a typed section
    pub fn from_section(data_processing: DataProcessingConfig) -> Self {
        let columns = |names: &[String]| {
            Value::Sequence(names.iter().cloned().map(Value::String).collect())
        };

        let mut section = Mapping::new();
        section.insert(
            "categorical_columns".into(),
            columns(&data_processing.categorical_columns),
        );
        section.insert(
            "numerical_columns".into(),
            columns(&data_processing.numerical_columns),
        );
        section.insert(
            "skewness_threshold".into(),
            data_processing.skewness_threshold.into(),
        );

        let mut root = Mapping::new();
        root.insert(DATA_PROCESSING_KEY.into(), Value::Mapping(section));
        Self {
            raw: Value::Mapping(root),
            data_processing,
        }
    }

    /// Look up a nested value by dotted key path, e.g. `data_processing.skewness_threshold`
    pub fn lookup(&self, key_path: &str) -> Option<&Value> {
        key_path
            .split('.')
            .try_fold(&self.raw, |node, key| node.get(key))
    }

    pub fn data_processing(&self) -> &DataProcessingConfig {
        &self.data_processing
    }
}

/// Read and parse a YAML configuration file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: Value = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let config = Config::from_value(raw)?;
    tracing::debug!(
        path = %path.display(),
        categorical = config.data_processing.categorical_columns.len(),
        numerical = config.data_processing.numerical_columns.len(),
        threshold = config.data_processing.skewness_threshold,
        "Configuration loaded"
    );

    Ok(config)
}
