//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::OutputFormat;

/// hotelprep - Clean, encode, skew-correct and balance hotel booking datasets
#[derive(Parser, Debug)]
#[command(name = "hotelprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Train split (CSV or Parquet)
    #[arg(long, default_value = "artifacts/raw/train.csv")]
    pub train: PathBuf,

    /// Test split (CSV or Parquet)
    #[arg(long, default_value = "artifacts/raw/test.csv")]
    pub test: PathBuf,

    /// Directory for processed_train/processed_test output. Created if missing.
    #[arg(short, long, default_value = "artifacts/processed")]
    pub output_dir: PathBuf,

    /// YAML configuration with the data_processing section
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: PathBuf,

    /// Output file format: "csv" or "parquet"
    #[arg(long, default_value = "csv", value_parser = validate_format)]
    pub format: OutputFormat,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Paths of the two output files for the selected format
    pub fn output_paths(&self) -> (PathBuf, PathBuf) {
        let ext = self.format.extension();
        (
            self.output_dir.join(format!("processed_train.{}", ext)),
            self.output_dir.join(format!("processed_test.{}", ext)),
        )
    }
}

/// Validator for the format parameter
fn validate_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}
