//! Column dropping and duplicate row removal

use polars::prelude::*;

use super::error::DataFault;

/// Index column written by pandas when a frame is saved with its index
pub const INDEX_ARTIFACT_COLUMN: &str = "Unnamed: 0";

/// Per-booking identifier, unique and therefore useless as a feature
pub const IDENTIFIER_COLUMN: &str = "Booking_ID";

/// Columns removed before any other processing
pub const DROPPED_COLUMNS: [&str; 2] = [INDEX_ARTIFACT_COLUMN, IDENTIFIER_COLUMN];

/// Fail with `MissingColumn` for the first name absent from `df`
pub fn require_columns<'a, I>(df: &DataFrame, columns: I) -> Result<(), DataFault>
where
    I: IntoIterator<Item = &'a str>,
{
    for name in columns {
        if df.column(name).is_err() {
            return Err(DataFault::MissingColumn(name.to_string()));
        }
    }
    Ok(())
}

/// Drop the given columns. Every column must exist.
pub fn drop_columns(df: &DataFrame, columns: &[&str]) -> Result<DataFrame, DataFault> {
    require_columns(df, columns.iter().copied())?;

    let mut result = df.clone();
    for name in columns {
        result = result.drop(name)?;
    }
    Ok(result)
}

/// Remove exact duplicate rows, keeping the first occurrence and the original order
pub fn remove_duplicates(df: &DataFrame) -> Result<DataFrame, DataFault> {
    if df.height() == 0 {
        return Ok(df.clone());
    }
    Ok(df.unique_stable(None, UniqueKeepStrategy::First, None)?)
}
