//! Skewness measurement and log1p correction

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::error::DataFault;

/// Outcome of the skewness check for one numerical column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkewDecision {
    pub column: String,
    pub skewness: f64,
    pub transformed: bool,
}

/// Bias-adjusted sample skewness (Fisher-Pearson G1).
///
/// Returns NaN for fewer than three values and 0 when the values have no
/// spread. Matches the estimator pandas uses for `Series.skew`.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return f64::NAN;
    }

    let count = n as f64;
    let mean = values.iter().sum::<f64>() / count;

    let (m2, m3) = values.iter().fold((0.0, 0.0), |(m2, m3), &v| {
        let d = v - mean;
        (m2 + d * d, m3 + d * d * d)
    });

    // Treat round-off noise as zero variance
    if m2 <= f64::EPSILON * mean.abs().max(1.0) * count {
        return 0.0;
    }

    let g1 = (m3 / count) / (m2 / count).powf(1.5);
    (count * (count - 1.0)).sqrt() / (count - 2.0) * g1
}

/// Values of a numerical column as f64, nulls and NaN skipped
fn numeric_values(column: &Column) -> Result<Vec<f64>, DataFault> {
    if !column.dtype().is_primitive_numeric() {
        return Err(DataFault::NonNumeric {
            column: column.name().to_string(),
            dtype: column.dtype().to_string(),
        });
    }

    let floats = column.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

/// Apply `ln(1 + x)` to a column, keeping nulls
pub fn log1p_column(column: &Column) -> Result<Column, DataFault> {
    let name = column.name().to_string();
    let floats = column.cast(&DataType::Float64)?;

    let transformed = floats
        .f64()?
        .into_iter()
        .map(|v| match v {
            Some(x) if x <= -1.0 => Err(DataFault::Log1pDomain {
                column: name.clone(),
                value: x,
            }),
            Some(x) => Ok(Some(x.ln_1p())),
            None => Ok(None),
        })
        .collect::<Result<Vec<Option<f64>>, DataFault>>()?;

    Ok(Column::new(name.as_str().into(), transformed))
}

/// Measure every listed column. Columns are independent, so this runs in parallel.
pub fn measure_skewness(
    df: &DataFrame,
    columns: &[String],
    threshold: f64,
) -> Result<Vec<SkewDecision>, DataFault> {
    columns
        .par_iter()
        .map(|name| {
            let column = df
                .column(name)
                .map_err(|_| DataFault::MissingColumn(name.clone()))?;
            let skew = skewness(&numeric_values(column)?);
            Ok(SkewDecision {
                column: name.clone(),
                skewness: skew,
                // NaN never exceeds the threshold
                transformed: skew > threshold,
            })
        })
        .collect()
}

/// Replace every column flagged by `decisions` with its log1p transform
pub fn apply_log1p(df: &DataFrame, decisions: &[SkewDecision]) -> Result<DataFrame, DataFault> {
    let mut result = df.clone();
    for decision in decisions.iter().filter(|d| d.transformed) {
        let column = df
            .column(&decision.column)
            .map_err(|_| DataFault::MissingColumn(decision.column.clone()))?;
        result.with_column(log1p_column(column)?)?;
    }
    Ok(result)
}
