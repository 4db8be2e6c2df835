//! Label encoding of categorical columns
//!
//! Each distinct value of a column receives a code in `0..k`, assigned in
//! ascending order of the values. String columns sort lexicographically,
//! numeric columns (e.g. 0/1 flags) sort by value. The encoder is fitted on
//! the frame it is given, so two frames with different distinct-value sets
//! can receive different codes for the same label.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::Serialize;

use super::error::DataFault;

/// Label → code mapping of a single column, in code order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMapping {
    pub labels: Vec<String>,
}

impl ColumnMapping {
    /// Code assigned to `label`, if it was observed
    pub fn code(&self, label: &str) -> Option<i64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|p| p as i64)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Pairs of (label, code) in code order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, i64)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(code, label)| (label.as_str(), code as i64))
    }

    /// Mapping as an ordered `{label: code}` map, used for logging
    pub fn to_map(&self) -> BTreeMap<String, i64> {
        self.pairs().map(|(l, c)| (l.to_string(), c)).collect()
    }
}

/// Mappings of every encoded column, keyed by column name
pub type LabelMappings = BTreeMap<String, ColumnMapping>;

/// Encode one column. Returns the encoded column and its mapping.
pub fn encode_column(column: &Column) -> Result<(Column, ColumnMapping), DataFault> {
    let name = column.name().to_string();

    if column.null_count() > 0 {
        return Err(DataFault::NullValues {
            column: name,
            count: column.null_count(),
        });
    }

    let (codes, labels) = if column.dtype().is_primitive_numeric() {
        encode_numeric(column)?
    } else {
        encode_strings(column)?
    };

    Ok((
        Column::new(name.as_str().into(), codes),
        ColumnMapping { labels },
    ))
}

fn encode_strings(column: &Column) -> Result<(Vec<i64>, Vec<String>), DataFault> {
    let as_str = column.cast(&DataType::String)?;
    let values: Vec<&str> = as_str.str()?.into_no_null_iter().collect();

    let mut labels: Vec<&str> = values.clone();
    labels.sort_unstable();
    labels.dedup();

    let index: BTreeMap<&str, i64> = labels
        .iter()
        .enumerate()
        .map(|(code, label)| (*label, code as i64))
        .collect();

    let codes = values.iter().map(|v| index[v]).collect();
    Ok((codes, labels.into_iter().map(str::to_string).collect()))
}

fn encode_numeric(column: &Column) -> Result<(Vec<i64>, Vec<String>), DataFault> {
    let dtype = column.dtype();

    // Integers stay integers: large ids are not exactly representable as f64
    if dtype.is_float() {
        let as_float = column.cast(&DataType::Float64)?;
        let values: Vec<f64> = as_float.f64()?.into_no_null_iter().collect();
        Ok(encode_ordered(&values, f64::total_cmp))
    } else if dtype.is_unsigned_integer() {
        let as_unsigned = column.cast(&DataType::UInt64)?;
        let values: Vec<u64> = as_unsigned.u64()?.into_no_null_iter().collect();
        Ok(encode_ordered(&values, u64::cmp))
    } else {
        let as_signed = column.cast(&DataType::Int64)?;
        let values: Vec<i64> = as_signed.i64()?.into_no_null_iter().collect();
        Ok(encode_ordered(&values, i64::cmp))
    }
}

/// Codes by position among the sorted distinct values, labels rendered with `Display`
fn encode_ordered<T, F>(values: &[T], cmp: F) -> (Vec<i64>, Vec<String>)
where
    T: Copy + std::fmt::Display,
    F: Fn(&T, &T) -> std::cmp::Ordering,
{
    let mut distinct = values.to_vec();
    distinct.sort_by(&cmp);
    distinct.dedup_by(|a, b| cmp(a, b).is_eq());

    let codes = values
        .iter()
        .map(|v| {
            distinct
                .binary_search_by(|candidate| cmp(candidate, v))
                .map(|p| p as i64)
                .unwrap_or_default()
        })
        .collect();

    let labels = distinct.iter().map(|v| v.to_string()).collect();
    (codes, labels)
}

/// Encode every listed column of `df`, returning the new frame and all mappings
pub fn encode_columns(
    df: &DataFrame,
    columns: &[String],
) -> Result<(DataFrame, LabelMappings), DataFault> {
    let mut result = df.clone();
    let mut mappings = LabelMappings::new();

    for name in columns {
        let column = df
            .column(name)
            .map_err(|_| DataFault::MissingColumn(name.clone()))?;
        let (encoded, mapping) = encode_column(column)?;
        result.with_column(encoded)?;
        mappings.insert(name.clone(), mapping);
    }

    Ok((result, mappings))
}

/// Columns whose mapping differs between two encodings of the same schema
pub fn mapping_differences(left: &LabelMappings, right: &LabelMappings) -> Vec<String> {
    left.iter()
        .filter(|(name, mapping)| right.get(*name).is_some_and(|other| other != *mapping))
        .map(|(name, _)| name.clone())
        .collect()
}
