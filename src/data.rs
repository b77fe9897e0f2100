//! Column and index conventions for price and alpha tables.
//!
//! Tables are plain polars `DataFrame`s. Timestamps live in a `datetime`
//! column as epoch milliseconds (`i64`). Multi-symbol tables additionally
//! carry a `symbol` column holding the top-level `"SYMBOL FREQ"` key; the
//! original two-level (symbol+frequency, time) index is flattened into these
//! two columns.

use chrono::DateTime;
use polars::prelude::*;

use crate::error::{ChartError, Result};

/// Name of the timestamp column (epoch milliseconds).
pub const DATETIME_COLUMN: &str = "datetime";

/// Name of the top-level key column in multi-symbol tables.
pub const SYMBOL_COLUMN: &str = "symbol";

/// Price columns, ignored by the alpha overlay pass.
pub const PRICE_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// Check whether a dataframe has a column with the given name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Check whether all of the given columns are present.
pub fn has_columns(df: &DataFrame, names: &[&str]) -> bool {
    names.iter().all(|name| has_column(df, name))
}

/// Whether a column name belongs to the price/volume set.
pub fn is_price_column(name: &str) -> bool {
    let lower = name.to_lowercase();
    PRICE_COLUMNS.contains(&lower.as_str())
        || lower == DATETIME_COLUMN
        || lower == SYMBOL_COLUMN
}

/// Materialize a float column, keeping nulls as `None`.
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    if !has_column(df, name) {
        return Err(ChartError::MissingColumn(name.to_string()));
    }
    let ca = df.column(name)?.f64()?;
    Ok(ca.into_iter().collect())
}

/// Materialize the timestamp column as epoch milliseconds.
///
/// Null timestamps are rejected; every row must carry a real time.
pub fn datetime_values(df: &DataFrame) -> Result<Vec<i64>> {
    if !has_column(df, DATETIME_COLUMN) {
        return Err(ChartError::MissingColumn(DATETIME_COLUMN.to_string()));
    }
    let ca = df.column(DATETIME_COLUMN)?.i64()?;
    ca.into_iter()
        .map(|v| v.ok_or(ChartError::NullDatetime))
        .collect()
}

/// Render epoch milliseconds as plotly-compatible date strings.
pub fn datetime_strings(millis: &[i64]) -> Vec<String> {
    millis
        .iter()
        .map(|ms| match DateTime::from_timestamp_millis(*ms) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => String::new(),
        })
        .collect()
}

/// Distinct top-level keys of a multi-symbol table, in order of first
/// appearance.
pub fn unique_symbols(df: &DataFrame) -> Result<Vec<String>> {
    let ca = df.column(SYMBOL_COLUMN)?.str()?;
    let mut symbols: Vec<String> = Vec::new();
    for value in ca.into_iter().flatten() {
        if !symbols.iter().any(|s| s == value) {
            symbols.push(value.to_string());
        }
    }
    Ok(symbols)
}

/// Select the rows of a multi-symbol table belonging to one top-level key.
pub fn filter_symbol(df: &DataFrame, key: &str) -> Result<DataFrame> {
    let ca = df.column(SYMBOL_COLUMN)?.str()?;
    let indices: Vec<u32> = ca
        .into_iter()
        .enumerate()
        .filter(|(_, value)| matches!(value, Some(v) if *v == key))
        .map(|(idx, _)| idx as u32)
        .collect();

    let idx_ca = UInt32Chunked::from_vec("idx".into(), indices);
    Ok(df.take(&idx_ca)?)
}

/// A named column with its null rows dropped, paired with the surviving
/// timestamps.
pub fn non_null_series(df: &DataFrame, name: &str) -> Result<(Vec<i64>, Vec<f64>)> {
    let datetimes = datetime_values(df)?;
    let values = f64_values(df, name)?;

    let mut times = Vec::with_capacity(values.len());
    let mut kept = Vec::with_capacity(values.len());
    for (ms, value) in datetimes.iter().zip(values.iter()) {
        if let Some(v) = value {
            times.push(*ms);
            kept.push(*v);
        }
    }
    Ok((times, kept))
}
