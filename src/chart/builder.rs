//! Base chart builder: price table in, candlestick/volume figure out.

use std::collections::BTreeSet;

use chrono::DateTime;
use polars::prelude::DataFrame;

use crate::data;
use crate::error::Result;

use super::base::{DAY_MILLIS, OHLC_TRACE_NAME, VOLUME_TRACE_NAME};
use super::figure::{Figure, TimeAxis};
use super::trace::Trace;

/// Candlestick trace, present iff all four price columns exist.
pub fn ohlc_trace(df: &DataFrame) -> Result<Option<Trace>> {
    if !data::has_columns(df, &["open", "high", "low", "close"]) {
        return Ok(None);
    }

    let x = data::datetime_strings(&data::datetime_values(df)?);
    let trace = Trace::candlestick(
        OHLC_TRACE_NAME,
        x,
        data::f64_values(df, "open")?,
        data::f64_values(df, "high")?,
        data::f64_values(df, "low")?,
        data::f64_values(df, "close")?,
    );
    Ok(Some(trace))
}

/// Volume bar trace, present iff the volume column exists.
pub fn volume_trace(df: &DataFrame) -> Result<Option<Trace>> {
    if !data::has_column(df, "volume") {
        return Ok(None);
    }

    let datetimes = data::datetime_strings(&data::datetime_values(df)?);
    let values = data::f64_values(df, "volume")?;

    let mut x = Vec::with_capacity(values.len());
    let mut y = Vec::with_capacity(values.len());
    for (ts, value) in datetimes.into_iter().zip(values) {
        if let Some(v) = value {
            x.push(ts);
            y.push(v);
        }
    }
    Ok(Some(Trace::volume(x, y)))
}

/// Build the base figure for one symbol.
///
/// The title concatenates `pre_title` with "OHLC", "Volume" or "OHLCV"
/// depending on which traces were added; a table with neither price nor
/// volume columns yields an empty figure.
pub fn single_symbol_figure(
    df: &DataFrame,
    pre_title: &str,
    time_axis: TimeAxis,
) -> Result<Figure> {
    let mut figure = Figure::new(String::new());
    figure.time_axis = time_axis;

    let mut title = String::new();

    if let Some(ohlc) = ohlc_trace(df)? {
        title.push_str(&ohlc.name);
        figure.add_trace(ohlc);
    }

    if let Some(volume) = volume_trace(df)? {
        if title.is_empty() {
            title.push_str(VOLUME_TRACE_NAME);
        } else {
            title.push('V');
        }
        figure.add_trace(volume);
    }

    if time_axis == TimeAxis::HideGaps {
        figure.hidden_dates = hidden_calendar_days(&data::datetime_values(df)?);
    }

    figure.title = format!("{}{}", pre_title, title);
    Ok(figure)
}

/// Calendar days between the first and last timestamp that carry no data,
/// rendered as `YYYY-MM-DD` strings for x-axis range breaks.
pub fn hidden_calendar_days(millis: &[i64]) -> Vec<String> {
    let present: BTreeSet<i64> = millis.iter().map(|ms| ms.div_euclid(DAY_MILLIS)).collect();

    let (first, last) = match (present.first(), present.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut hidden = Vec::new();
    for day in first..=last {
        if !present.contains(&day) {
            if let Some(dt) = DateTime::from_timestamp_millis(day * DAY_MILLIS) {
                hidden.push(dt.format("%Y-%m-%d").to_string());
            }
        }
    }
    hidden
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn price_df(columns: &[&str]) -> DataFrame {
        let mut cols = vec![Column::new(
            "datetime".into(),
            vec![1_700_000_000_000_i64, 1_700_000_060_000, 1_700_000_120_000],
        )];
        for name in columns {
            cols.push(Column::new((*name).into(), vec![10.0, 11.0, 12.0]));
        }
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn test_ohlcv_figure_has_two_traces() {
        let df = price_df(&["open", "high", "low", "close", "volume"]);
        let fig = single_symbol_figure(&df, "BTCUSDT ", TimeAxis::Date).unwrap();
        assert_eq!(fig.trace_count(), 2);
        assert!(fig.title.contains("OHLCV"));
        assert_eq!(fig.title, "BTCUSDT OHLCV");
    }

    #[test]
    fn test_volume_only_figure() {
        let df = price_df(&["volume"]);
        let fig = single_symbol_figure(&df, "BTCUSDT ", TimeAxis::Date).unwrap();
        assert_eq!(fig.trace_count(), 1);
        assert!(fig.title.contains("Volume"));
    }

    #[test]
    fn test_partial_ohlc_yields_no_candlestick() {
        let df = price_df(&["open", "close"]);
        let fig = single_symbol_figure(&df, "X ", TimeAxis::Date).unwrap();
        assert_eq!(fig.trace_count(), 0);
        assert_eq!(fig.title, "X ");
    }

    #[test]
    fn test_hidden_calendar_days() {
        // Two days of data with a two-day hole in between
        let day = 86_400_000_i64;
        let millis = vec![0, day / 2, 3 * day];
        let hidden = hidden_calendar_days(&millis);
        assert_eq!(hidden, vec!["1970-01-02", "1970-01-03"]);
    }

    #[test]
    fn test_hide_gaps_mode_fills_rangebreaks() {
        let day = 86_400_000_i64;
        let df = DataFrame::new(vec![
            Column::new("datetime".into(), vec![0_i64, 2 * day]),
            Column::new("volume".into(), vec![10.0, 20.0]),
        ])
        .unwrap();
        let fig = single_symbol_figure(&df, "X ", TimeAxis::HideGaps).unwrap();
        assert_eq!(fig.hidden_dates, vec!["1970-01-02"]);
    }
}
