//! Alpha overlay engine: places indicator series onto a base figure.

use std::collections::{BTreeSet, HashMap};

use polars::prelude::DataFrame;
use tracing::{debug, warn};

use crate::chart::{
    Figure, MarkerSymbol, ScatterMode, SeriesKind, Trace, TraceData, OVERLAY_OPACITY,
    PANEL_PLACEHOLDER_TITLE, UNIT_AXIS_TITLE,
};
use crate::data;
use crate::error::{ChartError, Result};

use super::descriptor::GraphDescriptor;

/// Tolerance for matching category values against column values.
const CATEGORY_EPSILON: f64 = 1e-9;

/// Overlay the alpha table onto the figure according to the descriptors.
///
/// Non-price descriptors get their own sub-panels: the price panel keeps
/// 70% of the height and the remainder is split evenly among the distinct
/// target panel indices. Per-column failures are logged and skipped;
/// rendering is best-effort with no rollback.
pub fn plot_alphas(
    figure: &mut Figure,
    alpha_df: &DataFrame,
    descriptors: &[GraphDescriptor],
) -> Result<()> {
    // Distinct sub-panel indices requested by non-price descriptors,
    // mapped onto figure panel ordinals 2..=N+1 in sorted order.
    let panel_indices: BTreeSet<usize> = descriptors
        .iter()
        .filter(|d| !d.price_related)
        .map(|d| d.panel_index)
        .collect();
    let ordinals: HashMap<usize, usize> = panel_indices
        .iter()
        .enumerate()
        .map(|(pos, index)| (*index, pos + 2))
        .collect();

    if !panel_indices.is_empty() {
        figure.set_sub_panels(panel_indices.len());
    }

    // Close prices from the base candlestick, needed for categorical
    // sub-series that plot events at the price level.
    let candle: Option<HashMap<String, f64>> = figure.candle_closes().map(|(x, close)| {
        x.iter()
            .zip(close.iter())
            .filter_map(|(ts, c)| c.map(|c| (ts.clone(), c)))
            .collect()
    });

    let columns: Vec<String> = alpha_df
        .get_column_names()
        .iter()
        .map(|c| c.as_str().to_string())
        .collect();

    for column in &columns {
        if data::is_price_column(column) {
            continue;
        }
        if let Err(err) = plot_column(figure, alpha_df, column, descriptors, &ordinals, candle.as_ref())
        {
            warn!("skipping alpha column {}: {}", column, err);
        }
    }

    Ok(())
}

/// Resolve one alpha column against the descriptors and draw its traces.
fn plot_column(
    figure: &mut Figure,
    alpha_df: &DataFrame,
    column: &str,
    descriptors: &[GraphDescriptor],
    ordinals: &HashMap<usize, usize>,
    candle: Option<&HashMap<String, f64>>,
) -> Result<()> {
    let matched: Vec<&GraphDescriptor> = descriptors
        .iter()
        .filter(|d| d.matches_column(column))
        .collect();
    if matched.is_empty() {
        debug!("no descriptor for alpha column {}", column);
        return Ok(());
    }

    let (times, values) = data::non_null_series(alpha_df, column)?;
    let x = data::datetime_strings(&times);

    for descriptor in matched {
        let trace = if descriptor.is_category_of(column) {
            category_trace(descriptor, &x, &values, candle)?
        } else {
            series_trace(descriptor, x.clone(), values.clone())
        };
        place_trace(figure, descriptor, trace, ordinals);
    }

    Ok(())
}

/// Trace for a categorical sub-series: close price at the timestamps where
/// the column equals the descriptor's category value.
fn category_trace(
    descriptor: &GraphDescriptor,
    x: &[String],
    values: &[f64],
    candle: Option<&HashMap<String, f64>>,
) -> Result<Trace> {
    let category = descriptor
        .category
        .ok_or_else(|| ChartError::MissingColumn(format!("category value for {}", descriptor.name)))?;
    let closes = candle.ok_or_else(|| ChartError::MissingColumn("close".to_string()))?;

    let mut event_x = Vec::new();
    let mut event_y = Vec::new();
    for (ts, value) in x.iter().zip(values.iter()) {
        if (value - category).abs() < CATEGORY_EPSILON {
            if let Some(price) = closes.get(ts) {
                event_x.push(ts.clone());
                event_y.push(*price);
            }
        }
    }

    Ok(series_trace(descriptor, event_x, event_y))
}

/// Trace for a plain indicator series, drawn per the descriptor's kind.
fn series_trace(descriptor: &GraphDescriptor, x: Vec<String>, y: Vec<f64>) -> Trace {
    let data = match descriptor.kind {
        SeriesKind::Line => TraceData::Scatter {
            x,
            y,
            mode: ScatterMode::Lines,
            color: descriptor.color.clone(),
            symbol: descriptor.marker,
            opacity: None,
            stacked: false,
        },
        SeriesKind::Scatter => TraceData::Scatter {
            x,
            y,
            mode: ScatterMode::Markers,
            color: descriptor.color.clone(),
            symbol: descriptor.marker,
            opacity: Some(OVERLAY_OPACITY),
            stacked: false,
        },
        SeriesKind::Bar => TraceData::Bar {
            x,
            y,
            color: descriptor.color.clone(),
            opacity: Some(OVERLAY_OPACITY),
        },
        SeriesKind::StackedArea => TraceData::Scatter {
            x,
            y,
            mode: ScatterMode::Lines,
            color: descriptor.color.clone(),
            symbol: MarkerSymbol::None,
            opacity: Some(OVERLAY_OPACITY),
            stacked: true,
        },
        SeriesKind::Pie => TraceData::Pie {
            labels: x,
            values: y,
        },
    };

    Trace {
        name: descriptor.name.clone(),
        panel: 1,
        on_unit_axis: false,
        data,
    }
}

/// Assign the trace to its panel and merge panel titles.
fn place_trace(
    figure: &mut Figure,
    descriptor: &GraphDescriptor,
    mut trace: Trace,
    ordinals: &HashMap<usize, usize>,
) {
    let panel = if descriptor.price_related {
        1
    } else {
        *ordinals.get(&descriptor.panel_index).unwrap_or(&1)
    };
    trace.panel = panel;

    if panel > 1 {
        if let Some(target) = figure.panels.get_mut(panel - 1) {
            if target.title == PANEL_PLACEHOLDER_TITLE {
                target.title = descriptor.name.clone();
            } else if !target.title.contains(&descriptor.name) {
                target.title = format!("{} & {}", target.title, descriptor.name);
            }
            if target.axis_title == UNIT_AXIS_TITLE && descriptor.unit != UNIT_AXIS_TITLE {
                target.axis_title = descriptor.unit.clone();
            }
        }
    }

    figure.add_trace(trace);
}
