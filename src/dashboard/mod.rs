//! Dashboard composer: groups per-symbol figures and appends traces.
//!
//! This module provides:
//! - `Dashboard` - an ordered container of figures
//! - `PlotTarget` - tagged union over the accepted plot shapes
//! - `plot` - price table to figure/dashboard conversion
//! - `add_to_plot` - title-substring lookup and trace append

pub mod export;

use polars::prelude::DataFrame;
use tracing::debug;

use crate::chart::builder::single_symbol_figure;
use crate::chart::{Figure, TimeAxis, Trace};
use crate::data;
use crate::error::{ChartError, Result};

pub use export::save_plot_as_html;

/// Ordered container of per-symbol figures.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub figures: Vec<Figure>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, figure: Figure) {
        self.figures.push(figure);
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }
}

/// Accepted shapes for trace appends and export: a single figure, a plain
/// list, or a dashboard container.
#[derive(Debug, Clone)]
pub enum PlotTarget {
    Single(Figure),
    List(Vec<Figure>),
    Dashboard(Dashboard),
}

impl PlotTarget {
    /// All figures in the target, in order.
    pub fn figures(&self) -> &[Figure] {
        match self {
            PlotTarget::Single(figure) => std::slice::from_ref(figure),
            PlotTarget::List(figures) => figures.as_slice(),
            PlotTarget::Dashboard(dashboard) => dashboard.figures.as_slice(),
        }
    }

    pub fn figures_mut(&mut self) -> &mut [Figure] {
        match self {
            PlotTarget::Single(figure) => std::slice::from_mut(figure),
            PlotTarget::List(figures) => figures.as_mut_slice(),
            PlotTarget::Dashboard(dashboard) => dashboard.figures.as_mut_slice(),
        }
    }
}

/// Build a figure or dashboard from a price table.
///
/// A table with a `symbol` column is split by top-level key into one figure
/// per symbol (titled `"{pre_title_text}{SYMBOL} ..."`). A single-symbol
/// table requires a non-empty `pre_title_text`, which doubles as the symbol
/// label.
pub fn plot(df: &DataFrame, pre_title_text: &str, time_axis: TimeAxis) -> Result<PlotTarget> {
    if data::has_column(df, data::SYMBOL_COLUMN) {
        let mut dashboard = Dashboard::new();
        for key in data::unique_symbols(df)? {
            // The top-level key is "SYMBOL FREQ"; only the symbol goes in
            // the title.
            let symbol = key.split_whitespace().next().unwrap_or(key.as_str());
            let sub = data::filter_symbol(df, &key)?;
            let prefix = format!("{}{} ", pre_title_text, symbol);
            dashboard.push(single_symbol_figure(&sub, &prefix, time_axis)?);
        }
        debug!("built dashboard with {} figures", dashboard.len());
        Ok(PlotTarget::Dashboard(dashboard))
    } else {
        if pre_title_text.is_empty() {
            return Err(ChartError::MissingTitlePrefix);
        }
        Ok(PlotTarget::Single(single_symbol_figure(
            df,
            pre_title_text,
            time_axis,
        )?))
    }
}

/// Append a trace to one figure while preserving its layout.
pub fn add_to_figure(figure: &mut Figure, trace: Trace) {
    figure.add_trace(trace);
}

/// Append a trace to the figure selected by title substring.
///
/// A single-figure target always accepts the trace. With several figures a
/// non-empty `identifier` is required; the first figure whose title contains
/// it wins, and duplicate matches are not detected.
pub fn add_to_plot(target: &mut PlotTarget, trace: Trace, identifier: Option<&str>) -> Result<()> {
    let figures = target.figures_mut();

    if figures.is_empty() {
        return Err(ChartError::EmptyPlot);
    }

    if figures.len() == 1 {
        figures[0].add_trace(trace);
        return Ok(());
    }

    // An empty selector would match every title; treat it as missing.
    let identifier = identifier
        .filter(|s| !s.is_empty())
        .ok_or(ChartError::MissingIdentifier)?;

    for figure in figures.iter_mut() {
        if figure.title.contains(identifier) {
            figure.add_trace(trace);
            return Ok(());
        }
    }

    Err(ChartError::TitleNotFound {
        identifier: identifier.to_string(),
        titles: figures.iter().map(|f| f.title.clone()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn multi_symbol_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "datetime".into(),
                vec![1_700_000_000_000_i64, 1_700_000_060_000, 1_700_000_000_000, 1_700_000_060_000],
            ),
            Column::new("open".into(), vec![10.0, 11.0, 20.0, 21.0]),
            Column::new("high".into(), vec![11.0, 12.0, 21.0, 22.0]),
            Column::new("low".into(), vec![9.0, 10.0, 19.0, 20.0]),
            Column::new("close".into(), vec![10.5, 11.5, 20.5, 21.5]),
            Column::new("volume".into(), vec![100.0, 200.0, 300.0, 400.0]),
            Column::new(
                "symbol".into(),
                vec!["BTCUSDT 1m", "BTCUSDT 1m", "ETHUSDT 1m", "ETHUSDT 1m"],
            ),
        ])
        .unwrap()
    }

    fn single_symbol_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("datetime".into(), vec![1_700_000_000_000_i64, 1_700_000_060_000]),
            Column::new("volume".into(), vec![100.0, 200.0]),
        ])
        .unwrap()
    }

    fn sample_trace() -> Trace {
        Trace::line(
            "sma",
            vec!["2023-11-14 22:13:20".into()],
            vec![10.0],
        )
    }

    #[test]
    fn test_plot_multi_symbol_one_figure_per_key() {
        let target = plot(&multi_symbol_df(), "", TimeAxis::Date).unwrap();
        let figures = target.figures();
        assert_eq!(figures.len(), 2);
        assert_eq!(figures[0].title, "BTCUSDT OHLCV");
        assert_eq!(figures[1].title, "ETHUSDT OHLCV");
        assert_eq!(figures[0].trace_count(), 2);
    }

    #[test]
    fn test_plot_single_symbol_requires_prefix() {
        let err = plot(&single_symbol_df(), "", TimeAxis::Date).unwrap_err();
        assert!(matches!(err, ChartError::MissingTitlePrefix));

        let target = plot(&single_symbol_df(), "BTCUSDT ", TimeAxis::Date).unwrap();
        assert_eq!(target.figures().len(), 1);
        assert_eq!(target.figures()[0].title, "BTCUSDT Volume");
    }

    #[test]
    fn test_add_to_single_always_succeeds() {
        let mut target = plot(&single_symbol_df(), "BTCUSDT ", TimeAxis::Date).unwrap();
        add_to_plot(&mut target, sample_trace(), None).unwrap();
        assert_eq!(target.figures()[0].trace_count(), 2);
    }

    #[test]
    fn test_add_to_multi_without_identifier_fails() {
        let mut target = plot(&multi_symbol_df(), "", TimeAxis::Date).unwrap();
        let err = add_to_plot(&mut target, sample_trace(), None).unwrap_err();
        assert!(matches!(err, ChartError::MissingIdentifier));
    }

    #[test]
    fn test_add_to_multi_with_empty_identifier_fails() {
        let mut target = plot(&multi_symbol_df(), "", TimeAxis::Date).unwrap();
        let err = add_to_plot(&mut target, sample_trace(), Some("")).unwrap_err();
        assert!(matches!(err, ChartError::MissingIdentifier));
        assert_eq!(target.figures()[0].trace_count(), 2);
        assert_eq!(target.figures()[1].trace_count(), 2);
    }

    #[test]
    fn test_add_to_multi_first_match_wins() {
        let mut target = plot(&multi_symbol_df(), "", TimeAxis::Date).unwrap();
        add_to_plot(&mut target, sample_trace(), Some("ETHUSDT")).unwrap();
        assert_eq!(target.figures()[0].trace_count(), 2);
        assert_eq!(target.figures()[1].trace_count(), 3);
    }

    #[test]
    fn test_add_to_multi_unknown_identifier_lists_titles() {
        let mut target = plot(&multi_symbol_df(), "", TimeAxis::Date).unwrap();
        let err = add_to_plot(&mut target, sample_trace(), Some("SOLUSDT")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("SOLUSDT"));
        assert!(message.contains("BTCUSDT OHLCV"));
        assert!(message.contains("ETHUSDT OHLCV"));
    }

    #[test]
    fn test_add_to_empty_list_fails() {
        let mut target = PlotTarget::List(Vec::new());
        let err = add_to_plot(&mut target, sample_trace(), None).unwrap_err();
        assert!(matches!(err, ChartError::EmptyPlot));
    }

    #[test]
    fn test_add_to_figure_preserves_layout() {
        let mut target = plot(&single_symbol_df(), "BTCUSDT ", TimeAxis::Date).unwrap();
        let figure = &mut target.figures_mut()[0];
        let title = figure.title.clone();
        let panels = figure.panels.len();

        add_to_figure(figure, sample_trace());

        assert_eq!(figure.title, title);
        assert_eq!(figure.panels.len(), panels);
        assert_eq!(figure.trace_count(), 2);
    }
}
