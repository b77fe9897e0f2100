//! Graph descriptors: per-indicator plotting configuration.
//!
//! A descriptor tells the overlay engine how one alpha column should be
//! drawn: series kind, panel placement, color, marker and unit. A logical
//! indicator may be decomposed into several categorical sub-series, each
//! keyed by a numeric category value matched against the column's values.

use serde::{Deserialize, Serialize};

use crate::chart::{MarkerSymbol, SeriesKind, UNIT_AXIS_TITLE};

/// Plotting configuration for one indicator series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDescriptor {
    /// Series name. For categorical sub-series this is `"{label}_{column}"`,
    /// so the descriptor matches its base column by substring.
    pub name: String,
    /// How the series is drawn.
    pub kind: SeriesKind,
    /// Drawn on the main price panel when true.
    pub price_related: bool,
    /// Target panel index for non-price series. Descriptors sharing an
    /// index share a panel.
    pub panel_index: usize,
    /// CSS color, e.g. `"rgb(255, 0, 0)"` or `"#ff0000"`.
    pub color: Option<String>,
    /// Marker shape for scatter-style series.
    pub marker: MarkerSymbol,
    /// Unit label, used as the axis title of the series' panel.
    pub unit: String,
    /// Category value for discretized indicators.
    pub category: Option<f64>,
}

impl GraphDescriptor {
    /// Descriptor for a plain indicator column.
    pub fn new(name: impl Into<String>, kind: SeriesKind, price_related: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            price_related,
            panel_index: 0,
            color: None,
            marker: MarkerSymbol::None,
            unit: UNIT_AXIS_TITLE.to_string(),
            category: None,
        }
    }

    /// Categorical sub-series of `column`, keyed by `value`.
    ///
    /// The composed name is `"{label}_{column}"`; the overlay engine plots
    /// the close price at the timestamps where the column equals `value`,
    /// overlaying discrete events onto the price series.
    pub fn category(
        label: impl AsRef<str>,
        column: impl AsRef<str>,
        value: f64,
        kind: SeriesKind,
    ) -> Self {
        let mut descriptor = Self::new(
            format!("{}_{}", label.as_ref(), column.as_ref()),
            kind,
            true,
        );
        descriptor.category = Some(value);
        descriptor
    }

    pub fn with_panel(mut self, panel_index: usize) -> Self {
        self.panel_index = panel_index;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_marker(mut self, marker: MarkerSymbol) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Whether this descriptor applies to the given column: exact name or
    /// name-substring-but-not-equal (categorical decomposition).
    pub fn matches_column(&self, column: &str) -> bool {
        let name = self.name.to_lowercase();
        let column = column.to_lowercase();
        name == column || (name.contains(&column) && name != column)
    }

    /// Whether this descriptor is a categorical sub-series of the column.
    pub fn is_category_of(&self, column: &str) -> bool {
        !self.name.eq_ignore_ascii_case(column) && self.matches_column(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let d = GraphDescriptor::new("sma_20", SeriesKind::Line, true);
        assert!(d.matches_column("sma_20"));
        assert!(d.matches_column("SMA_20"));
        assert!(!d.is_category_of("sma_20"));
        assert!(!d.matches_column("rsi"));
    }

    #[test]
    fn test_category_match() {
        let d = GraphDescriptor::category("Up", "insight", 1.0, SeriesKind::Scatter);
        assert_eq!(d.name, "Up_insight");
        assert!(d.price_related);
        assert_eq!(d.category, Some(1.0));
        assert!(d.matches_column("insight"));
        assert!(d.is_category_of("insight"));
        assert!(!d.matches_column("signal"));
    }

    #[test]
    fn test_builder_chain() {
        let d = GraphDescriptor::new("rsi", SeriesKind::Line, false)
            .with_panel(2)
            .with_color("rgb(200, 100, 0)")
            .with_marker(MarkerSymbol::Circle)
            .with_unit("%");
        assert_eq!(d.panel_index, 2);
        assert_eq!(d.unit, "%");
        assert_eq!(d.marker, MarkerSymbol::Circle);
    }
}
