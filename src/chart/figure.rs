//! Figure model: an ordered collection of traces plus layout metadata.
//!
//! Figures are not persisted; they live for the duration of a research
//! session or an export pass. The title is the only identifier used for
//! later lookup, so titles should stay unique within a dashboard.

use serde_json::{json, Value};

use super::base::{
    panel_domains, panel_heights, DAY_MILLIS, GRID_COLOR, PANEL_PLACEHOLDER_TITLE,
    PLOT_BGCOLOR, PRICE_AXIS_TITLE, TICK_COLOR, UNIT_AXIS_TITLE, X_AXIS_TITLE, ZEROLINE_COLOR,
};
use super::trace::Trace;

/// X-axis treatment. The modes are mutually exclusive and selected by the
/// caller, never negotiated automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeAxis {
    /// Plain date axis, gaps included.
    #[default]
    Date,
    /// Date axis with range breaks over the calendar days absent from the
    /// index (non-trading gaps removed).
    HideGaps,
    /// Ordered category axis.
    Category,
}

/// One row of the stacked layout.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Display title, rendered as an annotation above the panel.
    pub title: String,
    /// Y-axis title.
    pub axis_title: String,
    /// Fraction of the total figure height.
    pub height: f64,
}

/// A chart: traces plus layout bookkeeping.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub traces: Vec<Trace>,
    pub panels: Vec<Panel>,
    pub time_axis: TimeAxis,
    /// Calendar days (`YYYY-MM-DD`) skipped by [`TimeAxis::HideGaps`].
    pub hidden_dates: Vec<String>,
}

impl Figure {
    /// Create an empty figure with a single price panel.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            traces: Vec::new(),
            panels: vec![Panel {
                title: String::new(),
                axis_title: PRICE_AXIS_TITLE.to_string(),
                height: 1.0,
            }],
            time_axis: TimeAxis::Date,
            hidden_dates: Vec::new(),
        }
    }

    /// Append a trace.
    pub fn add_trace(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }

    /// Rebuild the panel stack for `extra` sub-panels below the price panel.
    ///
    /// The price panel keeps its traces and 70% of the height; each new
    /// sub-panel starts with the `"Plot"` placeholder title, to be
    /// overwritten or merged by the overlay pass.
    pub fn set_sub_panels(&mut self, extra: usize) {
        let heights = panel_heights(extra + 1);
        let main_title = self.panels.first().map(|p| p.title.clone()).unwrap_or_default();

        let mut panels = vec![Panel {
            title: main_title,
            axis_title: PRICE_AXIS_TITLE.to_string(),
            height: heights[0],
        }];
        for height in &heights[1..] {
            panels.push(Panel {
                title: PANEL_PLACEHOLDER_TITLE.to_string(),
                axis_title: UNIT_AXIS_TITLE.to_string(),
                height: *height,
            });
        }
        self.panels = panels;
    }

    /// Timestamps and close prices of the candlestick trace, if any.
    pub fn candle_closes(&self) -> Option<(&[String], &[Option<f64>])> {
        self.traces.iter().find_map(|t| t.candle_closes())
    }

    /// Whether any trace draws on panel 1's secondary axis.
    fn has_unit_axis(&self) -> bool {
        self.traces.iter().any(|t| t.on_unit_axis)
    }

    /// Plotly axis id for a trace, derived from its panel assignment.
    ///
    /// Panel 1 owns `y` (price) and `y2` (unit/volume overlay); sub-panel at
    /// ordinal `p` owns `y{p+1}`.
    fn yaxis_id(trace: &Trace) -> String {
        if trace.panel <= 1 {
            if trace.on_unit_axis {
                "y2".to_string()
            } else {
                "y".to_string()
            }
        } else {
            format!("y{}", trace.panel + 1)
        }
    }

    /// Serialize to a `{ data, layout }` plotly figure object.
    pub fn to_json(&self) -> Value {
        let domains = panel_domains(
            &self
                .panels
                .iter()
                .map(|p| p.height)
                .collect::<Vec<_>>(),
        );

        let data: Vec<Value> = self
            .traces
            .iter()
            .map(|trace| {
                let panel_ix = trace.panel.saturating_sub(1).min(domains.len() - 1);
                trace.to_json("x", &Self::yaxis_id(trace), domains[panel_ix])
            })
            .collect();

        json!({ "data": data, "layout": self.layout_json(&domains) })
    }

    fn layout_json(&self, domains: &[(f64, f64)]) -> Value {
        let mut xaxis = json!({
            "title": { "text": X_AXIS_TITLE },
            "rangeslider": { "visible": false },
        });
        match self.time_axis {
            TimeAxis::Date => {
                xaxis["type"] = json!("date");
            }
            TimeAxis::HideGaps => {
                xaxis["type"] = json!("date");
                if !self.hidden_dates.is_empty() {
                    xaxis["rangebreaks"] = json!([{
                        "values": self.hidden_dates,
                        "dvalue": DAY_MILLIS,
                    }]);
                }
            }
            TimeAxis::Category => {
                xaxis["type"] = json!("category");
            }
        }

        let mut layout = json!({
            "title": { "text": self.title, "x": 0.5 },
            "plot_bgcolor": PLOT_BGCOLOR,
            "legend": { "x": 1.05, "y": 1.0 },
            "xaxis": xaxis,
        });

        // Price axis on panel 1
        layout["yaxis"] = json!({
            "title": { "text": self.panels[0].axis_title },
            "domain": [domains[0].0, domains[0].1],
            "tickcolor": TICK_COLOR,
            "gridcolor": GRID_COLOR,
            "zerolinecolor": ZEROLINE_COLOR,
        });

        // Secondary axis overlaying panel 1 (volume and unit traces)
        if self.has_unit_axis() {
            layout["yaxis2"] = json!({
                "title": { "text": UNIT_AXIS_TITLE },
                "overlaying": "y",
                "side": "right",
                "showgrid": false,
            });
        }

        // Sub-panel axes and their title annotations
        let mut annotations = Vec::new();
        for (ix, panel) in self.panels.iter().enumerate().skip(1) {
            let key = format!("yaxis{}", ix + 2);
            layout[key] = json!({
                "title": { "text": panel.axis_title },
                "domain": [domains[ix].0, domains[ix].1],
                "tickcolor": TICK_COLOR,
                "gridcolor": GRID_COLOR,
            });
            annotations.push(json!({
                "text": panel.title,
                "x": 0.5,
                "y": domains[ix].1,
                "xref": "paper",
                "yref": "paper",
                "xanchor": "center",
                "yanchor": "bottom",
                "showarrow": false,
            }));
        }
        if !annotations.is_empty() {
            layout["annotations"] = Value::Array(annotations);
        }

        layout
    }

    /// Render a self-contained HTML fragment for this figure.
    ///
    /// The fragment holds the target div, the plotly.js loader and the
    /// `Plotly.newPlot` call; fragments from several figures can be
    /// concatenated into one page.
    pub fn to_inline_html(&self, div_id: &str) -> String {
        let figure = self.to_json();
        format!(
            concat!(
                "<div id=\"{id}\" class=\"plotly-graph-div\"></div>\n",
                "<script src=\"https://cdn.plot.ly/plotly-2.35.2.min.js\" charset=\"utf-8\"></script>\n",
                "<script type=\"text/javascript\">Plotly.newPlot(\"{id}\", {data}, {layout});</script>\n",
            ),
            id = div_id,
            data = figure["data"],
            layout = figure["layout"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure_with_candle() -> Figure {
        let mut fig = Figure::new("BTCUSDT OHLCV");
        fig.add_trace(Trace::candlestick(
            "OHLC",
            vec!["2024-01-01 00:00:00".into(), "2024-01-02 00:00:00".into()],
            vec![Some(1.0), Some(2.0)],
            vec![Some(2.0), Some(3.0)],
            vec![Some(0.5), Some(1.5)],
            vec![Some(1.5), Some(2.5)],
        ));
        fig.add_trace(Trace::volume(
            vec!["2024-01-01 00:00:00".into(), "2024-01-02 00:00:00".into()],
            vec![100.0, 200.0],
        ));
        fig
    }

    #[test]
    fn test_new_figure_has_single_price_panel() {
        let fig = Figure::new("test");
        assert_eq!(fig.panels.len(), 1);
        assert_eq!(fig.panels[0].axis_title, "Price");
        assert_eq!(fig.panels[0].height, 1.0);
    }

    #[test]
    fn test_set_sub_panels_heights() {
        let mut fig = Figure::new("test");
        fig.set_sub_panels(2);
        assert_eq!(fig.panels.len(), 3);
        assert!((fig.panels[0].height - 0.7).abs() < 1e-9);
        assert!((fig.panels[1].height - 0.15).abs() < 1e-9);
        assert_eq!(fig.panels[1].title, "Plot");
        assert_eq!(fig.panels[2].title, "Plot");
    }

    #[test]
    fn test_volume_goes_to_secondary_axis() {
        let fig = figure_with_candle();
        let value = fig.to_json();
        assert_eq!(value["data"][1]["yaxis"], "y2");
        assert_eq!(value["layout"]["yaxis2"]["overlaying"], "y");
    }

    #[test]
    fn test_sub_panel_axis_ids() {
        let mut fig = figure_with_candle();
        fig.set_sub_panels(1);
        fig.add_trace({
            let mut t = Trace::line(
                "rsi",
                vec!["2024-01-01 00:00:00".into()],
                vec![55.0],
            );
            t.panel = 2;
            t
        });
        let value = fig.to_json();
        assert_eq!(value["data"][2]["yaxis"], "y3");
        assert!(value["layout"].get("yaxis3").is_some());
    }

    #[test]
    fn test_hide_gaps_emits_rangebreaks() {
        let mut fig = figure_with_candle();
        fig.time_axis = TimeAxis::HideGaps;
        fig.hidden_dates = vec!["2024-01-06".into(), "2024-01-07".into()];
        let value = fig.to_json();
        let breaks = &value["layout"]["xaxis"]["rangebreaks"][0];
        assert_eq!(breaks["values"].as_array().unwrap().len(), 2);
        assert_eq!(breaks["dvalue"], 86_400_000_i64);
    }

    #[test]
    fn test_category_axis_mode() {
        let mut fig = figure_with_candle();
        fig.time_axis = TimeAxis::Category;
        let value = fig.to_json();
        assert_eq!(value["layout"]["xaxis"]["type"], "category");
    }

    #[test]
    fn test_inline_html_contains_new_plot() {
        let fig = figure_with_candle();
        let html = fig.to_inline_html("chart-0");
        assert_eq!(html.matches("Plotly.newPlot").count(), 1);
        assert!(html.contains("id=\"chart-0\""));
    }
}
