//! Trace types serialized to plotly-compatible JSON.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::base::{VOLUME_COLOR, VOLUME_OPACITY, VOLUME_TRACE_NAME};

/// Kind of series drawn for an indicator column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    Line,
    Scatter,
    Bar,
    StackedArea,
    Pie,
}

/// Marker shape for scatter traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarkerSymbol {
    #[default]
    None,
    Circle,
    Square,
    Diamond,
    Triangle,
    TriangleDown,
}

impl MarkerSymbol {
    /// Plotly symbol name, or `None` when no explicit symbol is requested.
    pub fn as_plotly(&self) -> Option<&'static str> {
        match self {
            MarkerSymbol::None => None,
            MarkerSymbol::Circle => Some("circle"),
            MarkerSymbol::Square => Some("square"),
            MarkerSymbol::Diamond => Some("diamond"),
            MarkerSymbol::Triangle => Some("triangle-up"),
            MarkerSymbol::TriangleDown => Some("triangle-down"),
        }
    }
}

/// Scatter drawing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterMode {
    Lines,
    Markers,
}

impl ScatterMode {
    fn as_plotly(&self) -> &'static str {
        match self {
            ScatterMode::Lines => "lines",
            ScatterMode::Markers => "markers",
        }
    }
}

/// A single chart trace with its panel assignment.
#[derive(Debug, Clone)]
pub struct Trace {
    /// Display name, also used for title composition and panel titling.
    pub name: String,
    /// Target panel, 1-based. Panel 1 is the price panel.
    pub panel: usize,
    /// Draw on panel 1's secondary ("Unit") axis instead of the price axis.
    pub on_unit_axis: bool,
    pub data: TraceData,
}

/// Payload of a trace.
#[derive(Debug, Clone)]
pub enum TraceData {
    Candlestick {
        x: Vec<String>,
        open: Vec<Option<f64>>,
        high: Vec<Option<f64>>,
        low: Vec<Option<f64>>,
        close: Vec<Option<f64>>,
    },
    Bar {
        x: Vec<String>,
        y: Vec<f64>,
        color: Option<String>,
        opacity: Option<f64>,
    },
    Scatter {
        x: Vec<String>,
        y: Vec<f64>,
        mode: ScatterMode,
        color: Option<String>,
        symbol: MarkerSymbol,
        opacity: Option<f64>,
        stacked: bool,
    },
    Pie {
        labels: Vec<String>,
        values: Vec<f64>,
    },
}

impl Trace {
    /// Candlestick trace for the main price panel.
    pub fn candlestick(
        name: impl Into<String>,
        x: Vec<String>,
        open: Vec<Option<f64>>,
        high: Vec<Option<f64>>,
        low: Vec<Option<f64>>,
        close: Vec<Option<f64>>,
    ) -> Self {
        Self {
            name: name.into(),
            panel: 1,
            on_unit_axis: false,
            data: TraceData::Candlestick {
                x,
                open,
                high,
                low,
                close,
            },
        }
    }

    /// Volume bar trace on panel 1's secondary axis.
    pub fn volume(x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            name: VOLUME_TRACE_NAME.to_string(),
            panel: 1,
            on_unit_axis: true,
            data: TraceData::Bar {
                x,
                y,
                color: Some(VOLUME_COLOR.to_string()),
                opacity: Some(VOLUME_OPACITY),
            },
        }
    }

    /// Line trace.
    pub fn line(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            panel: 1,
            on_unit_axis: false,
            data: TraceData::Scatter {
                x,
                y,
                mode: ScatterMode::Lines,
                color: None,
                symbol: MarkerSymbol::None,
                opacity: None,
                stacked: false,
            },
        }
    }

    /// Whether this trace is a candlestick.
    pub fn is_candlestick(&self) -> bool {
        matches!(self.data, TraceData::Candlestick { .. })
    }

    /// Timestamps and close prices of a candlestick trace.
    pub fn candle_closes(&self) -> Option<(&[String], &[Option<f64>])> {
        match &self.data {
            TraceData::Candlestick { x, close, .. } => Some((x.as_slice(), close.as_slice())),
            _ => None,
        }
    }

    /// Serialize the trace for a `Plotly.newPlot` data array.
    ///
    /// `xaxis`/`yaxis` are the plotly axis ids computed from the panel
    /// arrangement. Pie traces ignore the axes and take the panel's y-domain
    /// directly.
    pub fn to_json(&self, xaxis: &str, yaxis: &str, domain: (f64, f64)) -> Value {
        match &self.data {
            TraceData::Candlestick {
                x,
                open,
                high,
                low,
                close,
            } => json!({
                "type": "candlestick",
                "name": self.name,
                "x": x,
                "open": open,
                "high": high,
                "low": low,
                "close": close,
                "xaxis": xaxis,
                "yaxis": yaxis,
            }),
            TraceData::Bar { x, y, color, opacity } => {
                let mut value = json!({
                    "type": "bar",
                    "name": self.name,
                    "x": x,
                    "y": y,
                    "xaxis": xaxis,
                    "yaxis": yaxis,
                });
                if let Some(color) = color {
                    value["marker"] = json!({ "color": color });
                }
                if let Some(opacity) = opacity {
                    value["opacity"] = json!(opacity);
                }
                value
            }
            TraceData::Scatter {
                x,
                y,
                mode,
                color,
                symbol,
                opacity,
                stacked,
            } => {
                let mut value = json!({
                    "type": "scatter",
                    "name": self.name,
                    "x": x,
                    "y": y,
                    "mode": mode.as_plotly(),
                    "xaxis": xaxis,
                    "yaxis": yaxis,
                });
                let mut marker = serde_json::Map::new();
                if let Some(color) = color {
                    marker.insert("color".to_string(), json!(color));
                }
                if let Some(symbol) = symbol.as_plotly() {
                    marker.insert("symbol".to_string(), json!(symbol));
                }
                if !marker.is_empty() {
                    value["marker"] = Value::Object(marker);
                }
                if let Some(opacity) = opacity {
                    value["opacity"] = json!(opacity);
                }
                if *stacked {
                    value["stackgroup"] = json!("one");
                    value["fill"] = json!("tonexty");
                }
                value
            }
            TraceData::Pie { labels, values } => json!({
                "type": "pie",
                "name": self.name,
                "labels": labels,
                "values": values,
                "domain": { "x": [0.0, 1.0], "y": [domain.0, domain.1] },
            }),
        }
    }
}
