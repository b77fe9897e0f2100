//! Chart Lab - financial charting and dashboard toolkit for quant research
//!
//! This crate turns tabular time-series data into interactive financial
//! charts and composes them into exportable dashboards:
//!
//! - Candlestick + volume base charts from price tables
//! - Per-symbol dashboards from multi-symbol tables
//! - Trace lookup/append by figure title
//! - Alpha indicator overlays with automatic sub-panel layout
//! - Static HTML export rendered through plotly.js
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chart_lab::chart::TimeAxis;
//! use chart_lab::dashboard::{plot, save_plot_as_html};
//!
//! fn main() -> chart_lab::Result<()> {
//!     # let df = polars::prelude::DataFrame::empty();
//!     let target = plot(&df, "BTCUSDT ", TimeAxis::Date)?;
//!     save_plot_as_html(&target, "dashboard.html")?;
//!     Ok(())
//! }
//! ```

pub mod alpha;
pub mod chart;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use alpha::{plot_alphas, GraphDescriptor};
pub use chart::{Figure, MarkerSymbol, Panel, SeriesKind, TimeAxis, Trace, TraceData};
pub use dashboard::{add_to_figure, add_to_plot, plot, save_plot_as_html, Dashboard, PlotTarget};
pub use error::{ChartError, Result};
pub use logger::init_logger;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
