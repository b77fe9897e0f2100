//! Chart module for building candlestick, volume and indicator figures.
//!
//! This module provides:
//! - `Trace` / `TraceData` - plotly-compatible trace payloads
//! - `Figure` / `Panel` - trace collection plus stacked-panel layout
//! - `builder` - price table to base figure conversion
//!
//! # Example
//!
//! ```ignore
//! use chart_lab::chart::{builder, TimeAxis};
//!
//! let figure = builder::single_symbol_figure(&df, "BTCUSDT ", TimeAxis::Date)?;
//! println!("{}", figure.to_inline_html("chart-0"));
//! ```

mod base;
pub mod builder;
mod figure;
mod trace;

pub use base::*;
pub use figure::{Figure, Panel, TimeAxis};
pub use trace::{MarkerSymbol, ScatterMode, SeriesKind, Trace, TraceData};
