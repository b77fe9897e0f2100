//! Error types for the charting toolkit.

use thiserror::Error;

/// Errors raised while building, composing or exporting charts.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The plot target contains no figures.
    #[error("plot has no data")]
    EmptyPlot,

    /// Single-symbol data was plotted without a title prefix.
    #[error("pre_title_text is required when plotting single symbol data")]
    MissingTitlePrefix,

    /// A trace was appended to multiple figures without a title selector.
    #[error("graph_identifier cannot be empty when passing in multiple graphs")]
    MissingIdentifier,

    /// No figure title contained the given selector.
    #[error("graph_identifier={identifier} was not in any graph title. Options are {titles:?}")]
    TitleNotFound {
        identifier: String,
        titles: Vec<String>,
    },

    /// A required column is missing from the dataframe.
    #[error("{0} is not a column in the dataframe")]
    MissingColumn(String),

    /// The timestamp column has a null row.
    #[error("datetime column contains a null value")]
    NullDatetime,

    /// A column had an unexpected dtype or failed to materialize.
    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChartError>;
