//! Static HTML export for figures and dashboards.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{ChartError, Result};

use super::PlotTarget;

const HTML_HEADER: &str = "<html><head></head><body>\n";
const HTML_FOOTER: &str = "</body></html>\n";

/// Serialize every figure in the target and concatenate the fragments into
/// one static page at `path`.
pub fn save_plot_as_html(target: &PlotTarget, path: impl AsRef<Path>) -> Result<()> {
    let figures = target.figures();
    if figures.is_empty() {
        return Err(ChartError::EmptyPlot);
    }

    let path = path.as_ref();
    let mut file = File::create(path)?;
    file.write_all(HTML_HEADER.as_bytes())?;
    for (ix, figure) in figures.iter().enumerate() {
        let fragment = figure.to_inline_html(&format!("chart-lab-{}", ix));
        file.write_all(fragment.as_bytes())?;
    }
    file.write_all(HTML_FOOTER.as_bytes())?;

    info!("saved {} charts to {}", figures.len(), path.display());
    Ok(())
}
