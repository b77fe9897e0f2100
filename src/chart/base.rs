//! Base constants for the chart module.

// Trace names used for title composition
pub const OHLC_TRACE_NAME: &str = "OHLC";
pub const VOLUME_TRACE_NAME: &str = "Volume";

// Volume bars use the original muted blue
pub const VOLUME_COLOR: &str = "rgb(7, 89, 148)";
pub const VOLUME_OPACITY: f64 = 0.5;
pub const OVERLAY_OPACITY: f64 = 0.5;

// Axis styling (white background, dark ticks and grid)
pub const PLOT_BGCOLOR: &str = "rgb(255, 255, 255)";
pub const TICK_COLOR: &str = "rgba(0,0,0,0.75)";
pub const GRID_COLOR: &str = "rgba(0,0,0,0.25)";
pub const ZEROLINE_COLOR: &str = "black";

// Default axis titles
pub const X_AXIS_TITLE: &str = "Date";
pub const PRICE_AXIS_TITLE: &str = "Price";
pub const UNIT_AXIS_TITLE: &str = "Unit";

// Placeholder title for freshly created sub-panels
pub const PANEL_PLACEHOLDER_TITLE: &str = "Plot";

// Main panel keeps 70% of the height when sub-panels exist
pub const MAIN_PANEL_HEIGHT: f64 = 0.7;

// One calendar day in milliseconds, used for x-axis range breaks
pub const DAY_MILLIS: i64 = 86_400_000;

/// Split the vertical space among panels, top to bottom.
///
/// A single panel takes the full height. With sub-panels, the main panel
/// keeps [`MAIN_PANEL_HEIGHT`] and the rest is divided evenly.
pub fn panel_heights(panel_count: usize) -> Vec<f64> {
    match panel_count {
        0 => Vec::new(),
        1 => vec![1.0],
        n => {
            let extra = (1.0 - MAIN_PANEL_HEIGHT) / (n - 1) as f64;
            let mut heights = vec![MAIN_PANEL_HEIGHT];
            heights.extend(std::iter::repeat(extra).take(n - 1));
            heights
        }
    }
}

/// Convert panel heights into `[lower, upper]` y-domains, top panel first.
pub fn panel_domains(heights: &[f64]) -> Vec<(f64, f64)> {
    let mut domains = Vec::with_capacity(heights.len());
    let mut upper = 1.0;
    for height in heights {
        let lower = (upper - height).max(0.0);
        domains.push((lower, upper));
        upper = lower;
    }
    domains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_heights_single() {
        assert_eq!(panel_heights(1), vec![1.0]);
    }

    #[test]
    fn test_panel_heights_split() {
        let heights = panel_heights(3);
        assert_eq!(heights.len(), 3);
        assert!((heights[0] - 0.7).abs() < 1e-9);
        assert!((heights[1] - 0.15).abs() < 1e-9);
        assert!((heights[2] - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_panel_domains_stack_downwards() {
        let domains = panel_domains(&[0.7, 0.15, 0.15]);
        assert!((domains[0].1 - 1.0).abs() < 1e-9);
        assert!((domains[0].0 - 0.3).abs() < 1e-9);
        assert!((domains[1].1 - 0.3).abs() < 1e-9);
        assert!(domains[2].0.abs() < 1e-9);
    }
}
