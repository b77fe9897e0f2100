//! Alpha module: overlays strategy-derived indicator series onto charts.

pub mod descriptor;
pub mod overlay;

pub use descriptor::GraphDescriptor;
pub use overlay::plot_alphas;
