//! Configuration module for the tick analyzer.

mod analysis;
mod deriv;

// Public
pub mod constants;

// Re-export commonly used items
pub use analysis::{AnalysisConfig, AnalysisMode, WindowRange};
pub use deriv::{DERIV, DerivConfig, Market, MARKETS, ws_url};
