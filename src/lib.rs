// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate
pub use crate::analysis::window::TickWindow;
pub use crate::domain::Tick;
pub use crate::engine::ScopeEngine;
pub use crate::models::ScopeSnapshot;

use crate::config::{AnalysisMode, WindowRange};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Market symbol to analyze (e.g. R_100)
    #[arg(long, default_value = "R_100")]
    pub market: String,

    /// How many recent ticks each analysis draws on
    #[arg(long, value_enum, default_value_t = WindowRange::default())]
    pub range: WindowRange,

    /// Active analysis mode
    #[arg(long, value_enum, default_value_t = AnalysisMode::default())]
    pub mode: AnalysisMode,

    /// Show every mode's report side by side instead of one
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Fetch one history batch, print the analysis, and exit
    #[arg(long, default_value_t = false)]
    pub once: bool,

    /// Emit snapshots as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Websocket application id (defaults to the public demo id)
    #[arg(long)]
    pub app_id: Option<String>,
}
