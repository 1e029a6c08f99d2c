#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types outside of crate (for the binaries)
pub use analysis::{
    compute_event_moves, realized_vol_annualized, summarize_moves, term_slope_ratio,
};
pub use domain::{EarningsBundle, EarningsEvent, EarningsTiming, TradingDayIndex};
pub use models::{DailyBar, EarningsEventMove, EarningsMoveStats};

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Underlying symbol to analyze
    #[arg(long)]
    pub symbol: String,

    /// Locally owned daily-bar SQLite database
    #[arg(long, default_value = "data/underlying_daily.sqlite")]
    pub underlying_db: String,

    /// Skew snapshot SQLite database (read only)
    #[arg(long, default_value = "data/skew_daily.sqlite")]
    pub skew_db: String,

    /// Earnings calendar bundle (JSON) produced by the calendar fetcher
    #[arg(long)]
    pub earnings_file: Option<PathBuf>,

    /// Current implied move as a fraction (e.g. 0.045 for 4.5%)
    #[arg(long)]
    pub implied_move: Option<f64>,

    /// Directory for the rendered report
    #[arg(long, default_value = "data/out/earnings_edge")]
    pub out_dir: PathBuf,
}
