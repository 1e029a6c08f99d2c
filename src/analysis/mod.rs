// Analytics and event-alignment engine
mod earnings_moves;
mod realized_vol;
mod stats;
mod term_structure;

pub use {
    earnings_moves::{compute_event_moves, summarize_moves},
    realized_vol::realized_vol_annualized,
    stats::{average, median, percentile, sample_std_dev},
    term_structure::{pick_front_back, term_slope_ratio},
};
