//! Analysis and computation defaults

pub struct AnalysisDefaults {
    /// Short realized-volatility window (return periods).
    pub rv_window_short: usize,
    /// Long realized-volatility window (return periods).
    pub rv_window_long: usize,
    /// Annualization convention for daily-return series.
    pub trading_days_per_year: f64,

    /// Trailing window for the average-volume diagnostic.
    pub avg_volume_window: usize,
    /// How many stored rows the rolling metrics load.
    pub recent_history_rows: u32,
    /// Minimum stored rows before the move history is considered deep enough.
    pub min_history_rows: u32,

    /// Minimum usable earnings events for a trustworthy distribution.
    pub min_valid_events: usize,
    /// Cap on past earnings events kept from the calendar bundle.
    pub max_past_events: usize,

    /// The back expiry targets front expiry + this many calendar days.
    pub back_expiry_gap_days: i64,
}

pub const ANALYSIS: AnalysisDefaults = AnalysisDefaults {
    rv_window_short: 20,
    rv_window_long: 30,
    trading_days_per_year: 252.0,

    avg_volume_window: 30,
    recent_history_rows: 120,
    min_history_rows: 260,

    min_valid_events: 8,
    max_past_events: 12,

    back_expiry_gap_days: 30,
};
