use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::config::MovePct;
use crate::domain::EarningsTiming;

/// Which event window produced the selected move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum UsedWindow {
    /// D-1 close to D0 close, the gap a before-market report lands in.
    #[strum(to_string = "BMO_like")]
    BmoLike,
    /// D0 close to D+1 close, the gap an after-market report lands in.
    #[strum(to_string = "AMC_like")]
    AmcLike,
}

/// Realized move around one historical earnings event. Constructed once by
/// the move computation and never mutated; every field that depends on data
/// availability is optional, and `note` records which inputs were missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsEventMove {
    pub earnings_date: NaiveDate,
    pub timing: EarningsTiming,

    pub d_m1: Option<NaiveDate>,
    pub d0: Option<NaiveDate>,
    pub d_p1: Option<NaiveDate>,

    pub close_dm1: Option<f64>,
    pub close_d0: Option<f64>,
    pub close_dp1: Option<f64>,

    /// |close(D0)/close(D-1) - 1|
    pub move_bmo_like: Option<MovePct>,
    /// |close(D+1)/close(D0) - 1|
    pub move_amc_like: Option<MovePct>,

    /// The move the timing tag selects. Always equal to one of the two
    /// candidates above, never synthesized from partial data.
    pub move_used: Option<MovePct>,
    pub used_window: Option<UsedWindow>,

    /// Pipe-joined missing-input markers; empty when all inputs were present.
    pub note: String,
}

/// Distributional summary of realized earnings moves for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsMoveStats {
    pub n_events_total: usize,
    pub n_events_used: usize,

    pub mean_move: Option<MovePct>,
    pub median_move: Option<MovePct>,
    pub p75_move: Option<MovePct>,
    pub max_move: Option<MovePct>,

    /// 0..100: fraction of historical moves at or below the implied move.
    pub implied_percentile_rank: Option<f64>,

    /// Whether enough usable events exist to trust the distribution.
    pub history_ok: bool,
}
