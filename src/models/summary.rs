use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{MovePct, VolFrac};

use super::EarningsMoveStats;

/// Everything one diagnostics run produced for a symbol. Fields mirror the
/// summary row of the report; anything the run could not establish stays
/// `None` and renders blank rather than aborting the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsSummary {
    pub symbol: String,
    pub run_date: String,

    pub skew_trade_date: Option<String>,
    pub spot: Option<f64>,

    pub next_earnings_date: Option<NaiveDate>,
    pub next_time_hint: Option<String>,

    pub front_expiry: Option<NaiveDate>,
    pub back_expiry: Option<NaiveDate>,
    pub atm_strike_used: Option<f64>,
    pub atm_iv_front: Option<f64>,
    pub atm_iv_back: Option<f64>,
    pub term_slope: Option<f64>,
    pub term_ratio: Option<f64>,

    pub implied_move: Option<MovePct>,

    pub avg_vol_30: Option<f64>,
    pub rv20: Option<VolFrac>,
    pub rv30: Option<VolFrac>,
    pub iv_rv20: Option<f64>,
    pub iv_rv30: Option<f64>,

    pub move_stats: EarningsMoveStats,
}
