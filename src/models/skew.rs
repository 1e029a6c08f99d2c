use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One ATM reading from the skew snapshot DB: a single (trade date, expiry)
/// cell with its at-the-money strike and implied volatility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkewRow {
    pub trade_date: String,
    pub symbol: String,
    pub expiry: NaiveDate,
    pub dte: i64,
    pub spot: f64,
    pub atm_strike: f64,
    pub atm_iv: f64,
}
