use anyhow::{Result, bail};
use chrono::{Days, NaiveDate};

use crate::config::ANALYSIS;
use crate::models::SkewRow;

/// Slope and ratio between two ATM implied-volatility readings.
///
/// Positive slope means the front expiry carries more IV than the back
/// (event premium loaded into the near expiry). Either input missing, or a
/// non-positive back IV, yields no value for both.
pub fn term_slope_ratio(
    iv_front: Option<f64>,
    iv_back: Option<f64>,
) -> (Option<f64>, Option<f64>) {
    match (iv_front, iv_back) {
        (Some(front), Some(back)) if back > 0.0 => (Some(front - back), Some(front / back)),
        _ => (None, None),
    }
}

/// Selects the front/back expiry pair from a skew snapshot.
///
/// With a known earnings date only expiries on/after it are eligible; the
/// front is the earliest eligible expiry and the back is the remaining
/// expiry nearest to front + 30 calendar days. Without an earnings date the
/// same rule runs over all rows. Fewer than two candidates is an error: the
/// caller cannot build a term structure from one point.
pub fn pick_front_back(
    rows: &[SkewRow],
    earnings_date: Option<NaiveDate>,
) -> Result<(&SkewRow, &SkewRow)> {
    let mut eligible: Vec<&SkewRow> = match earnings_date {
        Some(e_date) => rows.iter().filter(|r| r.expiry >= e_date).collect(),
        None => rows.iter().collect(),
    };

    if eligible.len() < 2 {
        bail!(
            "need >=2 eligible expiries for term structure (earnings_date={:?}, eligible={}, total={})",
            earnings_date,
            eligible.len(),
            rows.len()
        );
    }

    eligible.sort_by_key(|r| r.expiry);
    let front = eligible[0];

    let target = front
        .expiry
        .checked_add_days(Days::new(ANALYSIS.back_expiry_gap_days as u64))
        .unwrap_or(front.expiry);

    let back = eligible[1..]
        .iter()
        .min_by_key(|r| (r.expiry - target).num_days().abs())
        .copied()
        .expect("eligible has >=2 rows");

    Ok((front, back))
}
