use itertools::Itertools;

use crate::analysis::stats::sample_std_dev;
use crate::config::{ANALYSIS, VolFrac};

/// Annualized realized volatility from the trailing `window` daily log
/// returns of `closes` (oldest to newest).
///
/// Needs `window + 1` closes and at least 2 returns. A non-positive close
/// anywhere in the trailing window invalidates the whole estimate; a bad
/// print is not something to interpolate over.
pub fn realized_vol_annualized(closes: &[f64], window: usize) -> Option<VolFrac> {
    if closes.len() < window + 1 {
        return None;
    }

    let tail = &closes[closes.len() - (window + 1)..];
    if tail.iter().any(|c| *c <= 0.0) {
        return None;
    }

    let returns: Vec<f64> = tail
        .iter()
        .copied()
        .tuple_windows()
        .map(|(prev, next)| (next / prev).ln())
        .collect();

    let sd = sample_std_dev(&returns)?;
    Some(VolFrac::new(sd * ANALYSIS.trading_days_per_year.sqrt()))
}
