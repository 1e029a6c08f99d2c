//! Earnings calendar input.
//!
//! Calendar retrieval lives outside this tool; it hands over a JSON bundle
//! of the next known announcement plus recent past announcements:
//!
//! ```json
//! {
//!   "symbol": "AAPL",
//!   "next_earnings_date": "2024-05-02",
//!   "next_time_hint": "amc",
//!   "past": [
//!     { "date": "2024-02-01", "time": "AMC" },
//!     { "date": "2023-11-02", "time": "after market close" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::{EarningsBundle, EarningsEvent, EarningsTiming};
use crate::utils::parse_ymd;

#[derive(Debug, Deserialize)]
struct RawBundle {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    next_earnings_date: Option<String>,
    #[serde(default)]
    next_time_hint: Option<String>,
    #[serde(default)]
    past: Vec<RawPastEvent>,
}

#[derive(Debug, Deserialize)]
struct RawPastEvent {
    date: String,
    #[serde(default)]
    time: Option<String>,
}

pub fn load_earnings_bundle(path: &Path, symbol: &str, max_past: usize) -> Result<EarningsBundle> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading earnings file {}", path.display()))?;
    parse_earnings_bundle(&text, symbol, max_past)
        .with_context(|| format!("parsing earnings file {}", path.display()))
}

fn parse_earnings_bundle(text: &str, symbol: &str, max_past: usize) -> Result<EarningsBundle> {
    let raw: RawBundle = serde_json::from_str(text).context("invalid earnings JSON")?;

    let next_earnings_date = raw
        .next_earnings_date
        .as_deref()
        .map(parse_ymd)
        .transpose()?;

    // Dedup by date, first record wins; BTreeMap keeps chronological order.
    let mut by_date: BTreeMap<chrono::NaiveDate, EarningsTiming> = BTreeMap::new();
    for record in &raw.past {
        let date = parse_ymd(&record.date)?;
        by_date
            .entry(date)
            .or_insert_with(|| EarningsTiming::from_hint(record.time.as_deref()));
    }

    let mut past_events: Vec<EarningsEvent> = by_date
        .into_iter()
        .map(|(date, timing)| EarningsEvent { date, timing })
        .collect();

    // Keep only the most recent max_past, still oldest to newest.
    if past_events.len() > max_past {
        past_events.drain(..past_events.len() - max_past);
    }

    Ok(EarningsBundle {
        symbol: raw.symbol.unwrap_or_else(|| symbol.to_uppercase()),
        next_earnings_date,
        next_time_hint: raw.next_time_hint,
        past_events,
    })
}
