//! Seeds a self-contained demo data set (underlying bars, skew snapshot,
//! earnings bundle) so the main binary can run end-to-end offline:
//!
//!   cargo run --bin seed_demo
//!   cargo run -- --symbol DEMO \
//!       --underlying-db data/demo/underlying_daily.sqlite \
//!       --skew-db data/demo/skew_daily.sqlite \
//!       --earnings-file data/demo/earnings.json \
//!       --implied-move 0.045

use anyhow::{Context, Result};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde_json::json;

use earnings_edge::data::{BarStore, SqliteBarStore, SqliteSkewStore};
use earnings_edge::models::{DailyBar, SkewRow};

const DEMO_SYMBOL: &str = "DEMO";
const DEMO_DIR: &str = "data/demo";
const DEMO_BARS: usize = 320;

/// Deterministic wiggle so repeated seeding produces identical data.
fn daily_return(i: usize) -> f64 {
    let x = i as f64;
    0.012 * (x * 0.7).sin() + 0.004 * (x * 0.131).cos()
}

fn demo_bars(last_day: NaiveDate) -> Vec<DailyBar> {
    let mut dates = Vec::with_capacity(DEMO_BARS);
    let mut day = last_day;
    while dates.len() < DEMO_BARS {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(day);
        }
        day = day.checked_sub_days(Days::new(1)).expect("date underflow");
    }
    dates.reverse();

    let mut close = 100.0;
    dates
        .iter()
        .enumerate()
        .map(|(i, date)| {
            close *= 1.0 + daily_return(i);
            DailyBar {
                date: *date,
                close: (close * 100.0).round() / 100.0,
                volume: 1_000_000 + (i as i64 % 17) * 35_000,
            }
        })
        .collect()
}

fn demo_skew_rows(trade_date: NaiveDate, spot: f64) -> Vec<SkewRow> {
    let atm_strike = (spot / 5.0).round() * 5.0;
    [(14, 0.52), (56, 0.38), (84, 0.35), (147, 0.33)]
        .into_iter()
        .map(|(dte, atm_iv)| SkewRow {
            trade_date: trade_date.to_string(),
            symbol: DEMO_SYMBOL.into(),
            expiry: trade_date
                .checked_add_days(Days::new(dte))
                .expect("date overflow"),
            dte: dte as i64,
            spot,
            atm_strike,
            atm_iv,
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    std::fs::create_dir_all(DEMO_DIR).context("creating demo dir")?;

    let last_day: NaiveDate = "2024-04-26".parse()?;
    let bars = demo_bars(last_day);
    log::info!(
        "seeding {} bars for {DEMO_SYMBOL} ({} .. {})",
        bars.len(),
        bars.first().map(|b| b.date.to_string()).unwrap_or_default(),
        bars.last().map(|b| b.date.to_string()).unwrap_or_default()
    );

    let bar_db = format!("{DEMO_DIR}/underlying_daily.sqlite");
    let bar_store = SqliteBarStore::new(&bar_db).await?;
    let written = bar_store.upsert_bars(DEMO_SYMBOL, &bars).await?;
    log::info!("underlying rows written: {written} -> {bar_db}");

    let spot = bars.last().map(|b| b.close).unwrap_or(100.0);
    let skew_db = format!("{DEMO_DIR}/skew_daily.sqlite");
    let skew_store = SqliteSkewStore::new(&skew_db).await?;
    skew_store.ensure_schema().await?;
    for row in demo_skew_rows(last_day, spot) {
        skew_store.insert_row(&row).await?;
    }
    log::info!("skew snapshot written -> {skew_db}");

    let earnings = json!({
        "symbol": DEMO_SYMBOL,
        "next_earnings_date": "2024-05-02",
        "next_time_hint": "amc",
        "past": [
            { "date": "2023-05-04", "time": "AMC" },
            { "date": "2023-08-03", "time": "AMC" },
            { "date": "2023-11-02", "time": "amc" },
            { "date": "2024-02-01", "time": "After Market Close" }
        ]
    });
    let earnings_path = format!("{DEMO_DIR}/earnings.json");
    std::fs::write(&earnings_path, serde_json::to_string_pretty(&earnings)?)
        .context("writing demo earnings bundle")?;
    log::info!("earnings bundle written -> {earnings_path}");

    log::info!("demo data ready");
    Ok(())
}
