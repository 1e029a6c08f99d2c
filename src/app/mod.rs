//! One diagnostics run: load local stores, derive the volatility metrics,
//! align earnings history, render the report.
//!
//! Anything a run cannot establish (no skew snapshot, shallow history, no
//! implied move supplied) degrades to blank report fields; the run itself
//! only fails on real I/O or contract errors.

use anyhow::Result;

use crate::Cli;
use crate::analysis::{
    average, compute_event_moves, pick_front_back, realized_vol_annualized, summarize_moves,
    term_slope_ratio,
};
use crate::config::{ANALYSIS, MovePct, VolFrac};
use crate::data::{BarStore, SkewStore, SqliteBarStore, SqliteSkewStore, load_earnings_bundle};
use crate::domain::EarningsBundle;
use crate::models::DiagnosticsSummary;
use crate::report::{render_moves_table, render_summary_table, write_report};
use crate::utils::today_ymd;

fn iv_over_rv(iv: Option<f64>, rv: Option<VolFrac>) -> Option<f64> {
    match (iv, rv) {
        (Some(iv), Some(rv)) if rv.value() > 0.0 => Some(iv / rv.value()),
        _ => None,
    }
}

pub async fn run(args: &Cli) -> Result<()> {
    let symbol = args.symbol.to_uppercase();
    let run_date = today_ymd();
    log::info!("earnings-edge run | symbol={symbol} run_date={run_date}");

    let bar_store = SqliteBarStore::new(&args.underlying_db).await?;
    if !bar_store
        .has_min_history(&symbol, ANALYSIS.min_history_rows)
        .await?
    {
        log::warn!(
            "fewer than {} stored bars for {symbol}; move history may be shallow",
            ANALYSIS.min_history_rows
        );
    }

    // Rolling metrics over the recent window
    let recent = bar_store
        .load_recent(&symbol, ANALYSIS.recent_history_rows)
        .await?;
    log::info!("underlying rows loaded: {}", recent.len());

    let closes: Vec<f64> = recent.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = recent.iter().map(|b| b.volume as f64).collect();

    let avg_vol_30 = if volumes.len() >= ANALYSIS.avg_volume_window {
        average(&volumes[volumes.len() - ANALYSIS.avg_volume_window..])
    } else {
        None
    };
    let rv20 = realized_vol_annualized(&closes, ANALYSIS.rv_window_short);
    let rv30 = realized_vol_annualized(&closes, ANALYSIS.rv_window_long);
    let spot = recent.last().map(|b| b.close);

    // Earnings calendar bundle (optional input file)
    let bundle = match &args.earnings_file {
        Some(path) => load_earnings_bundle(path, &symbol, ANALYSIS.max_past_events)?,
        None => {
            log::warn!("no earnings file supplied; running without event history");
            EarningsBundle {
                symbol: symbol.clone(),
                ..Default::default()
            }
        }
    };
    if let Some(next) = bundle.next_earnings_date {
        log::info!("next earnings: {next} (hint={:?})", bundle.next_time_hint);
    }

    // Term structure from the latest skew snapshot
    let skew_store = SqliteSkewStore::new(&args.skew_db).await?;
    let skew_trade_date = skew_store.latest_trade_date(&symbol).await?;
    let skew_rows = match skew_trade_date.as_deref() {
        Some(trade_date) => skew_store.load_rows(&symbol, trade_date).await?,
        None => {
            log::warn!("no skew snapshot for {symbol}");
            Vec::new()
        }
    };
    log::info!("skew rows loaded: {}", skew_rows.len());

    let mut front_expiry = None;
    let mut back_expiry = None;
    let mut atm_strike_used = None;
    let mut atm_iv_front = None;
    let mut atm_iv_back = None;

    if skew_rows.len() >= 2 {
        match pick_front_back(&skew_rows, bundle.next_earnings_date) {
            Ok((front, back)) => {
                front_expiry = Some(front.expiry);
                back_expiry = Some(back.expiry);
                atm_strike_used = Some(front.atm_strike);
                atm_iv_front = Some(front.atm_iv);
                atm_iv_back = Some(back.atm_iv);
            }
            Err(e) => log::warn!("term structure unavailable: {e:#}"),
        }
    }

    let (term_slope, term_ratio) = term_slope_ratio(atm_iv_front, atm_iv_back);
    let iv_rv20 = iv_over_rv(atm_iv_front, rv20);
    let iv_rv30 = iv_over_rv(atm_iv_front, rv30);

    // Earnings-move history vs the supplied implied move
    let index = bar_store.load_trading_index(&symbol).await?;
    let moves = compute_event_moves(&index, &bundle.past_events);
    let move_stats = summarize_moves(&moves, args.implied_move, ANALYSIS.min_valid_events);

    let summary = DiagnosticsSummary {
        symbol,
        run_date,
        skew_trade_date,
        spot,
        next_earnings_date: bundle.next_earnings_date,
        next_time_hint: bundle.next_time_hint.clone(),
        front_expiry,
        back_expiry,
        atm_strike_used,
        atm_iv_front,
        atm_iv_back,
        term_slope,
        term_ratio,
        implied_move: args.implied_move.map(MovePct::new),
        avg_vol_30,
        rv20,
        rv30,
        iv_rv20,
        iv_rv30,
        move_stats,
    };

    println!("{}", render_summary_table(&summary));
    if !moves.is_empty() {
        println!("\n{}", render_moves_table(&moves));
    }

    let out_path = write_report(&args.out_dir, &summary, &moves)?;
    log::info!("wrote {}", out_path.display());

    Ok(())
}
