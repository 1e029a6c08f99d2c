//! Report rendering: one summary table per run plus the historical-moves
//! table, printed and written to a flat file.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{DiagnosticsSummary, EarningsEventMove};

fn fmt_opt<T: Display>(v: &Option<T>) -> String {
    v.as_ref().map(|x| x.to_string()).unwrap_or_default()
}

fn fmt_opt_f64(v: &Option<f64>) -> String {
    v.map(|x| format!("{x:.6}")).unwrap_or_default()
}

#[derive(Tabled)]
struct MoveRow {
    #[tabled(rename = "earnings")]
    earnings_date: String,
    timing: String,
    #[tabled(rename = "D-1")]
    d_m1: String,
    #[tabled(rename = "D0")]
    d0: String,
    #[tabled(rename = "D+1")]
    d_p1: String,
    #[tabled(rename = "bmo_like")]
    move_bmo_like: String,
    #[tabled(rename = "amc_like")]
    move_amc_like: String,
    used: String,
    window: String,
    note: String,
}

impl From<&EarningsEventMove> for MoveRow {
    fn from(m: &EarningsEventMove) -> Self {
        Self {
            earnings_date: m.earnings_date.to_string(),
            timing: m.timing.to_string(),
            d_m1: fmt_opt(&m.d_m1),
            d0: fmt_opt(&m.d0),
            d_p1: fmt_opt(&m.d_p1),
            move_bmo_like: fmt_opt(&m.move_bmo_like),
            move_amc_like: fmt_opt(&m.move_amc_like),
            used: fmt_opt(&m.move_used),
            window: fmt_opt(&m.used_window),
            note: m.note.clone(),
        }
    }
}

pub fn render_moves_table(moves: &[EarningsEventMove]) -> String {
    let rows: Vec<MoveRow> = moves.iter().map(MoveRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

pub fn render_summary_table(summary: &DiagnosticsSummary) -> String {
    let stats = &summary.move_stats;

    let metrics: Vec<(&str, String)> = vec![
        ("symbol", summary.symbol.clone()),
        ("run_date", summary.run_date.clone()),
        ("skew_trade_date", fmt_opt(&summary.skew_trade_date)),
        ("spot", fmt_opt_f64(&summary.spot)),
        ("next_earnings_date", fmt_opt(&summary.next_earnings_date)),
        ("next_time_hint", fmt_opt(&summary.next_time_hint)),
        ("front_expiry", fmt_opt(&summary.front_expiry)),
        ("back_expiry", fmt_opt(&summary.back_expiry)),
        ("atm_strike_used", fmt_opt_f64(&summary.atm_strike_used)),
        ("atm_iv_front", fmt_opt_f64(&summary.atm_iv_front)),
        ("atm_iv_back", fmt_opt_f64(&summary.atm_iv_back)),
        ("term_slope", fmt_opt_f64(&summary.term_slope)),
        ("term_ratio", fmt_opt_f64(&summary.term_ratio)),
        ("implied_move", fmt_opt(&summary.implied_move)),
        ("avg_vol_30", fmt_opt_f64(&summary.avg_vol_30)),
        ("rv20", fmt_opt(&summary.rv20)),
        ("rv30", fmt_opt(&summary.rv30)),
        ("iv_rv20", fmt_opt_f64(&summary.iv_rv20)),
        ("iv_rv30", fmt_opt_f64(&summary.iv_rv30)),
        ("earnings_events", stats.n_events_total.to_string()),
        ("earnings_events_used", stats.n_events_used.to_string()),
        ("mean_move", fmt_opt(&stats.mean_move)),
        ("median_move", fmt_opt(&stats.median_move)),
        ("p75_move", fmt_opt(&stats.p75_move)),
        ("max_move", fmt_opt(&stats.max_move)),
        (
            "implied_percentile_rank",
            stats
                .implied_percentile_rank
                .map(|r| format!("{r:.1}"))
                .unwrap_or_default(),
        ),
        ("history_ok", stats.history_ok.to_string()),
    ];

    let mut builder = Builder::default();
    builder.push_record(["metric", "value"]);
    for (name, value) in metrics {
        builder.push_record([name.to_string(), value]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

/// Writes the rendered report next to previous runs and returns its path.
pub fn write_report(
    out_dir: &Path,
    summary: &DiagnosticsSummary,
    moves: &[EarningsEventMove],
) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let file_name = format!("{}_earnings_edge_{}.txt", summary.symbol, summary.run_date);
    let out_path = out_dir.join(file_name);

    let mut text = render_summary_table(summary);
    if !moves.is_empty() {
        text.push_str("\n\n");
        text.push_str(&render_moves_table(moves));
    }
    text.push('\n');

    std::fs::write(&out_path, text)
        .with_context(|| format!("writing {}", out_path.display()))?;

    Ok(out_path)
}
