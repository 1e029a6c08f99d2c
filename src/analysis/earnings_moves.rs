//! Event-aligned realized moves around historical earnings dates.
//!
//! For each event the trading calendar resolves the D-1/D0/D+1 closes, two
//! candidate moves are computed (the overnight gap a BMO report lands in and
//! the one an AMC report lands in), and the event's timing tag decides which
//! one counts. Missing data degrades to empty fields plus a note; nothing
//! here ever errors on sparse history.

use crate::analysis::stats::{average, median, percentile};
use crate::config::MovePct;
use crate::domain::{EarningsEvent, EarningsTiming, TradingDayIndex};
use crate::models::{EarningsEventMove, EarningsMoveStats, UsedWindow};

const NOTE_MISSING_BMO: &str = "missing_bmo_inputs";
const NOTE_MISSING_AMC: &str = "missing_amc_inputs";

fn pct_gap(from: Option<f64>, to: Option<f64>) -> Option<MovePct> {
    match (from, to) {
        (Some(from), Some(to)) if from > 0.0 && to > 0.0 => {
            Some(MovePct::new((to / from - 1.0).abs()))
        }
        _ => None,
    }
}

/// Computes one `EarningsEventMove` per input event against the symbol's
/// trading-day index.
pub fn compute_event_moves(
    index: &TradingDayIndex,
    events: &[EarningsEvent],
) -> Vec<EarningsEventMove> {
    events
        .iter()
        .map(|event| compute_single_move(index, event))
        .collect()
}

fn compute_single_move(index: &TradingDayIndex, event: &EarningsEvent) -> EarningsEventMove {
    let triple = index.neighbors(event.date);

    let close_dm1 = triple.prev.and_then(|d| index.close_on(d));
    let close_d0 = triple.on.and_then(|d| index.close_on(d));
    let close_dp1 = triple.next.and_then(|d| index.close_on(d));

    let move_bmo_like = pct_gap(close_dm1, close_d0);
    let move_amc_like = pct_gap(close_d0, close_dp1);

    let mut note_parts = Vec::new();
    if move_bmo_like.is_none() {
        note_parts.push(NOTE_MISSING_BMO);
    }
    if move_amc_like.is_none() {
        note_parts.push(NOTE_MISSING_AMC);
    }

    let (move_used, used_window) = match event.timing {
        EarningsTiming::BeforeMarket => (move_bmo_like, Some(UsedWindow::BmoLike)),
        EarningsTiming::AfterMarket => (move_amc_like, Some(UsedWindow::AmcLike)),
        EarningsTiming::Unknown => match (move_bmo_like, move_amc_like) {
            // Ties go to the BMO-like window (>=), locked in for parity
            // with the historical classification.
            (Some(bmo), Some(amc)) => {
                if bmo >= amc {
                    (Some(bmo), Some(UsedWindow::BmoLike))
                } else {
                    (Some(amc), Some(UsedWindow::AmcLike))
                }
            }
            (Some(bmo), None) => (Some(bmo), Some(UsedWindow::BmoLike)),
            (None, Some(amc)) => (Some(amc), Some(UsedWindow::AmcLike)),
            (None, None) => (None, None),
        },
    };

    EarningsEventMove {
        earnings_date: event.date,
        timing: event.timing,
        d_m1: triple.prev,
        d0: triple.on,
        d_p1: triple.next,
        close_dm1,
        close_d0,
        close_dp1,
        move_bmo_like,
        move_amc_like,
        move_used,
        used_window,
        note: note_parts.join("|"),
    }
}

/// Aggregates per-event moves into a distributional summary, ranking an
/// optional current implied move within the realized distribution.
pub fn summarize_moves(
    moves: &[EarningsEventMove],
    current_implied_move: Option<f64>,
    min_valid_events: usize,
) -> EarningsMoveStats {
    let mut used: Vec<f64> = moves
        .iter()
        .filter_map(|m| m.move_used.map(MovePct::value))
        .collect();
    used.sort_by(f64::total_cmp);

    let n_total = moves.len();
    let n_used = used.len();

    let implied_percentile_rank = match current_implied_move {
        Some(implied) if n_used > 0 => {
            let at_or_below = used.iter().filter(|x| **x <= implied).count();
            Some(100.0 * at_or_below as f64 / n_used as f64)
        }
        _ => None,
    };

    EarningsMoveStats {
        n_events_total: n_total,
        n_events_used: n_used,
        mean_move: average(&used).map(MovePct::new),
        median_move: median(&used).map(MovePct::new),
        p75_move: percentile(&used, 0.75).map(MovePct::new),
        max_move: used.last().copied().map(MovePct::new),
        implied_percentile_rank,
        history_ok: n_used >= min_valid_events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyBar;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn index(bars: &[(&str, f64)]) -> TradingDayIndex {
        let bars: Vec<DailyBar> = bars
            .iter()
            .map(|(date, close)| DailyBar {
                date: d(date),
                close: *close,
                volume: 1,
            })
            .collect();
        TradingDayIndex::from_bars(&bars)
    }

    fn event(date: &str, timing: EarningsTiming) -> EarningsEvent {
        EarningsEvent {
            date: d(date),
            timing,
        }
    }

    fn mv(used: Option<f64>) -> EarningsEventMove {
        EarningsEventMove {
            earnings_date: d("2024-01-04"),
            timing: EarningsTiming::Unknown,
            d_m1: None,
            d0: None,
            d_p1: None,
            close_dm1: None,
            close_d0: None,
            close_dp1: None,
            move_bmo_like: None,
            move_amc_like: None,
            move_used: used.map(MovePct::new),
            used_window: used.map(|_| UsedWindow::BmoLike),
            note: String::new(),
        }
    }

    #[test]
    fn bmo_timing_forces_pre_market_window() {
        let idx = index(&[
            ("2024-01-03", 100.0),
            ("2024-01-04", 110.0),
            ("2024-01-05", 99.0),
        ]);
        let moves = compute_event_moves(&idx, &[event("2024-01-04", EarningsTiming::BeforeMarket)]);
        let m = &moves[0];

        assert_eq!(m.d_m1, Some(d("2024-01-03")));
        assert_eq!(m.d0, Some(d("2024-01-04")));
        assert_eq!(m.d_p1, Some(d("2024-01-05")));
        assert_eq!(m.close_dm1, Some(100.0));
        assert_eq!(m.close_d0, Some(110.0));
        assert_eq!(m.close_dp1, Some(99.0));

        assert!((m.move_bmo_like.unwrap().value() - 0.10).abs() < 1e-12);
        assert!((m.move_amc_like.unwrap().value() - 0.1818181818).abs() < 1e-9);

        // AMC-like is larger, but BMO timing pins the pre-market window
        assert_eq!(m.used_window, Some(UsedWindow::BmoLike));
        assert!((m.move_used.unwrap().value() - 0.10).abs() < 1e-12);
        assert!(m.note.is_empty());
    }

    #[test]
    fn amc_timing_uses_post_market_window() {
        let idx = index(&[
            ("2024-01-03", 100.0),
            ("2024-01-04", 110.0),
            ("2024-01-05", 99.0),
        ]);
        let moves = compute_event_moves(&idx, &[event("2024-01-04", EarningsTiming::AfterMarket)]);
        let m = &moves[0];
        assert_eq!(m.used_window, Some(UsedWindow::AmcLike));
        assert!((m.move_used.unwrap().value() - 0.1818181818).abs() < 1e-9);
    }

    #[test]
    fn unknown_timing_takes_larger_move() {
        let idx = index(&[
            ("2024-01-03", 100.0),
            ("2024-01-04", 110.0),
            ("2024-01-05", 99.0),
        ]);
        let moves = compute_event_moves(&idx, &[event("2024-01-04", EarningsTiming::Unknown)]);
        let m = &moves[0];
        assert_eq!(m.used_window, Some(UsedWindow::AmcLike));
        assert_eq!(m.move_used, m.move_amc_like);
    }

    #[test]
    fn unknown_timing_tie_favors_bmo_like() {
        // 100 -> 110 -> 121: both gaps are exactly 10%
        let idx = index(&[
            ("2024-01-03", 100.0),
            ("2024-01-04", 110.0),
            ("2024-01-05", 121.0),
        ]);
        let moves = compute_event_moves(&idx, &[event("2024-01-04", EarningsTiming::Unknown)]);
        assert_eq!(moves[0].used_window, Some(UsedWindow::BmoLike));
    }

    #[test]
    fn event_before_history_degrades_to_notes() {
        let idx = index(&[("2024-01-03", 100.0), ("2024-01-04", 110.0)]);
        let moves = compute_event_moves(&idx, &[event("2023-06-01", EarningsTiming::AfterMarket)]);
        let m = &moves[0];

        assert_eq!(m.d_m1, None);
        assert_eq!(m.d0, None);
        assert_eq!(m.d_p1, None);
        assert_eq!(m.move_used, None);
        assert_eq!(m.note, "missing_bmo_inputs|missing_amc_inputs");
    }

    #[test]
    fn most_recent_event_lacks_next_day() {
        let idx = index(&[("2024-01-03", 100.0), ("2024-01-04", 110.0)]);
        let moves = compute_event_moves(&idx, &[event("2024-01-04", EarningsTiming::AfterMarket)]);
        let m = &moves[0];

        assert!((m.move_bmo_like.unwrap().value() - 0.10).abs() < 1e-12);
        assert_eq!(m.move_amc_like, None);
        // AMC timing selects the AMC window even when it is empty
        assert_eq!(m.move_used, None);
        assert_eq!(m.used_window, Some(UsedWindow::AmcLike));
        assert_eq!(m.note, "missing_amc_inputs");
    }

    #[test]
    fn non_positive_close_voids_the_candidate() {
        let idx = index(&[
            ("2024-01-03", 0.0),
            ("2024-01-04", 110.0),
            ("2024-01-05", 99.0),
        ]);
        let moves = compute_event_moves(&idx, &[event("2024-01-04", EarningsTiming::Unknown)]);
        let m = &moves[0];
        assert_eq!(m.move_bmo_like, None);
        assert!(m.move_amc_like.is_some());
        assert_eq!(m.used_window, Some(UsedWindow::AmcLike));
        assert_eq!(m.note, "missing_bmo_inputs");
    }

    #[test]
    fn summary_percentile_rank_is_inclusive() {
        let moves: Vec<EarningsEventMove> = [0.05, 0.10, 0.15, 0.20]
            .iter()
            .map(|v| mv(Some(*v)))
            .collect();

        let stats = summarize_moves(&moves, Some(0.12), 8);
        assert_eq!(stats.n_events_total, 4);
        assert_eq!(stats.n_events_used, 4);
        assert_eq!(stats.implied_percentile_rank, Some(50.0));
        assert!(!stats.history_ok);

        assert!((stats.mean_move.unwrap().value() - 0.125).abs() < 1e-12);
        assert!((stats.median_move.unwrap().value() - 0.125).abs() < 1e-12);
        assert!((stats.p75_move.unwrap().value() - 0.1625).abs() < 1e-12);
        assert_eq!(stats.max_move.unwrap().value(), 0.20);
    }

    #[test]
    fn summary_with_no_usable_events() {
        let moves = vec![mv(None), mv(None)];
        let stats = summarize_moves(&moves, Some(0.10), 8);
        assert_eq!(stats.n_events_total, 2);
        assert_eq!(stats.n_events_used, 0);
        assert_eq!(stats.mean_move, None);
        assert_eq!(stats.median_move, None);
        assert_eq!(stats.p75_move, None);
        assert_eq!(stats.max_move, None);
        assert_eq!(stats.implied_percentile_rank, None);
        assert!(!stats.history_ok);
    }

    #[test]
    fn summary_without_implied_move_has_no_rank() {
        let moves = vec![mv(Some(0.05))];
        let stats = summarize_moves(&moves, None, 1);
        assert_eq!(stats.implied_percentile_rank, None);
        assert!(stats.history_ok);
    }

    #[test]
    fn summary_threshold_gate() {
        let moves: Vec<EarningsEventMove> = (0..8).map(|i| mv(Some(0.01 * i as f64))).collect();
        assert!(summarize_moves(&moves, None, 8).history_ok);
        assert!(!summarize_moves(&moves[..7], None, 8).history_ok);
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let idx = index(&[
            ("2024-01-03", 100.0),
            ("2024-01-04", 110.0),
            ("2024-01-05", 99.0),
        ]);
        let events = [event("2024-01-04", EarningsTiming::Unknown)];
        let a = compute_event_moves(&idx, &events);
        let b = compute_event_moves(&idx, &events);
        assert_eq!(a, b);

        let sa = summarize_moves(&a, Some(0.11), 8);
        let sb = summarize_moves(&b, Some(0.11), 8);
        assert_eq!(sa, sb);
    }
}
