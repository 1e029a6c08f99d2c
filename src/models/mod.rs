mod bar;
mod earnings_moves;
mod skew;
mod summary;

pub use {
    bar::DailyBar,
    earnings_moves::{EarningsEventMove, EarningsMoveStats, UsedWindow},
    skew::SkewRow,
    summary::DiagnosticsSummary,
};
