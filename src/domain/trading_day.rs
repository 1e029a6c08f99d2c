use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::DailyBar;

/// The trading days immediately before, at-or-before, and after a target
/// calendar date. Any slot may be empty at the edges of recorded history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayTriple {
    pub prev: Option<NaiveDate>,
    pub on: Option<NaiveDate>,
    pub next: Option<NaiveDate>,
}

/// Ascending, duplicate-free trading dates for one symbol, plus the close
/// observed on each. Built from stored daily bars; last write wins per date.
#[derive(Debug, Clone, Default)]
pub struct TradingDayIndex {
    dates: Vec<NaiveDate>,
    closes: BTreeMap<NaiveDate, f64>,
}

impl TradingDayIndex {
    pub fn from_bars(bars: &[DailyBar]) -> Self {
        Self::from_closes(bars.iter().map(|b| (b.date, b.close)))
    }

    pub fn from_closes(pairs: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        let closes: BTreeMap<NaiveDate, f64> = pairs.into_iter().collect();
        let dates = closes.keys().copied().collect();
        Self { dates, closes }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.closes.get(&date).copied()
    }

    /// Resolves the target calendar date against recorded trading days.
    ///
    /// `on` is the greatest trading date <= target; `prev`/`next` are its
    /// immediate neighbors in the index. A target earlier than the first
    /// recorded day resolves to an empty triple.
    pub fn neighbors(&self, target: NaiveDate) -> DayTriple {
        let upper = self.dates.partition_point(|d| *d <= target);
        if upper == 0 {
            return DayTriple::default();
        }

        let at = upper - 1;
        DayTriple {
            prev: at.checked_sub(1).map(|i| self.dates[i]),
            on: Some(self.dates[at]),
            next: self.dates.get(at + 1).copied(),
        }
    }
}
