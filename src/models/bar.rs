use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One stored daily bar for the underlying. Dates are canonical calendar
/// dates regardless of how the source formatted them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: i64,
}
