use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Announcement timing relative to the trading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
pub enum EarningsTiming {
    #[strum(to_string = "BMO")]
    BeforeMarket,
    #[strum(to_string = "AMC")]
    AfterMarket,
    #[strum(to_string = "UNKNOWN")]
    #[default]
    Unknown,
}

impl EarningsTiming {
    /// Normalizes a vendor timing hint. Vendors disagree on vocabulary, so
    /// matching is case-insensitive substring ("bmo"/"before", "amc"/"after").
    pub fn from_hint(hint: Option<&str>) -> Self {
        let Some(hint) = hint else {
            return Self::Unknown;
        };
        let s = hint.trim().to_ascii_uppercase();
        if s.contains("AMC") || s.contains("AFTER") {
            Self::AfterMarket
        } else if s.contains("BMO") || s.contains("BEFORE") {
            Self::BeforeMarket
        } else {
            Self::Unknown
        }
    }
}

/// One historical earnings announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsEvent {
    pub date: NaiveDate,
    pub timing: EarningsTiming,
}

/// Earnings calendar data for one symbol, as supplied by the (external)
/// calendar provider: the next known announcement plus recent history,
/// oldest to newest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EarningsBundle {
    pub symbol: String,
    pub next_earnings_date: Option<NaiveDate>,
    pub next_time_hint: Option<String>,
    pub past_events: Vec<EarningsEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_hint_normalization() {
        assert_eq!(
            EarningsTiming::from_hint(Some("amc")),
            EarningsTiming::AfterMarket
        );
        assert_eq!(
            EarningsTiming::from_hint(Some("After Market Close")),
            EarningsTiming::AfterMarket
        );
        assert_eq!(
            EarningsTiming::from_hint(Some("BMO")),
            EarningsTiming::BeforeMarket
        );
        assert_eq!(
            EarningsTiming::from_hint(Some("before market open")),
            EarningsTiming::BeforeMarket
        );
        assert_eq!(
            EarningsTiming::from_hint(Some("time-not-supplied")),
            EarningsTiming::Unknown
        );
        assert_eq!(EarningsTiming::from_hint(None), EarningsTiming::Unknown);
    }

    #[test]
    fn timing_display_tags() {
        assert_eq!(EarningsTiming::BeforeMarket.to_string(), "BMO");
        assert_eq!(EarningsTiming::AfterMarket.to_string(), "AMC");
        assert_eq!(EarningsTiming::Unknown.to_string(), "UNKNOWN");
    }
}
