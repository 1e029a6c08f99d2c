use anyhow::{Context, Result};
use chrono::NaiveDate;

pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";
pub const PACKED_DATE_FORMAT: &str = "%Y%m%d";

/// Strict parse of a `YYYY-MM-DD` date. A string that does not parse is a
/// caller contract violation, so this fails loudly instead of defaulting.
pub fn parse_ymd(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), STANDARD_DATE_FORMAT)
        .with_context(|| format!("invalid calendar date: {s:?} (expected YYYY-MM-DD)"))
}

/// Strict parse of a packed `YYYYMMDD` date (option-expiry style).
pub fn parse_packed_ymd(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), PACKED_DATE_FORMAT)
        .with_context(|| format!("invalid expiry date: {s:?} (expected YYYYMMDD)"))
}

/// Lenient normalization for stored trade dates. Legacy rows carry either
/// packed 8-digit dates, possibly with trailing decoration ("20260116 2"),
/// or already-hyphenated dates. The decoration must sit at a word boundary;
/// "20260116x" is not a date. Anything else is unusable.
pub fn normalize_trade_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let head = s.split_whitespace().next()?;

    if head.len() >= 10 && head.as_bytes()[4] == b'-' && word_boundary_at(head, 10) {
        if let Some(prefix) = head.get(..10) {
            if let Ok(d) = NaiveDate::parse_from_str(prefix, STANDARD_DATE_FORMAT) {
                return Some(d);
            }
        }
    }

    if head.len() >= 8
        && head.as_bytes()[..8].iter().all(u8::is_ascii_digit)
        && word_boundary_at(head, 8)
    {
        if let Ok(d) = NaiveDate::parse_from_str(&head[..8], PACKED_DATE_FORMAT) {
            return Some(d);
        }
    }

    None
}

fn word_boundary_at(s: &str, idx: usize) -> bool {
    match s.as_bytes().get(idx) {
        None => true,
        Some(b) => !(b.is_ascii_alphanumeric() || *b == b'_'),
    }
}

pub fn today_ymd() -> String {
    chrono::Local::now()
        .date_naive()
        .format(STANDARD_DATE_FORMAT)
        .to_string()
}
