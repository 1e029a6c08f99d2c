// Domain types and value objects
mod earnings;
mod trading_day;

// Re-export commonly used types
pub use earnings::{EarningsBundle, EarningsEvent, EarningsTiming};
pub use trading_day::{DayTriple, TradingDayIndex};
