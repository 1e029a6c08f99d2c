mod time_utils;

pub use time_utils::{
    PACKED_DATE_FORMAT, STANDARD_DATE_FORMAT, normalize_trade_date, parse_packed_ymd, parse_ymd,
    today_ymd,
};
