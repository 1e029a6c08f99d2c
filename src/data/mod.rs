mod earnings_file;
mod skew_store;
mod underlying_store;

pub use {
    earnings_file::load_earnings_bundle,
    skew_store::{SkewStore, SqliteSkewStore},
    underlying_store::{BarStore, SqliteBarStore},
};
