use std::path::PathBuf;

use chrono::NaiveDate;
use trade_journal::models::TradeRecord;

/// Unique temp path per test so journal files never collide across tests.
pub fn temp_journal_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "trade_journal_it_{}_{}.csv",
        std::process::id(),
        tag
    ))
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn record(date: &str, ticker: &str, pl: f64, roi: f64, memo: &str) -> TradeRecord {
    TradeRecord::new(day(date), ticker, pl, roi, memo).unwrap()
}
