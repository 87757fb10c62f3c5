use std::path::PathBuf;

use chrono::NaiveDate;

use crate::models::TradeRecord;

/// Unique temp path per test so state never leaks between tests.
pub fn temp_journal_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "trade_journal_test_{}_{}.csv",
        std::process::id(),
        tag
    ))
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn journal_record(date: &str, ticker: &str, pl: f64, roi: f64, memo: &str) -> TradeRecord {
    TradeRecord::new(day(date), ticker, pl, roi, memo).unwrap()
}

/// Record where only the ROI matters.
pub fn roi_record(date: &str, roi: f64) -> TradeRecord {
    journal_record(date, "TEST", roi * 10.0, roi, "")
}

/// Record where only the P/L matters.
pub fn pl_record(date: &str, pl: f64) -> TradeRecord {
    journal_record(date, "TEST", pl, pl / 10.0, "")
}
