use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TradeRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub cumulative_pl: f64,
}

/// Running account P/L in close-date order, one point per trade.
///
/// The sort is stable: trades closed on the same date keep their original
/// relative order, so the curve is deterministic for a given journal.
pub fn equity_curve(records: &[TradeRecord]) -> Vec<EquityPoint> {
    let mut sorted: Vec<&TradeRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let mut running = 0.0;
    sorted
        .iter()
        .map(|r| {
            running += r.pl_amount;
            EquityPoint {
                date: r.date,
                cumulative_pl: running,
            }
        })
        .collect()
}
