use std::collections::BTreeMap;

use crate::analytics::summary::{compute_summary, Summary};
use crate::models::TradeRecord;

/// Bucket ordering is a display choice, so the caller picks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodOrder {
    OldestFirst,
    NewestFirst,
}

/// Group by calendar month (`YYYY-MM`) and summarize each bucket.
pub fn by_month(records: &[TradeRecord], order: PeriodOrder) -> Vec<(String, Summary)> {
    aggregate(records, order, |r| r.date.format("%Y-%m").to_string())
}

/// Group by calendar year (`YYYY`) and summarize each bucket.
pub fn by_year(records: &[TradeRecord], order: PeriodOrder) -> Vec<(String, Summary)> {
    aggregate(records, order, |r| r.date.format("%Y").to_string())
}

fn aggregate(
    records: &[TradeRecord],
    order: PeriodOrder,
    key: impl Fn(&TradeRecord) -> String,
) -> Vec<(String, Summary)> {
    // BTreeMap keeps keys sorted; "YYYY-MM" sorts lexicographically in
    // chronological order.
    let mut buckets: BTreeMap<String, Vec<TradeRecord>> = BTreeMap::new();
    for record in records {
        buckets.entry(key(record)).or_default().push(record.clone());
    }

    let mut out: Vec<(String, Summary)> = buckets
        .into_iter()
        .map(|(period, trades)| (period, compute_summary(&trades)))
        .collect();
    if order == PeriodOrder::NewestFirst {
        out.reverse();
    }
    out
}
