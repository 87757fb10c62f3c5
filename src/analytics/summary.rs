use serde::{Deserialize, Serialize};

use crate::models::TradeRecord;

/// Aggregate performance over a set of closed trades. All rates are in
/// percent; `avg_loss` is a magnitude (non-negative). Values are unrounded;
/// rounding is a display concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_trades: usize,
    pub total_pl: f64,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub avg_gain: f64,
    pub avg_loss: f64,
    pub gl_ratio: f64,
    pub expectancy: f64,
}

impl Summary {
    pub fn empty() -> Self {
        Self {
            total_trades: 0,
            total_pl: 0.0,
            win_rate: 0.0,
            loss_rate: 0.0,
            avg_gain: 0.0,
            avg_loss: 0.0,
            gl_ratio: 0.0,
            expectancy: 0.0,
        }
    }
}

/// Compute summary metrics over `records`. Pure; no I/O.
///
/// A zero ROI counts as a loss. That boundary feeds every downstream number
/// (win rate, expectancy), so it must not move.
pub fn compute_summary(records: &[TradeRecord]) -> Summary {
    let total_trades = records.len();
    if total_trades == 0 {
        return Summary::empty();
    }

    let wins: Vec<f64> = records
        .iter()
        .filter(|r| r.roi_percent > 0.0)
        .map(|r| r.roi_percent)
        .collect();
    let losses: Vec<f64> = records
        .iter()
        .filter(|r| r.roi_percent <= 0.0)
        .map(|r| r.roi_percent)
        .collect();

    let win_rate = wins.len() as f64 / total_trades as f64 * 100.0;
    let loss_rate = 100.0 - win_rate;

    let avg_gain = if wins.is_empty() {
        0.0
    } else {
        wins.iter().sum::<f64>() / wins.len() as f64
    };
    let avg_loss = if losses.is_empty() {
        0.0
    } else {
        (losses.iter().sum::<f64>() / losses.len() as f64).abs()
    };

    // 0 is the "undefined ratio" sentinel, not an error.
    let gl_ratio = if avg_loss > 0.0 {
        avg_gain / avg_loss
    } else {
        0.0
    };

    let expectancy = (win_rate / 100.0) * avg_gain - (loss_rate / 100.0) * avg_loss;
    let total_pl = records.iter().map(|r| r.pl_amount).sum();

    Summary {
        total_trades,
        total_pl,
        win_rate,
        loss_rate,
        avg_gain,
        avg_loss,
        gl_ratio,
        expectancy,
    }
}
