use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("ticker must not be empty")]
    EmptyTicker,
    #[error("buy and sell prices must be greater than zero")]
    NonPositivePrice,
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error("journal file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("journal serialization error: {0}")]
    Csv(#[from] csv::Error),
}

/// One closed trade. Only constructed through the checked factories below,
/// so a record in hand always has a valid date and a non-empty ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "P_L_Amount")]
    pub pl_amount: f64,
    #[serde(rename = "ROI_Percent")]
    pub roi_percent: f64,
    #[serde(rename = "Memo", default)]
    pub memo: String,
}

impl TradeRecord {
    /// Build a record from the direct-entry form (P/L and ROI already known).
    pub fn new(
        date: NaiveDate,
        ticker: &str,
        pl_amount: f64,
        roi_percent: f64,
        memo: &str,
    ) -> Result<Self, JournalError> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(JournalError::EmptyTicker);
        }
        Ok(Self {
            date,
            ticker,
            pl_amount,
            roi_percent,
            memo: memo.to_string(),
        })
    }

    /// Build a record from raw fills (earlier input-form variant): derives
    /// P/L as `(sell - buy) * qty` and ROI as `(sell - buy) / buy * 100`.
    pub fn from_fills(
        date: NaiveDate,
        ticker: &str,
        buy_price: f64,
        sell_price: f64,
        quantity: u32,
        memo: &str,
    ) -> Result<Self, JournalError> {
        if buy_price <= 0.0 || sell_price <= 0.0 {
            return Err(JournalError::NonPositivePrice);
        }
        if quantity < 1 {
            return Err(JournalError::ZeroQuantity);
        }
        let pl_amount = (sell_price - buy_price) * quantity as f64;
        let roi_percent = (sell_price - buy_price) / buy_price * 100.0;
        Self::new(date, ticker, pl_amount, roi_percent, memo)
    }
}
