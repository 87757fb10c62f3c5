pub mod trade;

pub use trade::{JournalError, TradeRecord};
