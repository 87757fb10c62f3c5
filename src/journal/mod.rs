pub mod store;

pub use store::{LoadReport, LoadStatus, TradeJournalStore};
