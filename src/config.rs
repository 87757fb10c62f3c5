use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the persisted journal CSV.
    pub journal_file: String,

    // Display
    pub equity_tail: usize,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            journal_file: env("JOURNAL_FILE", "journal.csv"),
            equity_tail: env("EQUITY_TAIL", "10").parse().unwrap_or(10),
            log_level: env("LOG_LEVEL", "info"),
        }
    }
}
