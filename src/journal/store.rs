use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::{JournalError, TradeRecord};

/// Written ahead of the header so spreadsheet apps detect UTF-8.
const UTF8_BOM: &str = "\u{feff}";

const EXPECTED_HEADERS: [&str; 5] = ["Date", "Ticker", "P_L_Amount", "ROI_Percent", "Memo"];

/// How a load went. The journal never fails to load; it degrades to an
/// empty or partial collection and reports what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Clean,
    NotFound,
    ParseFailure,
    PartialParse { dropped: usize },
}

#[derive(Debug)]
pub struct LoadReport {
    pub records: Vec<TradeRecord>,
    pub status: LoadStatus,
}

/// Raw CSV row. Date stays a string here so a single bad date drops that
/// row instead of aborting the whole read.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Ticker")]
    ticker: String,
    #[serde(rename = "P_L_Amount")]
    pl_amount: f64,
    #[serde(rename = "ROI_Percent")]
    roi_percent: f64,
    #[serde(rename = "Memo", default)]
    memo: String,
}

/// Sole authority for the current trade collection and its durability.
/// Owns the file path and the working set; the caller re-reads after save.
pub struct TradeJournalStore {
    path: PathBuf,
    records: Vec<TradeRecord>,
}

impl TradeJournalStore {
    /// Open a journal, loading whatever the file currently holds.
    pub fn open(path: impl Into<PathBuf>) -> (Self, LoadReport) {
        let path = path.into();
        let report = load_path(&path);
        let store = Self {
            records: report.records.clone(),
            path,
        };
        (store, report)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Re-read the file without touching the working set.
    pub fn load(&self) -> LoadReport {
        load_path(&self.path)
    }

    /// Append one record and return the new snapshot. Record validity is
    /// guaranteed by the `TradeRecord` constructors.
    pub fn append(&mut self, record: TradeRecord) -> &[TradeRecord] {
        self.records.push(record);
        &self.records
    }

    /// Wholesale substitution from the bulk editor. Rows may have been
    /// deleted, edited, or inserted; the new collection simply wins.
    pub fn replace(&mut self, records: Vec<TradeRecord>) -> &[TradeRecord] {
        self.records = records;
        &self.records
    }

    /// Serialize the working set, overwriting the journal file. Writes to a
    /// sibling temp file and renames so a crash mid-write leaves the old
    /// journal intact.
    pub fn save(&self) -> Result<(), JournalError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        // Header is written explicitly so an emptied journal still round-trips;
        // the serializer would only emit it alongside the first record.
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(EXPECTED_HEADERS)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        let body = writer
            .into_inner()
            .map_err(|e| JournalError::Io(e.into_error()))?;

        let mut bytes = Vec::with_capacity(UTF8_BOM.len() + body.len());
        bytes.extend_from_slice(UTF8_BOM.as_bytes());
        bytes.extend_from_slice(&body);

        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        debug!(records = self.records.len(), path = %self.path.display(), "journal saved");
        Ok(())
    }
}

fn load_path(path: &Path) -> LoadReport {
    if !path.exists() {
        debug!(path = %path.display(), "journal file not found, starting empty");
        return LoadReport {
            records: Vec::new(),
            status: LoadStatus::NotFound,
        };
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "journal file unreadable, starting empty");
            return LoadReport {
                records: Vec::new(),
                status: LoadStatus::ParseFailure,
            };
        }
    };
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    match reader.headers() {
        Ok(headers) if headers.iter().eq(EXPECTED_HEADERS) => {}
        _ => {
            warn!(path = %path.display(), "journal header does not match schema, starting empty");
            return LoadReport {
                records: Vec::new(),
                status: LoadStatus::ParseFailure,
            };
        }
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for (idx, row) in reader.deserialize::<RawRow>().enumerate() {
        let line = idx + 2; // header is line 1
        let raw = match row {
            Ok(raw) => raw,
            Err(e) => {
                warn!(line, error = %e, "dropping unparseable journal row");
                dropped += 1;
                continue;
            }
        };
        let date = match chrono::NaiveDate::parse_from_str(raw.date.trim(), "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                warn!(line, date = %raw.date, "dropping journal row with invalid date");
                dropped += 1;
                continue;
            }
        };
        match TradeRecord::new(date, &raw.ticker, raw.pl_amount, raw.roi_percent, &raw.memo) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(line, error = %e, "dropping invalid journal row");
                dropped += 1;
            }
        }
    }

    let status = if dropped > 0 {
        warn!(dropped, kept = records.len(), "journal loaded with dropped rows");
        LoadStatus::PartialParse { dropped }
    } else {
        LoadStatus::Clean
    };
    LoadReport { records, status }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{journal_record, temp_journal_path};

    #[test]
    fn open_missing_file_is_empty_not_found() {
        let path = temp_journal_path("open_missing");
        let (store, report) = TradeJournalStore::open(&path);
        assert!(store.records().is_empty());
        assert_eq!(report.status, LoadStatus::NotFound);
    }

    #[test]
    fn save_then_load_round_trips_records() {
        let path = temp_journal_path("round_trip");
        let (mut store, _) = TradeJournalStore::open(&path);
        store.append(journal_record("2024-01-05", "TSLA", 150.0, 3.2, "vcp entry"));
        store.append(journal_record("2024-01-20", "AAPL", -40.0, -1.1, ""));
        store.save().unwrap();

        let (reloaded, report) = TradeJournalStore::open(&path);
        assert_eq!(report.status, LoadStatus::Clean);
        assert_eq!(reloaded.records(), store.records());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn saved_file_starts_with_bom_and_header() {
        let path = temp_journal_path("bom_header");
        let (mut store, _) = TradeJournalStore::open(&path);
        store.append(journal_record("2024-01-05", "TSLA", 150.0, 3.2, "memo"));
        store.save().unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], [0xEF, 0xBB, 0xBF]);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Date,Ticker,P_L_Amount,ROI_Percent,Memo"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn bad_date_row_is_dropped_and_counted() {
        let path = temp_journal_path("bad_date");
        fs::write(
            &path,
            "Date,Ticker,P_L_Amount,ROI_Percent,Memo\n\
             2024-01-05,TSLA,150.0,3.2,ok\n\
             not-a-date,AAPL,-40.0,-1.1,bad\n\
             2024-02-01,NVDA,80.0,2.0,ok\n",
        )
        .unwrap();

        let (store, report) = TradeJournalStore::open(&path);
        assert_eq!(report.status, LoadStatus::PartialParse { dropped: 1 });
        assert_eq!(store.records().len(), 2);
        assert_eq!(store.records()[0].ticker, "TSLA");
        assert_eq!(store.records()[1].ticker, "NVDA");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unparseable_numeric_row_is_dropped() {
        let path = temp_journal_path("bad_number");
        fs::write(
            &path,
            "Date,Ticker,P_L_Amount,ROI_Percent,Memo\n\
             2024-01-05,TSLA,abc,3.2,bad amount\n\
             2024-02-01,NVDA,80.0,2.0,ok\n",
        )
        .unwrap();

        let (store, report) = TradeJournalStore::open(&path);
        assert_eq!(report.status, LoadStatus::PartialParse { dropped: 1 });
        assert_eq!(store.records().len(), 1);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_loads_empty_with_parse_failure() {
        let path = temp_journal_path("corrupt");
        fs::write(&path, "this is not a journal\nat,all\n").unwrap();

        let (store, report) = TradeJournalStore::open(&path);
        assert!(store.records().is_empty());
        assert_eq!(report.status, LoadStatus::ParseFailure);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_accepts_bom_prefixed_file() {
        let path = temp_journal_path("bom_load");
        fs::write(
            &path,
            "\u{feff}Date,Ticker,P_L_Amount,ROI_Percent,Memo\n2024-01-05,TSLA,150.0,3.2,\n",
        )
        .unwrap();

        let (store, report) = TradeJournalStore::open(&path);
        assert_eq!(report.status, LoadStatus::Clean);
        assert_eq!(store.records().len(), 1);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn replace_supports_deletion_and_insertion() {
        let path = temp_journal_path("replace");
        let (mut store, _) = TradeJournalStore::open(&path);
        store.append(journal_record("2024-01-05", "TSLA", 150.0, 3.2, ""));
        store.append(journal_record("2024-01-20", "AAPL", -40.0, -1.1, ""));

        let edited = vec![
            journal_record("2024-01-20", "AAPL", -45.0, -1.2, "corrected"),
            journal_record("2024-02-10", "NVDA", 200.0, 5.0, "added in grid"),
        ];
        let snapshot = store.replace(edited.clone());
        assert_eq!(snapshot, edited.as_slice());
    }

    #[test]
    fn emptied_journal_round_trips_clean() {
        let path = temp_journal_path("empty_save");
        let (mut store, _) = TradeJournalStore::open(&path);
        store.append(journal_record("2024-01-05", "TSLA", 150.0, 3.2, ""));
        store.save().unwrap();

        // Delete-all path from the bulk editor must still leave a readable file.
        store.replace(Vec::new());
        store.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text.strip_prefix('\u{feff}').unwrap().trim_end(),
            "Date,Ticker,P_L_Amount,ROI_Percent,Memo"
        );

        let (reloaded, report) = TradeJournalStore::open(&path);
        assert_eq!(report.status, LoadStatus::Clean);
        assert!(reloaded.records().is_empty());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let path = temp_journal_path("overwrite");
        let (mut store, _) = TradeJournalStore::open(&path);
        store.append(journal_record("2024-01-05", "TSLA", 150.0, 3.2, ""));
        store.append(journal_record("2024-01-20", "AAPL", -40.0, -1.1, ""));
        store.save().unwrap();

        store.replace(vec![journal_record("2024-03-01", "NVDA", 10.0, 0.5, "")]);
        store.save().unwrap();

        let (reloaded, _) = TradeJournalStore::open(&path);
        assert_eq!(reloaded.records().len(), 1);
        assert_eq!(reloaded.records()[0].ticker, "NVDA");
        let _ = fs::remove_file(&path);
    }
}
