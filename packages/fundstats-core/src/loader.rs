//! Loading fund and benchmark rows from JSON files.
//!
//! Files hold either a bare array of rows or the data API envelope
//! `{"result": {"records": [...]}}`, newest row first.

use crate::types::{BenchmarkQuote, FundDailyRecord};
use crate::Result;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "FUNDSTATS_DATA_DIR";

/// Directory where relative input files are looked up.
///
/// Default: `~/.fundstats`
/// Can be overridden with the `FUNDSTATS_DATA_DIR` environment variable.
pub fn default_data_dir() -> PathBuf {
    data_dir_from(env::var_os(DATA_DIR_ENV))
}

fn data_dir_from(override_dir: Option<OsString>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".fundstats"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve an input path.
///
/// Absolute paths and paths that exist relative to the working directory are
/// returned as is; anything else is looked up in the data directory.
pub fn resolve_input(path: impl AsRef<Path>) -> PathBuf {
    resolve_in(path.as_ref(), &default_data_dir())
}

fn resolve_in(path: &Path, data_dir: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    data_dir.join(path)
}

/// Load fund rows from a JSON file.
pub fn load_fund_records(path: impl AsRef<Path>) -> Result<Vec<FundDailyRecord>> {
    let records: Vec<FundDailyRecord> = load_rows(path.as_ref())?;
    warn_if_unordered(records.iter().map(|r| r.date));
    Ok(records)
}

/// Load benchmark quotes from a JSON file.
pub fn load_benchmark_quotes(path: impl AsRef<Path>) -> Result<Vec<BenchmarkQuote>> {
    let quotes: Vec<BenchmarkQuote> = load_rows(path.as_ref())?;
    warn_if_unordered(quotes.iter().map(|q| q.date));
    Ok(quotes)
}

/// Parse fund rows from a JSON string.
pub fn fund_records_from_str(content: &str) -> Result<Vec<FundDailyRecord>> {
    let records: Vec<FundDailyRecord> = rows_from_str(content)?;
    warn_if_unordered(records.iter().map(|r| r.date));
    Ok(records)
}

/// Parse benchmark quotes from a JSON string.
pub fn benchmark_quotes_from_str(content: &str) -> Result<Vec<BenchmarkQuote>> {
    let quotes: Vec<BenchmarkQuote> = rows_from_str(content)?;
    warn_if_unordered(quotes.iter().map(|q| q.date));
    Ok(quotes)
}

/// Whether dates never increase, i.e. the rows are newest first.
pub fn is_newest_first(dates: impl IntoIterator<Item = NaiveDate>) -> bool {
    let mut previous: Option<NaiveDate> = None;
    for date in dates {
        if previous.is_some_and(|p| date > p) {
            return false;
        }
        previous = Some(date);
    }
    true
}

fn load_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let path = resolve_input(path);
    let content = fs::read_to_string(&path)?;
    let rows: Vec<T> = rows_from_str(&content)?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded rows");
    Ok(rows)
}

fn rows_from_str<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let mut data: serde_json::Value = serde_json::from_str(content)?;

    // Data API envelope
    let enveloped = data
        .pointer_mut("/result/records")
        .map(serde_json::Value::take)
        .or_else(|| data.get_mut("records").map(serde_json::Value::take));
    if let Some(records) = enveloped {
        data = records;
    }

    Ok(serde_json::from_value(data)?)
}

fn warn_if_unordered(dates: impl IntoIterator<Item = NaiveDate>) {
    if !is_newest_first(dates) {
        tracing::warn!("rows are not ordered newest first; statistics will be misaligned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    const FUND_ROWS: &str = r#"[
        {"date": "2024-01-03", "investment_return": 0.02, "cdi": 0.0004,
         "accumulated_networth": 1200.0, "accumulated_quotaholders": 12},
        {"date": "2024-01-02", "investment_return": 0.01, "cdi": 0.0004,
         "accumulated_networth": 1100.0, "accumulated_quotaholders": 11},
        {"date": "2024-01-01", "investment_return": 0.00, "cdi": 0.0004,
         "accumulated_networth": 1000.0, "accumulated_quotaholders": 10}
    ]"#;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_bare_array() {
        let records = fund_records_from_str(FUND_ROWS).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, day(3));
        assert_eq!(records[2].accumulated_quotaholders, 10);
    }

    #[test]
    fn test_api_envelope() {
        let content = format!(r#"{{"success": true, "result": {{"records": {}}}}}"#, FUND_ROWS);
        let records = fund_records_from_str(&content).unwrap();
        assert_eq!(records.len(), 3);

        let quotes = benchmark_quotes_from_str(
            r#"{"records": [
                {"date": "2024-01-02", "value": 5.01},
                {"date": "2024-01-01", "value": 4.98}
            ]}"#,
        )
        .unwrap();
        assert_eq!(quotes[1].value, 4.98);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            fund_records_from_str("{not json"),
            Err(crate::Error::Json(_))
        ));
        assert!(matches!(
            benchmark_quotes_from_str(r#"{"rows": []}"#),
            Err(crate::Error::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FUND_ROWS.as_bytes()).unwrap();

        let records = load_fund_records(file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].investment_return, 0.01);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_benchmark_quotes(dir.path().join("missing.json"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_resolve_against_data_dir() {
        let dir = tempdir().unwrap();

        let resolved = resolve_in(Path::new("no-such-fund.json"), dir.path());
        assert_eq!(resolved, dir.path().join("no-such-fund.json"));

        let absolute = dir.path().join("abs.json");
        assert_eq!(resolve_in(&absolute, Path::new("/elsewhere")), absolute);
    }

    #[test]
    fn test_data_dir_override() {
        assert_eq!(
            data_dir_from(Some(OsString::from("/srv/funds"))),
            PathBuf::from("/srv/funds")
        );
        // An empty override falls back to the default location
        assert_ne!(data_dir_from(Some(OsString::new())), PathBuf::new());
    }

    #[test]
    fn test_is_newest_first() {
        assert!(is_newest_first([day(3), day(2), day(2), day(1)]));
        assert!(is_newest_first(Vec::new()));
        assert!(!is_newest_first([day(1), day(2)]));
    }
}
