use crate::error::ReportError;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// A single access-log record, one per non-blank input line.
///
/// Only the fields the reports read are kept; any other keys in the JSON
/// object are ignored. Fields are optional at parse time and checked when a
/// report asks for them, so a record is only rejected by the report that
/// actually needs the missing value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogRecord {
    pub url: Option<String>,
    pub response_time: Option<f64>,
    #[serde(rename = "@timestamp")]
    pub timestamp: Option<String>,
}

impl LogRecord {
    /// The request URL. `record` is this record's position in the input and
    /// only feeds the error message.
    pub fn url(&self, record: usize) -> Result<&str, ReportError> {
        self.url.as_deref().ok_or(ReportError::MissingField { field: "url", record })
    }

    /// Response time in seconds.
    pub fn response_time(&self, record: usize) -> Result<f64, ReportError> {
        self.response_time.ok_or(ReportError::MissingField {
            field: "response_time",
            record,
        })
    }

    /// The `YYYY-MM-DD` part of `@timestamp`: its first 10 characters, or the
    /// whole value when it is shorter.
    pub fn date(&self, record: usize) -> Result<&str, ReportError> {
        let timestamp = self.timestamp.as_deref().ok_or(ReportError::MissingField {
            field: "@timestamp",
            record,
        })?;
        Ok(match timestamp.char_indices().nth(10) {
            Some((end, _)) => &timestamp[..end],
            None => timestamp,
        })
    }
}

/// Read every file in order and parse each non-blank line as one JSON record.
///
/// The first missing file or malformed line aborts the whole read; nothing
/// parsed before it is returned.
pub fn read_logs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<LogRecord>, ReportError> {
    let mut records = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let count = read_log_file(path, &mut records)?;
        debug!(path = %path.display(), records = count, "read log file");
    }
    Ok(records)
}

fn read_log_file(path: &Path, records: &mut Vec<LogRecord>) -> Result<usize, ReportError> {
    let file = File::open(path).map_err(|source| ReportError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let before = records.len();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record = serde_json::from_str(line).map_err(|source| ReportError::InvalidJson {
            path: path.to_path_buf(),
            line: line_num + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records.len() - before)
}

// ─── Unit Tests ──────────────────────────────────────────────────────────────
