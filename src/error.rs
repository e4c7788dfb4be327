use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a report run after the arguments were accepted
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("File not found: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in file {} (line {line}): {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record {record} is missing required field '{field}'")]
    MissingField { field: &'static str, record: usize },

    #[error("Unknown report '{0}'")]
    UnknownReport(String),

    #[error("Failed to write report: {0}")]
    Output(#[source] io::Error),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write JSON output to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
