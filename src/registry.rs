use crate::analyzer::{self, ReportRow};
use crate::error::ReportError;
use crate::parser::LogRecord;
use std::collections::BTreeMap;

/// Signature every report conforms to: the parsed records plus an optional
/// `YYYY-MM-DD` filter in, ordered table rows out.
pub type ReportFn = fn(&[LogRecord], Option<&str>) -> Result<Vec<ReportRow>, ReportError>;

/// Name → report table. Built once at startup and passed to whoever needs it.
#[derive(Clone, Default)]
pub struct Registry {
    reports: BTreeMap<&'static str, ReportFn>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports this binary ships with
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("average", analyzer::average_response_time);
        registry
    }

    /// Add a report. Registering a name again replaces the earlier entry.
    pub fn register(&mut self, name: &'static str, report: ReportFn) {
        self.reports.insert(name, report);
    }

    /// Registered names, alphabetically
    pub fn names(&self) -> Vec<&'static str> {
        self.reports.keys().copied().collect()
    }

    pub fn lookup(&self, name: &str) -> Option<ReportFn> {
        self.reports.get(name).copied()
    }
}
