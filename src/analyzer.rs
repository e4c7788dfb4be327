use crate::error::ReportError;
use crate::parser::LogRecord;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Decimal places kept in reported averages
pub const AVERAGE_PRECISION: usize = 4;

/// One line of the average response time report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub index: usize,
    pub handler: String,
    pub total: u64,
    pub avg_response_time: f64,
}

/// Running totals for one endpoint
#[derive(Debug, Clone, Copy)]
struct EndpointStats {
    total_count: u64,
    total_response_time: f64,
}

impl EndpointStats {
    fn new(response_time: f64) -> Self {
        Self {
            total_count: 1,
            total_response_time: response_time,
        }
    }

    fn record(&mut self, response_time: f64) {
        self.total_count += 1;
        self.total_response_time += response_time;
    }

    fn average(&self) -> f64 {
        self.total_response_time / self.total_count as f64
    }
}

/// Group records by URL and report the request count and mean response time
/// of each, in the order URLs first appear.
///
/// With `date` set, only records whose `@timestamp` starts with exactly that
/// `YYYY-MM-DD` string are counted. `url` and `response_time` are required on
/// every record, filtered or not; the first record missing one fails the
/// whole report.
pub fn average_response_time(
    records: &[LogRecord],
    date: Option<&str>,
) -> Result<Vec<ReportRow>, ReportError> {
    // url → slot in `endpoints`, which keeps first-seen order
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut endpoints: Vec<(&str, EndpointStats)> = Vec::new();
    let mut skipped = 0usize;

    for (i, record) in records.iter().enumerate() {
        let url = record.url(i)?;
        let response_time = record.response_time(i)?;

        if let Some(date) = date {
            if record.date(i)? != date {
                skipped += 1;
                continue;
            }
        }

        match slots.entry(url) {
            Entry::Occupied(slot) => endpoints[*slot.get()].1.record(response_time),
            Entry::Vacant(slot) => {
                slot.insert(endpoints.len());
                endpoints.push((url, EndpointStats::new(response_time)));
            }
        }
    }

    debug!(
        endpoints = endpoints.len(),
        skipped, "aggregated average response times"
    );

    Ok(endpoints
        .into_iter()
        .enumerate()
        .map(|(index, (url, stats))| ReportRow {
            index,
            handler: url.to_string(),
            total: stats.total_count,
            avg_response_time: round_to(stats.average(), AVERAGE_PRECISION),
        })
        .collect())
}

/// Round to `places` decimals, ties to even.
///
/// Goes through decimal formatting so the exact binary value decides the
/// rounding rather than a scaled (and already rounded) product.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
