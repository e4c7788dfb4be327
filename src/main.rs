mod analyzer;
mod args;
mod error;
mod logging;
mod parser;
mod registry;
mod report;

use args::Args;
use error::ReportError;
use registry::Registry;
use std::io::{self, IsTerminal};
use tracing::info;

fn main() {
    let registry = Registry::builtin();
    // Exits with a usage message before any file is touched.
    let args = args::parse(&registry);

    logging::init_logging(args.verbose);
    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&registry, &args) {
        println!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Read the logs, build the requested report and print it.
fn run(registry: &Registry, args: &Args) -> Result<(), ReportError> {
    let records = parser::read_logs(&args.file)?;
    info!(records = records.len(), files = args.file.len(), "logs loaded");

    let build_report = registry
        .lookup(&args.report)
        .ok_or_else(|| ReportError::UnknownReport(args.report.clone()))?;
    let rows = build_report(&records, args.date.as_deref())?;
    info!(report = %args.report, rows = rows.len(), "report built");

    report::print_table(&rows)?;

    if let Some(json_path) = &args.json_output {
        report::export_json(&rows, json_path)?;
        info!(path = %json_path.display(), "JSON report saved");
    }

    Ok(())
}
