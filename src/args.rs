use crate::registry::Registry;
use clap::{CommandFactory, FromArgMatches, Parser};
use regex::Regex;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Builds per-endpoint reports from line-delimited JSON access logs
#[derive(Parser, Debug)]
#[command(
    name = "log_report",
    author,
    version,
    about = "Aggregates line-delimited JSON access logs into a per-endpoint report table"
)]
pub struct Args {
    /// Log files to read, in order
    #[arg(long = "file", value_name = "FILE", required = true, num_args = 1..)]
    pub file: Vec<PathBuf>,

    /// Report to build
    #[arg(long = "report", value_name = "NAME")]
    pub report: String,

    /// Only count records from this day
    #[arg(long = "date", value_name = "YYYY-MM-DD", value_parser = validate_date)]
    pub date: Option<String>,

    /// Also write the report rows as JSON to the specified file path
    #[arg(short = 'j', long = "json-output", value_name = "OUTPUT_FILE")]
    pub json_output: Option<PathBuf>,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse the process arguments, exiting with a usage message on failure.
pub fn parse(registry: &Registry) -> Args {
    parse_from(registry, std::env::args_os()).unwrap_or_else(|e| e.exit())
}

/// Parse `argv` (program name first), validating `--report` against `registry`.
pub fn parse_from<I, T>(registry: &Registry, argv: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let names = registry.names();
    let mut command = Args::command().mut_arg("report", move |arg| {
        arg.value_parser(move |value: &str| validate_report(&names, value))
    });
    let matches = command.try_get_matches_from_mut(argv)?;
    Args::from_arg_matches(&matches).map_err(|e| e.format(&mut command))
}

fn validate_report(names: &[&str], value: &str) -> Result<String, String> {
    if names.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "Invalid report name '{}'. Allowed report names: {}",
            value,
            names.join(", ")
        ))
    }
}

static DATE_REGEX: OnceLock<Regex> = OnceLock::new();

fn date_regex() -> &'static Regex {
    DATE_REGEX.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("hard-coded regex should always compile")
    })
}

/// Shape check only: `2025-13-99` is accepted.
fn validate_date(value: &str) -> Result<String, String> {
    if date_regex().is_match(value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "'{}' does not match the date pattern YYYY-MM-DD (e.g. 2025-06-22)",
            value
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse_args(argv: &[&str]) -> Result<Args, clap::Error> {
        parse_from(&Registry::builtin(), argv)
    }

    #[test]
    fn parses_all_flags() {
        let args = parse_args(&[
            "log_report", "--file", "test.log", "--report", "average", "--date", "2025-05-05",
        ])
        .expect("valid arguments");
        assert_eq!(args.file, vec![PathBuf::from("test.log")]);
        assert_eq!(args.report, "average");
        assert_eq!(args.date.as_deref(), Some("2025-05-05"));
        assert_eq!(args.json_output, None);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn accepts_several_files() {
        let args = parse_args(&[
            "log_report", "--file", "a.log", "b.log", "c.log", "--report", "average",
        ])
        .unwrap();
        assert_eq!(
            args.file,
            vec![
                PathBuf::from("a.log"),
                PathBuf::from("b.log"),
                PathBuf::from("c.log")
            ]
        );
        assert_eq!(args.date, None);
    }

    #[test]
    fn rejects_unknown_report() {
        let err = parse_args(&[
            "log_report", "--file", "test.log", "--report", "wrong_report", "--date", "2025-05-05",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err
            .to_string()
            .contains("Invalid report name 'wrong_report'. Allowed report names: average"));
    }

    #[test]
    fn allowed_names_follow_the_registry() {
        fn noop(
            _: &[crate::parser::LogRecord],
            _: Option<&str>,
        ) -> Result<Vec<crate::analyzer::ReportRow>, crate::error::ReportError> {
            Ok(Vec::new())
        }
        let mut registry = Registry::builtin();
        registry.register("errors", noop);
        registry.register("apdex", noop);

        let err = parse_from(&registry, ["log_report", "--file", "a", "--report", "x"])
            .unwrap_err();
        assert!(err.to_string().contains("Allowed report names: apdex, average, errors"));

        let args = parse_from(&registry, ["log_report", "--file", "a", "--report", "errors"])
            .unwrap();
        assert_eq!(args.report, "errors");
    }

    #[test]
    fn rejects_malformed_date() {
        for bad in ["wrong_date", "2025-6-22", "2025-06-22T00:00", "20250622", " 2025-06-22"] {
            let err = parse_args(&[
                "log_report", "--file", "test.log", "--report", "average", "--date", bad,
            ])
            .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "date {:?}", bad);
        }
    }

    #[test]
    fn date_pattern_is_not_a_calendar_check() {
        let args = parse_args(&[
            "log_report", "--file", "test.log", "--report", "average", "--date", "2025-13-99",
        ])
        .unwrap();
        assert_eq!(args.date.as_deref(), Some("2025-13-99"));
    }

    #[test]
    fn file_and_report_are_required() {
        let err = parse_args(&["log_report", "--report", "average"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = parse_args(&["log_report", "--file", "test.log"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn file_needs_a_value() {
        assert!(parse_args(&["log_report", "--file", "--report", "average"]).is_err());
    }

    #[test]
    fn optional_outputs() {
        let args = parse_args(&[
            "log_report", "--file", "a.log", "--report", "average", "-j", "out.json", "-vv",
        ])
        .unwrap();
        assert_eq!(args.json_output, Some(PathBuf::from("out.json")));
        assert_eq!(args.verbose, 2);
    }
}
