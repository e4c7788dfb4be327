use crate::analyzer::ReportRow;
use crate::error::ReportError;
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

/// Column headers of the average report, in output order
pub const HEADERS: [&str; 4] = ["", "handler", "total", "avg_response_time"];

/// Gap between columns
const COLUMN_SEP: &str = "  ";

/// Extra width every header gets over its own text
const HEADER_PADDING: usize = 2;

/// A table cell. Columns made only of numbers are right-aligned on the
/// decimal point; anything else is left-aligned text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(u64),
    Float(f64),
    Text(String),
}

impl Cell {
    fn is_numeric(&self) -> bool {
        !matches!(self, Cell::Text(_))
    }

    fn render(&self) -> String {
        match self {
            Cell::Int(n) => n.to_string(),
            Cell::Float(x) => x.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl ReportRow {
    pub fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.index as u64),
            Cell::Text(self.handler.clone()),
            Cell::Int(self.total),
            Cell::Float(self.avg_response_time),
        ]
    }
}

/// Print the report rows as a table on stdout
pub fn print_table(rows: &[ReportRow]) -> Result<(), ReportError> {
    let cells: Vec<Vec<Cell>> = rows.iter().map(ReportRow::cells).collect();
    let table = render_table(&HEADERS, &cells);

    let mut out = io::stdout().lock();
    write_table(&mut out, &table).map_err(ReportError::Output)
}

fn write_table(out: &mut impl Write, table: &str) -> io::Result<()> {
    let mut lines = table.lines();
    if let Some(header) = lines.next() {
        writeln!(out, "{}", header.bold())?;
    }
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Lay out `rows` under `headers`: header line, dashed rule, one line per row.
/// Rows shorter than `headers` are padded with empty cells.
pub fn render_table(headers: &[&str], rows: &[Vec<Cell>]) -> String {
    let columns: Vec<Vec<String>> = (0..headers.len())
        .map(|col| {
            let cells: Vec<&Cell> = rows.iter().filter_map(|row| row.get(col)).collect();
            let numeric = !cells.is_empty() && cells.len() == rows.len();
            let numeric = numeric && cells.iter().all(|cell| cell.is_numeric());
            let rendered: Vec<String> = cells.iter().map(|cell| cell.render()).collect();
            let mut column = if numeric {
                align_decimals(rendered)
            } else {
                rendered
            };
            column.resize(rows.len(), String::new());

            let width = column
                .iter()
                .map(|s| s.chars().count())
                .chain(std::iter::once(headers[col].chars().count() + HEADER_PADDING))
                .max()
                .unwrap_or(HEADER_PADDING);

            std::iter::once(headers[col].to_string())
                .chain(std::iter::once("-".repeat(width)))
                .chain(column)
                .map(|s| pad(&s, width, numeric))
                .collect()
        })
        .collect();

    let height = rows.len() + 2;
    (0..height)
        .map(|line| {
            columns
                .iter()
                .map(|column| column[line].as_str())
                .collect::<Vec<_>>()
                .join(COLUMN_SEP)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pad numbers on the right so their decimal points line up. A number with
/// no point is treated as if it had one just past its last digit.
fn align_decimals(values: Vec<String>) -> Vec<String> {
    let after_point = |s: &str| match s.find('.') {
        Some(pos) => (s.len() - pos - 1) as isize,
        None => -1,
    };
    let max = values.iter().map(|s| after_point(s.as_str())).max().unwrap_or(-1);
    values
        .into_iter()
        .map(|s| {
            let missing = (max - after_point(s.as_str())) as usize;
            format!("{}{}", s, " ".repeat(missing))
        })
        .collect()
}

fn pad(s: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{:>width$}", s, width = width)
    } else {
        format!("{:<width$}", s, width = width)
    }
}

/// Export the report rows as JSON to the given path
pub fn export_json(rows: &[ReportRow], path: &Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(rows)?;
    std::fs::write(path, json).map_err(|source| ReportError::Export {
        path: path.to_path_buf(),
        source,
    })
}
