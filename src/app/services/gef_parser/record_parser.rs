//! GEF data block tokenization
//!
//! Splits the data block into records and fields using the declared
//! separators, and converts numeric records into a [`RawTable`].

use super::field_parsers::{extract_separator, parse_number};
use super::header::GefHeader;
use crate::app::models::{ParseIssue, ParseStats, RawTable};

/// How fields within a record are separated
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSeparator {
    /// Any run of whitespace
    Whitespace,
    /// A literal separator; whitespace after it is skipped
    Literal(String),
}

/// Separators declared in the header
#[derive(Debug, Clone, PartialEq)]
pub struct Separators {
    pub column: ColumnSeparator,
    /// Marker closing each record, if declared
    pub record: Option<String>,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            column: ColumnSeparator::Whitespace,
            record: None,
        }
    }
}

impl Separators {
    /// Read `#COLUMNSEPARATOR` and `#RECORDSEPARATOR`, defaulting when absent
    pub fn from_header(header: &GefHeader, stats: &mut ParseStats) -> Self {
        let column = match extract_separator(header, "COLUMNSEPARATOR") {
            Ok(sep) if sep.trim().is_empty() => ColumnSeparator::Whitespace,
            Ok(sep) => ColumnSeparator::Literal(sep),
            Err(issue) => {
                stats.record(issue);
                ColumnSeparator::Whitespace
            }
        };

        // Absent record separators are the norm, so they are not reported
        let record = extract_separator(header, "RECORDSEPARATOR")
            .ok()
            .filter(|sep| !sep.trim().is_empty());

        Self { column, record }
    }

    /// Split the data block into records of trimmed fields
    ///
    /// Blank lines are skipped. A declared record separator ends a record
    /// and may also join several records on one line.
    pub fn records<'a>(&self, data: &'a str) -> Vec<Vec<&'a str>> {
        let mut records = Vec::new();

        for line in data.lines() {
            let chunks: Vec<&str> = match &self.record {
                Some(sep) => line.split(sep.as_str()).collect(),
                None => vec![line],
            };

            for chunk in chunks {
                if chunk.trim().is_empty() {
                    continue;
                }
                records.push(self.fields(chunk));
            }
        }

        records
    }

    fn fields<'a>(&self, record: &'a str) -> Vec<&'a str> {
        match &self.column {
            ColumnSeparator::Whitespace => record.split_whitespace().collect(),
            ColumnSeparator::Literal(sep) => {
                let mut fields: Vec<&str> = record.split(sep.as_str()).map(str::trim).collect();
                // a closing separator leaves one empty trailing field
                if fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
                    fields.pop();
                }
                fields
            }
        }
    }
}

/// Convert tokenized records into a numeric table
///
/// Non-numeric cells become missing and are counted; a record without a
/// single numeric cell is skipped.
pub fn parse_numeric_records(records: &[Vec<&str>], stats: &mut ParseStats) -> RawTable {
    let mut rows = Vec::with_capacity(records.len());

    for (line, record) in records.iter().enumerate() {
        stats.total_rows += 1;

        let row: Vec<Option<f64>> = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    return None;
                }
                let value = parse_number(field);
                if value.is_none() {
                    stats.unreadable_cells += 1;
                }
                value
            })
            .collect();

        if row.iter().all(Option::is_none) {
            stats.rows_skipped += 1;
            stats.record(ParseIssue::malformed("data record", record.join(" ")));
            tracing::trace!("Skipping data record {}", line + 1);
            continue;
        }

        stats.rows_parsed += 1;
        rows.push(row);
    }

    RawTable::new(rows)
}

/// Strip GEF text quoting from a field
pub fn unquote(field: &str) -> String {
    field.trim().replace(['\'', '"'], "")
}
