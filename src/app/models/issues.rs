//! Recoverable problems found while parsing a single file

use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// A problem that degrades a parse without aborting it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParseIssue {
    /// An optional field is not present
    MissingField { field: &'static str },

    /// A field is present but its value does not match any known variant
    MalformedRecord { field: &'static str, value: String },

    /// A column declares a quantity without a canonical channel; it is dropped
    UnknownColumn { column: usize, quantity: String },
}

impl ParseIssue {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        Self::MalformedRecord {
            field,
            value: value.into(),
        }
    }

    pub fn unknown_column(column: usize, quantity: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column,
            quantity: quantity.into(),
        }
    }

    /// Missing optional fields are routine; everything else deserves a warning
    pub fn is_routine(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing field {}", field),
            Self::MalformedRecord { field, value } => {
                write!(f, "malformed {} record: '{}'", field, value)
            }
            Self::UnknownColumn { column, quantity } => {
                write!(f, "column {} has unknown quantity '{}'", column, quantity)
            }
        }
    }
}

/// Result of extracting one optional field
pub type FieldResult<T> = std::result::Result<T, ParseIssue>;

/// Parsing statistics for one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseStats {
    /// Name of the parsed file, for log context
    pub source: String,

    /// Total number of data rows encountered
    pub total_rows: usize,

    /// Rows turned into samples or layers
    pub rows_parsed: usize,

    /// Rows skipped because they could not be read
    pub rows_skipped: usize,

    /// Cells that were present but not numeric
    pub unreadable_cells: usize,

    /// Recoverable issues in the order they were found
    pub issues: Vec<ParseIssue>,
}

impl ParseStats {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Record a recoverable issue and log it
    pub fn record(&mut self, issue: ParseIssue) {
        if issue.is_routine() {
            debug!("{}: {}", self.source, issue);
        } else {
            warn!("{}: {}", self.source, issue);
        }
        self.issues.push(issue);
    }

    /// Keep the value of a field extraction, recording the issue otherwise
    pub fn take<T>(&mut self, result: FieldResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(issue) => {
                self.record(issue);
                None
            }
        }
    }

    /// Percentage of rows that were parsed
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.rows_parsed as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Issues other than missing optional fields
    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|issue| !issue.is_routine()).count()
    }

    pub fn has_unknown_columns(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, ParseIssue::UnknownColumn { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_records_issue() {
        let mut stats = ParseStats::new("test.gef");

        assert_eq!(stats.take(Ok::<_, ParseIssue>(3)), Some(3));
        assert_eq!(
            stats.take::<f64>(Err(ParseIssue::missing("ZID"))),
            None
        );
        assert_eq!(
            stats.take::<f64>(Err(ParseIssue::malformed("XYID", "31000, x, y"))),
            None
        );

        assert_eq!(stats.issues.len(), 2);
        assert_eq!(stats.warning_count(), 1);
        assert!(!stats.has_unknown_columns());
    }

    #[test]
    fn test_success_rate() {
        let mut stats = ParseStats::new("test.gef");
        assert_eq!(stats.success_rate(), 0.0);

        stats.total_rows = 4;
        stats.rows_parsed = 3;
        stats.rows_skipped = 1;
        assert_eq!(stats.success_rate(), 75.0);
    }

    #[test]
    fn test_issue_display() {
        assert_eq!(
            ParseIssue::unknown_column(5, "99").to_string(),
            "column 5 has unknown quantity '99'"
        );
        assert_eq!(
            ParseIssue::missing("TESTID").to_string(),
            "missing field TESTID"
        );
    }
}
