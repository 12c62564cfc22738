//! Header record and value formatting

use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

/// Append a `#KEY= value` record
pub fn push_record(out: &mut String, key: &str, value: impl std::fmt::Display) {
    // writing to a String cannot fail
    let _ = writeln!(out, "#{}= {}", key, value);
}

/// GEF date value: `yyyy, mm, dd`
pub fn gef_date(date: NaiveDate) -> String {
    format!("{}, {:02}, {:02}", date.year(), date.month(), date.day())
}

/// Fixed-decimal value, or the void literal when missing
pub fn format_value(value: Option<f64>, decimals: usize, void_literal: &str) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{:.*}", decimals, value),
        _ => void_literal.to_string(),
    }
}

/// Text field value; GEF data fields cannot hold the separator
pub fn text_field(value: Option<&str>, separator: char) -> String {
    value.unwrap_or_default().replace(separator, ",")
}
