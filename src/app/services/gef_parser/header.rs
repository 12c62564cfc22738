//! GEF header tokenization
//!
//! Turns the header section into `#KEY= value` records. Field-level
//! interpretation lives in [`super::field_parsers`].

use regex::Regex;
use std::sync::LazyLock;

static HEADER_RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#(?P<key>[A-Za-z]+)\s*=\s*(?P<value>.*?)\s*$")
        .expect("header record pattern is valid")
});

/// One `#KEY= value` line of a GEF header
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderRecord {
    /// Upper-cased key without the leading `#`
    pub key: String,

    /// Raw value with surrounding whitespace removed
    pub value: String,

    /// One-based line number within the file
    pub line: usize,
}

impl HeaderRecord {
    /// Comma-separated fields of the value, trimmed
    pub fn fields(&self) -> Vec<&str> {
        self.value.split(',').map(str::trim).collect()
    }
}

/// Tokenized GEF header
#[derive(Debug, Clone, Default)]
pub struct GefHeader {
    records: Vec<HeaderRecord>,
}

impl GefHeader {
    /// Parse the header section; lines that are not records are ignored
    pub fn parse(header_text: &str) -> Self {
        let records = header_text
            .lines()
            .enumerate()
            .filter_map(|(index, line)| {
                HEADER_RECORD.captures(line).map(|caps| HeaderRecord {
                    key: caps["key"].to_uppercase(),
                    value: caps["value"].to_string(),
                    line: index + 1,
                })
            })
            .collect();

        Self { records }
    }

    /// First record with the given key
    pub fn first(&self, key: &str) -> Option<&HeaderRecord> {
        self.records.iter().find(|record| record.key == key)
    }

    /// Every record with the given key, in file order
    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a HeaderRecord> + 'a {
        self.records.iter().filter(move |record| record.key == key)
    }

    /// Value of the first record with the given key
    pub fn value(&self, key: &str) -> Option<&str> {
        self.first(key).map(|record| record.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
