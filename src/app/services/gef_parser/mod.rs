//! GEF parser for cone penetration tests and borehole logs
//!
//! GEF is a line-oriented exchange format: a header of `#KEY= value` records
//! terminated by `#EOH=`, followed by a delimited data block. Producers fill
//! the header loosely, so every metadata field is extracted on its own and a
//! missing or malformed field degrades the parse instead of failing it.
//!
//! ## Architecture
//!
//! - [`parser`] - Parse orchestration, section splitting and report kind detection
//! - [`header`] - Header record tokenization
//! - [`field_parsers`] - Per-field extraction returning [`FieldResult`]
//! - [`coordinates`] - Legacy RD reprojection
//! - [`column_mapping`] - Column and void maps from `#COLUMNINFO`/`#COLUMNVOID`
//! - [`record_parser`] - Data block tokenization
//! - [`borehole`] - GEF-BORE layer assembly
//!
//! ## Usage
//!
//! ```rust
//! use gefxml_processor::app::services::gef_parser::GefParser;
//!
//! # fn example() -> gefxml_processor::Result<()> {
//! let parser = GefParser::new();
//! let raw = parser.parse_cpt_file(std::path::Path::new("CPT000001.gef"))?;
//!
//! println!("Read {} rows with {} mapped columns",
//!          raw.stats.rows_parsed,
//!          raw.columns.len());
//! # Ok(())
//! # }
//! ```
//!
//! [`FieldResult`]: crate::app::models::FieldResult

pub mod borehole;
pub mod column_mapping;
pub mod coordinates;
pub mod field_parsers;
pub mod header;
pub mod parser;
pub mod record_parser;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header::{GefHeader, HeaderRecord};
pub use parser::{GefParser, detect_report_kind, split_sections};
