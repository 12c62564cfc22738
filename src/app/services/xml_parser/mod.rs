//! BRO XML parser for cone penetration tests and borehole logs
//!
//! BRO deliveries are namespaced XML documents. Elements are matched on their
//! namespace-stripped tag name, so the reader follows the registry's
//! vocabulary rather than a particular schema version.
//!
//! - [`parser`] - Document loading and kind detection
//! - [`fields`] - Shared element lookups (location, dates, text records)
//! - [`cpt`] - Sounding extraction and value blob decoding
//! - [`borehole`] - Descriptive borehole log extraction

pub mod borehole;
pub mod cpt;
pub mod fields;
pub mod parser;

#[cfg(test)]
pub mod tests;

pub use parser::{XmlParser, detect_document_kind};
