//! GEF export of canonical soundings and borehole logs
//!
//! Output is deterministic: every header value comes from the record or the
//! export configuration, never from the clock.
//!
//! # Architecture
//!
//! - [`writer`] - GefWriter with CPT and borehole serialization
//! - [`format`] - Header record and value formatting
//!
//! # Basic Usage
//!
//! ```rust
//! use gefxml_processor::app::services::gef_writer::GefWriter;
//! use gefxml_processor::app::models::Sounding;
//! use gefxml_processor::config::ExportConfig;
//!
//! # async fn example(sounding: Sounding) -> gefxml_processor::Result<()> {
//! let writer = GefWriter::new(ExportConfig::default().with_file_owner("Acme"));
//! writer.write_cpt(&sounding, std::path::Path::new("out/CPT000001.gef")).await?;
//! # Ok(())
//! # }
//! ```

pub mod format;
pub mod writer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use writer::{CPT_EXPORT_COLUMNS, GefWriter};
