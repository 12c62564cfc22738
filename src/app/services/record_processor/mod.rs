//! Sounding normalization
//!
//! Turns the raw numeric table of a parsed CPT into a canonical sounding:
//! named channels without sentinels, a depth channel (reconstructed from
//! penetration length and inclination when not measured), and only samples
//! that are complete and physically plausible, sorted by depth.
//!
//! # Architecture
//!
//! - [`processor`] - RecordProcessor and pipeline orchestration
//! - [`normalizer`] - Individual cleaning and filtering steps
//! - [`depth`] - Depth reconstruction from penetration length and inclination
//! - [`stats`] - Normalization statistics and result structures
//!
//! # Processing Pipeline
//!
//! 1. **Channel mapping**: void sentinels become missing, columns become channels
//! 2. **Friction ratio**: derived from local friction when not reported
//! 3. **Depth**: made positive, or reconstructed when no sample has one
//! 4. **Required channels**: depth, qc, fs and Rf must each have a value somewhere
//! 5. **Filtering**: incomplete and implausible samples are dropped
//! 6. **Ordering**: final depth recomputed, samples sorted by depth
//!
//! # Example Usage
//!
//! ```rust
//! use gefxml_processor::app::services::gef_parser::GefParser;
//! use gefxml_processor::app::services::record_processor::RecordProcessor;
//! use gefxml_processor::config::NormalizationConfig;
//!
//! # fn example() -> gefxml_processor::Result<()> {
//! let raw = GefParser::new().parse_cpt_file(std::path::Path::new("CPT000001.gef"))?;
//! let processor = RecordProcessor::new(NormalizationConfig::default());
//!
//! let result = processor.normalize(raw)?;
//! println!("{}", result.stats.summary());
//! # Ok(())
//! # }
//! ```

pub mod depth;
pub mod normalizer;
pub mod processor;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use depth::{DepthMethod, reconstruct_depth};
pub use processor::RecordProcessor;
pub use stats::{FrictionRatioSource, NormalizationResult, NormalizationStats};
