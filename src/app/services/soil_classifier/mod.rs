//! Soil classification of cone penetration samples
//!
//! Five rule sets label each sample from its cone resistance (qc, MPa) and
//! friction ratio (Rf, %). Every rule set is an ordered candidate list
//! evaluated top-down; the first candidate that applies wins.
//!
//! ## Architecture
//!
//! - [`rules`] - Threshold, boundary-line and Robertson zone primitives
//! - [`classifier`] - Rule set evaluation per sample and per sounding
//!
//! ## Rule Sets
//!
//! - **qc-only**: cone resistance thresholds
//! - **three-type** and **NEN**: upper boundary lines in the
//!   (Rf, log10 qc) chart; a sample strictly below a line belongs to it
//! - **Robertson**: concentric zones around the non-normalized chart centre,
//!   first zone whose index the sample's distance exceeds
//! - **custom**: friction ratio thresholds, never unclassified
//!
//! ## Usage
//!
//! ```rust
//! use gefxml_processor::app::services::soil_classifier::{ChartPoint, SoilClassifier};
//!
//! let classifier = SoilClassifier::new();
//! let classification = classifier.classify(ChartPoint::new(12.0, 0.6));
//!
//! assert_eq!(classification.qc_only, Some("zand"));
//! assert_eq!(classification.custom, "zand");
//! ```

pub mod classifier;
pub mod rules;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use classifier::SoilClassifier;
pub use rules::{Bound, BoundaryLine, ChartPoint, RobertsonZone, Rule, ThresholdRule, first_match};
