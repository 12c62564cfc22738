//! Soil component decomposition and layer synthesis
//!
//! Every soil layer carries a map of lithology fractions summing to one.
//! BRO soil names decompose through a fixed table; GEF borehole codes
//! (NEN 5104 style, e.g. `Zs1h2`) through their letters and intensity digits.
//! A classified sounding can be turned into a borehole-like layer model.
//!
//! ## Architecture
//!
//! - [`components`] - Soil name and compound code decomposition
//! - [`synthesis`] - Layer model from a classified sounding
//!
//! ## Usage
//!
//! ```rust
//! use gefxml_processor::app::models::Lithology;
//! use gefxml_processor::app::services::layer_model::{decode_compound_code, soil_name_components};
//!
//! let components = soil_name_components("zwakSiltigZand");
//! assert_eq!(components[&Lithology::Sand], 0.9);
//!
//! let components = decode_compound_code("Zs2");
//! assert!((components[&Lithology::Silt] - 0.1).abs() < 1e-9);
//! ```

pub mod components;
pub mod synthesis;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use components::{component_sum, decode_compound_code, soil_name_components};
pub use synthesis::{CPT_DESCRIPTION_QUALITY, borehole_from_cpt};
