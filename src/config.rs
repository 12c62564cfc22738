//! Configuration management and validation.
//!
//! Provides configuration structures for normalization bounds, GEF export
//! formatting and batch processing, with builder-style overrides and
//! validation of the combined settings.

use crate::app::models::InterpretationModel;
use crate::constants::{gef_export, plausibility};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Plausibility bounds applied to normalized samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Lowest accepted cone resistance (MPa)
    pub min_cone_resistance: f64,

    /// Lowest accepted local friction (MPa)
    pub min_local_friction: f64,

    /// Lowest accepted friction ratio (%)
    pub min_friction_ratio: f64,

    /// Highest accepted friction ratio (%)
    pub max_friction_ratio: f64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            min_cone_resistance: plausibility::MIN_CONE_RESISTANCE,
            min_local_friction: plausibility::MIN_LOCAL_FRICTION,
            min_friction_ratio: plausibility::MIN_FRICTION_RATIO,
            max_friction_ratio: plausibility::MAX_FRICTION_RATIO,
        }
    }
}

impl NormalizationConfig {
    /// Set the friction ratio window
    pub fn with_friction_ratio_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_friction_ratio = min;
        self.max_friction_ratio = max;
        self
    }
}

/// Formatting of re-exported GEF files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Literal written for missing values
    pub void_literal: String,

    /// `#FILEOWNER` of exported files
    pub file_owner: String,

    /// Decimal places of CPT values
    pub cpt_decimals: usize,

    /// Decimal places of borehole layer boundaries
    pub bore_decimals: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            void_literal: gef_export::VOID_LITERAL.to_string(),
            file_owner: gef_export::DEFAULT_FILE_OWNER.to_string(),
            cpt_decimals: gef_export::CPT_DECIMALS,
            bore_decimals: gef_export::BORE_DECIMALS,
        }
    }
}

impl ExportConfig {
    pub fn with_file_owner(mut self, owner: impl Into<String>) -> Self {
        self.file_owner = owner.into();
        self
    }

    /// Void value as a number, if the literal is numeric
    pub fn void_value(&self) -> Option<f64> {
        self.void_literal.trim().parse().ok()
    }
}

/// Batch processing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of files processed at the same time
    pub max_concurrent_files: usize,

    /// Directory for re-exported GEF files
    pub output_dir: Option<PathBuf>,

    /// Write a GEF file per processed record
    pub export_gef: bool,

    /// Show a progress bar on stderr
    pub show_progress: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_files: num_cpus::get().max(1),
            output_dir: None,
            export_gef: false,
            show_progress: false,
        }
    }
}

/// Global configuration for survey processing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub normalization: NormalizationConfig,
    pub export: ExportConfig,
    pub batch: BatchConfig,

    /// Rule set used when a sounding is turned into a layered log
    pub interpretation_model: InterpretationModel,
}

impl Config {
    /// Set maximum concurrent files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.batch.max_concurrent_files = max_files;
        self
    }

    /// Export GEF files into the given directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.batch.output_dir = Some(output_dir.into());
        self.batch.export_gef = true;
        self
    }

    /// Enable the progress bar
    pub fn with_progress(mut self) -> Self {
        self.batch.show_progress = true;
        self
    }

    pub fn with_interpretation_model(mut self, model: InterpretationModel) -> Self {
        self.interpretation_model = model;
        self
    }

    pub fn with_normalization(mut self, normalization: NormalizationConfig) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    /// Check the combined settings for consistency
    pub fn validate(&self) -> Result<()> {
        let n = &self.normalization;
        let bounds = [
            ("min_cone_resistance", n.min_cone_resistance),
            ("min_local_friction", n.min_local_friction),
            ("min_friction_ratio", n.min_friction_ratio),
            ("max_friction_ratio", n.max_friction_ratio),
        ];
        if let Some((name, _)) = bounds.iter().find(|(_, value)| !value.is_finite()) {
            return Err(Error::configuration(format!("{} must be finite", name)));
        }

        if n.min_friction_ratio > n.max_friction_ratio {
            return Err(Error::configuration(format!(
                "Friction ratio bounds are inverted: {} > {}",
                n.min_friction_ratio, n.max_friction_ratio
            )));
        }

        if self.batch.max_concurrent_files == 0 {
            return Err(Error::configuration(
                "max_concurrent_files must be at least 1",
            ));
        }

        if self.batch.export_gef && self.batch.output_dir.is_none() {
            return Err(Error::configuration(
                "GEF export requires an output directory",
            ));
        }

        if !self.export.void_value().is_some_and(f64::is_finite) {
            return Err(Error::configuration(format!(
                "void_literal must be a finite number, got '{}'",
                self.export.void_literal
            )));
        }

        if self.export.cpt_decimals > 10 || self.export.bore_decimals > 10 {
            return Err(Error::configuration("At most 10 decimals can be exported"));
        }

        debug!(
            "Configuration valid: {} concurrent files, model {}",
            self.batch.max_concurrent_files, self.interpretation_model
        );
        Ok(())
    }
}
