//! Normalization statistics and result structures

use super::depth::DepthMethod;
use crate::app::models::{ParseStats, Sounding};
use serde::Serialize;
use std::fmt;

/// Where the friction ratio channel came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrictionRatioSource {
    #[default]
    Measured,
    /// 100 x local friction / cone resistance
    Derived,
    /// Neither friction channel reported; both set to zero
    Zeroed,
}

impl fmt::Display for FrictionRatioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FrictionRatioSource::Measured => "measured",
            FrictionRatioSource::Derived => "derived",
            FrictionRatioSource::Zeroed => "zeroed",
        })
    }
}

/// Statistics for one normalization run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizationStats {
    /// Samples read from the raw table
    pub input_samples: usize,
    /// Samples dropped for a missing required channel
    pub dropped_missing: usize,
    /// Samples dropped by the plausibility bounds
    pub dropped_out_of_range: usize,
    /// Samples in the canonical sounding
    pub retained: usize,
    pub depth_method: DepthMethod,
    pub friction_ratio: FrictionRatioSource,
}

impl NormalizationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retained samples as a percentage of the input
    pub fn retention_rate(&self) -> f64 {
        if self.input_samples == 0 {
            0.0
        } else {
            (self.retained as f64 / self.input_samples as f64) * 100.0
        }
    }

    pub fn dropped(&self) -> usize {
        self.dropped_missing + self.dropped_out_of_range
    }

    pub fn summary(&self) -> String {
        format!(
            "Normalization: {} -> {} samples ({:.1}% retained) | \
             Missing values: {} | Out of range: {} | Depth: {} | Friction ratio: {}",
            self.input_samples,
            self.retained,
            self.retention_rate(),
            self.dropped_missing,
            self.dropped_out_of_range,
            self.depth_method,
            self.friction_ratio
        )
    }
}

/// Canonical sounding with the statistics of how it was obtained
#[derive(Debug, Clone)]
pub struct NormalizationResult {
    pub sounding: Sounding,
    pub stats: NormalizationStats,
    /// Statistics of the parse that produced the raw table
    pub parse_stats: ParseStats,
}

impl NormalizationResult {
    pub fn new(sounding: Sounding, stats: NormalizationStats, parse_stats: ParseStats) -> Self {
        Self {
            sounding,
            stats,
            parse_stats,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.sounding.len()
    }
}
