//! Main record processor implementation and pipeline orchestration

use super::depth::reconstruct_depth;
use super::normalizer::{
    absolute_depth, check_required_channels, drop_incomplete, ensure_friction_ratio,
    filter_plausible, sort_by_depth, table_to_samples,
};
use super::stats::{NormalizationResult, NormalizationStats};
use crate::app::models::{RawSounding, Sounding};
use crate::config::NormalizationConfig;
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Record processor for raw CPT tables
///
/// Stateless apart from its bounds; one processor can normalize any number
/// of soundings, from either input format.
///
/// # Example
///
/// ```rust
/// use gefxml_processor::app::services::record_processor::RecordProcessor;
/// use gefxml_processor::config::NormalizationConfig;
///
/// let processor = RecordProcessor::new(
///     NormalizationConfig::default().with_friction_ratio_bounds(0.0, 10.0),
/// );
/// assert_eq!(processor.config().max_friction_ratio, 10.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordProcessor {
    config: NormalizationConfig,
}

impl RecordProcessor {
    pub fn new(config: NormalizationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    /// Normalize a raw sounding into a canonical one
    ///
    /// Fails when a required channel is absent from every sample or when no
    /// sample survives filtering.
    pub fn normalize(&self, raw: RawSounding) -> Result<NormalizationResult> {
        let RawSounding {
            metadata,
            table,
            columns,
            voids,
            removed_layers,
            stats: parse_stats,
        } = raw;
        let source = metadata.source_name().to_string();
        let mut stats = NormalizationStats::new();

        let mut samples = table_to_samples(&table, &columns, &voids);
        stats.input_samples = samples.len();
        debug!("{}: {} samples from raw table", source, samples.len());

        stats.friction_ratio = ensure_friction_ratio(&mut samples);
        absolute_depth(&mut samples);
        stats.depth_method = reconstruct_depth(&mut samples);
        if stats.depth_method.is_reconstructed() {
            info!("{}: depth reconstructed from {}", source, stats.depth_method);
        }

        check_required_channels(&samples, &source)?;

        stats.dropped_missing = drop_incomplete(&mut samples);
        stats.dropped_out_of_range = filter_plausible(&mut samples, &self.config);
        if samples.is_empty() {
            return Err(Error::no_valid_samples(&source));
        }

        sort_by_depth(&mut samples);
        stats.retained = samples.len();

        let mut sounding = Sounding::new(metadata, samples);
        sounding.metadata.final_depth = sounding.max_depth();
        sounding.removed_layers = removed_layers;

        info!("{}: {}", source, stats.summary());
        if stats.retention_rate() < 50.0 {
            warn!(
                "{}: only {:.1}% of samples retained",
                source,
                stats.retention_rate()
            );
        }

        Ok(NormalizationResult::new(sounding, stats, parse_stats))
    }
}
