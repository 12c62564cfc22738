//! Individual normalization steps
//!
//! Each step works on the full sample list; the order in which
//! [`RecordProcessor`](super::RecordProcessor) applies them matters.

use super::stats::FrictionRatioSource;
use crate::app::models::{Channel, ColumnMap, RawTable, Sample, VoidMap};
use crate::config::NormalizationConfig;
use crate::{Error, Result};
use tracing::debug;

/// Map table rows to samples, dropping void cells and unmapped columns
pub fn table_to_samples(table: &RawTable, columns: &ColumnMap, voids: &VoidMap) -> Vec<Sample> {
    table
        .rows
        .iter()
        .map(|row| {
            Sample::from_values(columns.iter().filter_map(|(index, channel)| {
                let value = row.get(index).copied().flatten()?;
                (!voids.is_void(index, value)).then_some((channel, value))
            }))
        })
        .collect()
}

/// Provide a friction ratio when no sample reports one
///
/// Derived from local friction where available; a sample without usable
/// cone resistance gets none. Without local friction both are zero.
pub fn ensure_friction_ratio(samples: &mut [Sample]) -> FrictionRatioSource {
    if samples.iter().any(|s| s.has(Channel::FrictionRatio)) {
        return FrictionRatioSource::Measured;
    }

    if samples.iter().any(|s| s.has(Channel::LocalFriction)) {
        for sample in samples.iter_mut() {
            let fs = sample.get(Channel::LocalFriction);
            let qc = sample.cone_resistance().filter(|qc| *qc != 0.0);
            if let (Some(fs), Some(qc)) = (fs, qc) {
                sample.set(Channel::FrictionRatio, 100.0 * fs / qc);
            }
        }
        debug!("Friction ratio derived from local friction");
        return FrictionRatioSource::Derived;
    }

    for sample in samples.iter_mut() {
        sample.set(Channel::LocalFriction, 0.0);
        sample.set(Channel::FrictionRatio, 0.0);
    }
    debug!("No friction reported; local friction and friction ratio set to zero");
    FrictionRatioSource::Zeroed
}

/// Depth is reported with either sign; canonical depth is positive
pub fn absolute_depth(samples: &mut [Sample]) {
    for sample in samples.iter_mut() {
        if let Some(depth) = sample.depth() {
            sample.set(Channel::Depth, depth.abs());
        }
    }
}

/// Fail when a required channel has no value in any sample
pub fn check_required_channels(samples: &[Sample], source: &str) -> Result<()> {
    for channel in Channel::REQUIRED {
        if !samples.iter().any(|s| s.has(channel)) {
            return Err(Error::required_channel_missing(source, channel.name()));
        }
    }
    Ok(())
}

/// Keep samples holding every required channel; returns the number dropped
pub fn drop_incomplete(samples: &mut Vec<Sample>) -> usize {
    let before = samples.len();
    samples.retain(|s| Channel::REQUIRED.iter().all(|channel| s.has(*channel)));
    before - samples.len()
}

/// Whether a complete sample lies within the plausibility bounds
pub fn is_plausible(sample: &Sample, config: &NormalizationConfig) -> bool {
    let (Some(qc), Some(fs), Some(rf)) = (
        sample.cone_resistance(),
        sample.get(Channel::LocalFriction),
        sample.friction_ratio(),
    ) else {
        return false;
    };

    qc >= config.min_cone_resistance
        && fs >= config.min_local_friction
        && rf >= config.min_friction_ratio
        && rf <= config.max_friction_ratio
}

/// Drop implausible samples; returns the number dropped
pub fn filter_plausible(samples: &mut Vec<Sample>, config: &NormalizationConfig) -> usize {
    let before = samples.len();
    samples.retain(|s| is_plausible(s, config));
    before - samples.len()
}

/// Stable sort by depth
pub fn sort_by_depth(samples: &mut [Sample]) {
    samples.sort_by(|a, b| {
        let a = a.depth().unwrap_or(f64::INFINITY);
        let b = b.depth().unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });
}
