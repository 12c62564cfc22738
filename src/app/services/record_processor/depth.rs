//! Depth reconstruction from penetration length and inclination
//!
//! Only used when no sample carries a depth. The cone follows the rod, so
//! every penetration increment contributes its vertical projection. The
//! first sample has no increment and therefore no depth.

use crate::app::models::{Channel, Sample};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// How the depth channel of a sounding was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthMethod {
    /// Reported by the file
    #[default]
    Measured,
    /// Integrated along the reported resultant inclination
    ResultantInclination,
    /// Resultant derived from east-west and north-south inclination
    EastWestNorthSouth,
    /// Resultant derived from X and Y inclination
    InclinationXY,
    /// Penetration length taken as depth
    PenetrationLength,
    /// No penetration length to derive from
    Unavailable,
}

impl DepthMethod {
    pub fn name(&self) -> &'static str {
        match self {
            DepthMethod::Measured => "measured",
            DepthMethod::ResultantInclination => "resultant inclination",
            DepthMethod::EastWestNorthSouth => "EW/NS inclination",
            DepthMethod::InclinationXY => "X/Y inclination",
            DepthMethod::PenetrationLength => "penetration length",
            DepthMethod::Unavailable => "unavailable",
        }
    }

    pub fn is_reconstructed(&self) -> bool {
        !matches!(self, DepthMethod::Measured | DepthMethod::Unavailable)
    }
}

impl fmt::Display for DepthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derive a depth channel when none of the samples has one
///
/// Samples are stable-sorted by penetration length (missing last) before
/// any path runs. Returns the path used.
pub fn reconstruct_depth(samples: &mut [Sample]) -> DepthMethod {
    if has_channel(samples, Channel::Depth) {
        return DepthMethod::Measured;
    }
    if !has_channel(samples, Channel::PenetrationLength) {
        debug!("No depth and no penetration length; depth cannot be derived");
        return DepthMethod::Unavailable;
    }

    samples.sort_by(|a, b| {
        match (a.get(Channel::PenetrationLength), b.get(Channel::PenetrationLength)) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });

    let method = if has_channel(samples, Channel::InclinationResultant) {
        DepthMethod::ResultantInclination
    } else if has_channel(samples, Channel::InclinationEW) && has_channel(samples, Channel::InclinationNS) {
        derive_resultant(samples, Channel::InclinationEW, Channel::InclinationNS);
        DepthMethod::EastWestNorthSouth
    } else if has_channel(samples, Channel::InclinationX) && has_channel(samples, Channel::InclinationY) {
        derive_resultant(samples, Channel::InclinationX, Channel::InclinationY);
        DepthMethod::InclinationXY
    } else {
        for sample in samples.iter_mut() {
            if let Some(length) = sample.get(Channel::PenetrationLength) {
                sample.set(Channel::Depth, length.abs());
            }
        }
        return DepthMethod::PenetrationLength;
    };

    integrate_inclined_increments(samples);
    method
}

fn has_channel(samples: &[Sample], channel: Channel) -> bool {
    samples.iter().any(|s| s.has(channel))
}

/// Penetration increment of each sample; undefined for the first sample
fn increments(samples: &[Sample]) -> Vec<Option<f64>> {
    let lengths: Vec<Option<f64>> = samples
        .iter()
        .map(|s| s.get(Channel::PenetrationLength))
        .collect();

    std::iter::once(None)
        .chain(lengths.windows(2).map(|pair| match (pair[0], pair[1]) {
            (Some(previous), Some(current)) => Some((current - previous).abs()),
            _ => None,
        }))
        .take(samples.len())
        .collect()
}

/// Resultant inclination (degrees) from two perpendicular inclinations
pub fn resultant_inclination(increment: f64, angle_a: f64, angle_b: f64) -> f64 {
    if increment == 0.0 {
        return 0.0;
    }
    let x = increment * angle_a.to_radians().tan();
    let y = increment * angle_b.to_radians().tan();
    let length = (x * x + y * y + increment * increment).sqrt();
    (increment / length).acos().to_degrees()
}

fn derive_resultant(samples: &mut [Sample], channel_a: Channel, channel_b: Channel) {
    let increments = increments(samples);
    for (sample, increment) in samples.iter_mut().zip(increments) {
        let (Some(increment), Some(a), Some(b)) =
            (increment, sample.get(channel_a), sample.get(channel_b))
        else {
            continue;
        };
        sample.set(
            Channel::InclinationResultant,
            resultant_inclination(increment, a, b),
        );
    }
}

/// Whether a resultant inclination can point the cone downwards
pub fn is_usable_inclination(angle: f64) -> bool {
    angle.is_finite() && angle.abs() < 90.0
}

/// Running sum of `increment * cos(resultant)`
///
/// A sample with an undefined increment or an unusable angle gets no depth;
/// the sum carries on past it.
fn integrate_inclined_increments(samples: &mut [Sample]) {
    let increments = increments(samples);
    let mut depth = 0.0;
    let mut unusable = 0;

    for (sample, increment) in samples.iter_mut().zip(increments) {
        let Some(angle) = sample.get(Channel::InclinationResultant) else {
            continue;
        };
        if !is_usable_inclination(angle) {
            unusable += 1;
            continue;
        }
        if let Some(increment) = increment {
            depth += increment * angle.to_radians().cos();
            sample.set(Channel::Depth, depth);
        }
    }

    if unusable > 0 {
        debug!("{} samples with inclination of 90 degrees or more left without depth", unusable);
    }
}
