//! Test utilities for soil classification


use crate::app::models::{Channel, Sample, Sounding, SurveyMetadata};

/// A sounding of (depth, qc, Rf) samples with local friction derived from Rf
pub fn sounding_from(points: &[(f64, f64, f64)]) -> Sounding {
    let samples = points
        .iter()
        .map(|&(depth, qc, rf)| {
            Sample::from_values([
                (Channel::Depth, depth),
                (Channel::ConeResistance, qc),
                (Channel::LocalFriction, qc * rf / 100.0),
                (Channel::FrictionRatio, rf),
            ])
        })
        .collect();
    Sounding::new(SurveyMetadata::default(), samples)
}
