//! Test utilities for component decomposition and layer synthesis


use crate::app::models::{Channel, Sample, Sounding, SurveyMetadata};
use crate::app::services::soil_classifier::SoilClassifier;

/// A classified sounding of (depth, qc, Rf) samples below the given groundlevel
pub fn classified_sounding(groundlevel: f64, points: &[(f64, f64, f64)]) -> Sounding {
    let mut sounding = unclassified_sounding(groundlevel, points);
    SoilClassifier::new().classify_sounding(&mut sounding);
    sounding
}

pub fn unclassified_sounding(groundlevel: f64, points: &[(f64, f64, f64)]) -> Sounding {
    let metadata = SurveyMetadata {
        testid: Some("CPT-S1".to_string()),
        groundlevel: Some(groundlevel),
        ..SurveyMetadata::default()
    };
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
    Sounding::new(metadata, samples)
}
