//! Tests for GEF export


use crate::app::models::{Channel, Sample, Sounding, SurveyMetadata};
use chrono::NaiveDate;

pub fn sample_metadata() -> SurveyMetadata {
    SurveyMetadata {
        testid: Some("CPT000000012345".to_string()),
        easting: Some(120500.0),
        northing: Some(480250.5),
        groundlevel: Some(-1.23),
        srid: Some("28992".to_string()),
        date: NaiveDate::from_ymd_opt(2020, 6, 30),
        company_id: Some("27376655".to_string()),
        ..SurveyMetadata::default()
    }
}

/// Three complete samples; with `u2` the middle one lacks pore pressure
pub fn sample_sounding(u2: bool) -> Sounding {
    let rows = [
        (0.02, 0.0199, 1.2, 0.012, 1.0, Some(0.01)),
        (0.04, 0.0398, 2.4567, 0.048, 1.9539, None),
        (0.06, 0.0597, 3.6, 0.108, 3.0, Some(0.03)),
    ];
    let samples = rows
        .iter()
        .map(|&(pl, depth, qc, fs, rf, pore_pressure)| {
            let mut sample = Sample::from_values([
                (Channel::PenetrationLength, pl),
                (Channel::Depth, depth),
                (Channel::ConeResistance, qc),
                (Channel::LocalFriction, fs),
                (Channel::FrictionRatio, rf),
            ]);
            if let (true, Some(value)) = (u2, pore_pressure) {
                sample.set(Channel::PorePressureU2, value);
            }
            sample
        })
        .collect();
    Sounding::new(sample_metadata(), samples)
}
