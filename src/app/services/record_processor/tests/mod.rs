//! Tests for the sounding normalization pipeline
//!
//! Raw soundings are built directly from tables so every step can be
//! exercised without going through a parser.

pub mod normalizer_tests;

use crate::app::models::{
    Channel, ColumnMap, ParseStats, RawSounding, RawTable, Sample, SurveyMetadata, VoidMap,
};

/// Raw sounding with positional columns and no void declarations
pub fn create_raw_sounding(channels: &[Channel], rows: Vec<Vec<Option<f64>>>) -> RawSounding {
    RawSounding {
        metadata: SurveyMetadata {
            source: Some("test.gef".to_string()),
            groundlevel: Some(0.5),
            ..SurveyMetadata::default()
        },
        table: RawTable::new(rows),
        columns: ColumnMap::positional(channels),
        voids: VoidMap::new(),
        removed_layers: Vec::new(),
        stats: ParseStats::new("test.gef"),
    }
}

/// Row of present values
pub fn row(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// Samples with penetration length and one optional extra channel per sample
pub fn penetration_samples(lengths: &[f64], extra: &[(Channel, &[Option<f64>])]) -> Vec<Sample> {
    lengths
        .iter()
        .enumerate()
        .map(|(i, length)| {
            let mut sample = Sample::from_values([(Channel::PenetrationLength, *length)]);
            for (channel, values) in extra {
                if let Some(Some(value)) = values.get(i) {
                    sample.set(*channel, *value);
                }
            }
            sample
        })
        .collect()
}

/// Complete sample for filtering tests
pub fn complete_sample(depth: f64, qc: f64, fs: f64, rf: f64) -> Sample {
    Sample::from_values([
        (Channel::Depth, depth),
        (Channel::ConeResistance, qc),
        (Channel::LocalFriction, fs),
        (Channel::FrictionRatio, rf),
    ])
}
