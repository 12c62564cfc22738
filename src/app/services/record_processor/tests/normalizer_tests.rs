//! Tests for individual normalization steps

use super::super::normalizer::*;
use super::super::stats::FrictionRatioSource;
use super::complete_sample;
use crate::Error;
use crate::app::models::{Channel, ColumnMap, RawTable, Sample, VoidMap};
use crate::config::NormalizationConfig;

#[test]
fn test_table_to_samples_drops_voids_and_unmapped_columns() {
    let table = RawTable::new(vec![
        vec![Some(0.1), Some(7.0), Some(2.5)],
        vec![Some(0.2), Some(7.0), Some(999.0)],
        vec![Some(0.3), None, None],
    ]);
    let mut columns = ColumnMap::new();
    columns.insert(0, Channel::Depth).unwrap();
    columns.insert(2, Channel::ConeResistance).unwrap();
    let mut voids = VoidMap::new();
    voids.insert(2, 999.0);

    let samples = table_to_samples(&table, &columns, &voids);

    assert_eq!(samples.len(), 3);
    assert_eq!(samples[0].values.len(), 2);
    assert_eq!(samples[0].cone_resistance(), Some(2.5));
    assert!(!samples[1].has(Channel::ConeResistance));
    assert_eq!(samples[2].depth(), Some(0.3));
    assert_eq!(samples[2].values.len(), 1);
}

#[test]
fn test_measured_friction_ratio_is_kept() {
    let mut samples = vec![
        Sample::from_values([(Channel::FrictionRatio, 2.0), (Channel::LocalFriction, 1.0)]),
        Sample::from_values([(Channel::LocalFriction, 1.0), (Channel::ConeResistance, 1.0)]),
    ];
    assert_eq!(ensure_friction_ratio(&mut samples), FrictionRatioSource::Measured);
    assert!(!samples[1].has(Channel::FrictionRatio));
}

#[test]
fn test_friction_ratio_derived_from_local_friction() {
    let mut samples = vec![
        Sample::from_values([(Channel::ConeResistance, 2.0), (Channel::LocalFriction, 0.05)]),
        Sample::from_values([(Channel::ConeResistance, 0.0), (Channel::LocalFriction, 0.05)]),
        Sample::from_values([(Channel::LocalFriction, 0.05)]),
    ];
    assert_eq!(ensure_friction_ratio(&mut samples), FrictionRatioSource::Derived);

    let rf = samples[0].friction_ratio().unwrap();
    assert!((rf - 2.5).abs() < 1e-12);
    assert!(!samples[1].has(Channel::FrictionRatio));
    assert!(!samples[2].has(Channel::FrictionRatio));
}

#[test]
fn test_friction_zeroed_without_local_friction() {
    let mut samples = vec![Sample::from_values([(Channel::ConeResistance, 2.0)])];
    assert_eq!(ensure_friction_ratio(&mut samples), FrictionRatioSource::Zeroed);
    assert_eq!(samples[0].get(Channel::LocalFriction), Some(0.0));
    assert_eq!(samples[0].friction_ratio(), Some(0.0));
}

#[test]
fn test_absolute_depth() {
    let mut samples = vec![
        Sample::from_values([(Channel::Depth, -1.5)]),
        Sample::from_values([(Channel::Depth, 2.0)]),
        Sample::new(),
    ];
    absolute_depth(&mut samples);
    assert_eq!(samples[0].depth(), Some(1.5));
    assert_eq!(samples[1].depth(), Some(2.0));
    assert_eq!(samples[2].depth(), None);
}

#[test]
fn test_required_channel_missing_names_the_channel() {
    let samples = vec![Sample::from_values([
        (Channel::Depth, 1.0),
        (Channel::LocalFriction, 0.1),
        (Channel::FrictionRatio, 1.0),
    ])];

    match check_required_channels(&samples, "a.gef") {
        Err(Error::RequiredChannelMissing { file, channel }) => {
            assert_eq!(file, "a.gef");
            assert_eq!(channel, "coneResistance");
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let samples = vec![complete_sample(1.0, 1.0, 0.01, 1.0)];
    assert!(check_required_channels(&samples, "a.gef").is_ok());
}

#[test]
fn test_drop_incomplete() {
    let mut samples = vec![
        complete_sample(0.1, 1.0, 0.01, 1.0),
        Sample::from_values([(Channel::Depth, 0.2), (Channel::ConeResistance, 1.0)]),
        complete_sample(0.3, 1.0, 0.01, 1.0),
    ];
    assert_eq!(drop_incomplete(&mut samples), 1);
    assert_eq!(samples.len(), 2);
}

#[test]
fn test_plausibility_bounds() {
    let config = NormalizationConfig::default();

    assert!(is_plausible(&complete_sample(1.0, 0.0, 0.0, 0.0), &config));
    assert!(is_plausible(&complete_sample(1.0, 5.0, 0.6, 12.0), &config));
    assert!(!is_plausible(&complete_sample(1.0, 5.0, 0.6, 12.5), &config));
    assert!(!is_plausible(&complete_sample(1.0, -0.1, 0.0, 1.0), &config));
    assert!(!is_plausible(&complete_sample(1.0, 1.0, -0.01, 1.0), &config));
    assert!(!is_plausible(&complete_sample(1.0, 1.0, 0.01, -1.0), &config));
    assert!(!is_plausible(&Sample::from_values([(Channel::ConeResistance, 1.0)]), &config));
}

#[test]
fn test_filter_plausible_with_custom_bounds() {
    let config = NormalizationConfig::default().with_friction_ratio_bounds(0.0, 5.0);
    let mut samples = vec![
        complete_sample(0.1, 1.0, 0.04, 4.0),
        complete_sample(0.2, 1.0, 0.06, 6.0),
    ];
    assert_eq!(filter_plausible(&mut samples, &config), 1);
    assert_eq!(samples[0].depth(), Some(0.1));
}

#[test]
fn test_sort_by_depth_is_stable() {
    let mut samples = vec![
        complete_sample(0.3, 1.0, 0.0, 0.0),
        complete_sample(0.1, 2.0, 0.0, 0.0),
        complete_sample(0.3, 3.0, 0.0, 0.0),
        complete_sample(0.2, 4.0, 0.0, 0.0),
    ];
    sort_by_depth(&mut samples);

    let qc: Vec<f64> = samples.iter().filter_map(|s| s.cone_resistance()).collect();
    assert_eq!(qc, vec![2.0, 4.0, 1.0, 3.0]);
}
