//! Rule set evaluation

use super::rules::{ChartPoint, first_match};
use crate::app::models::{Classification, Sample, Sounding};
use crate::constants::{
    CUSTOM_DEFAULT_LABEL, CUSTOM_RULES, NEN_BOUNDARIES, QC_ONLY_RULES, ROBERTSON_ZONES,
    THREE_TYPE_BOUNDARIES,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Evaluates every rule set for a sample
#[derive(Debug, Clone, Copy, Default)]
pub struct SoilClassifier;

impl SoilClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Cone resistance thresholds; Rf plays no part
    pub fn qc_only(&self, point: ChartPoint) -> Option<&'static str> {
        first_match(QC_ONLY_RULES, &point)
    }

    pub fn three_type(&self, point: ChartPoint) -> Option<&'static str> {
        first_match(THREE_TYPE_BOUNDARIES, &point)
    }

    pub fn nen(&self, point: ChartPoint) -> Option<&'static str> {
        first_match(NEN_BOUNDARIES, &point)
    }

    /// First zone exceeded in declared order, which is not always the nearest
    pub fn robertson(&self, point: ChartPoint) -> Option<&'static str> {
        first_match(ROBERTSON_ZONES, &point)
    }

    pub fn custom(&self, point: ChartPoint) -> &'static str {
        first_match(CUSTOM_RULES, &point).unwrap_or(CUSTOM_DEFAULT_LABEL)
    }

    pub fn classify(&self, point: ChartPoint) -> Classification {
        Classification {
            qc_only: self.qc_only(point),
            three_type: self.three_type(point),
            nen: self.nen(point),
            robertson: self.robertson(point),
            custom: self.custom(point),
        }
    }

    /// Classify a sample holding both cone resistance and friction ratio
    pub fn classify_sample(&self, sample: &Sample) -> Option<Classification> {
        let point = ChartPoint::new(sample.cone_resistance()?, sample.friction_ratio()?);
        Some(self.classify(point))
    }

    /// Attach a classification to every sample of a sounding
    ///
    /// Returns the number of samples classified.
    pub fn classify_sounding(&self, sounding: &mut Sounding) -> usize {
        let mut classified = 0;
        let mut custom_counts: BTreeMap<&'static str, usize> = BTreeMap::new();

        for sample in &mut sounding.samples {
            sample.classification = self.classify_sample(sample);
            if let Some(classification) = &sample.classification {
                classified += 1;
                *custom_counts.entry(classification.custom).or_default() += 1;
            }
        }

        debug!(
            "{}: classified {} of {} samples, custom labels {:?}",
            sounding.metadata.source_name(),
            classified,
            sounding.samples.len(),
            custom_counts
        );
        classified
    }
}
