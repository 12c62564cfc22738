//! Layer model from a classified sounding
//!
//! Consecutive samples sharing a label collapse into one layer. Samples the
//! chosen rule set leaves unclassified take the label above them; samples
//! above the first labelled one are not part of any layer.

use super::components::soil_name_components;
use crate::app::models::{
    Borehole, DescriptionLocation, InterpretationModel, Sample, SoilLayer, Sounding,
};
use crate::app::services::soil_classifier::SoilClassifier;
use std::collections::BTreeMap;
use tracing::debug;

/// Description quality of a log derived from a sounding
pub const CPT_DESCRIPTION_QUALITY: &str = "cpt";

/// First sample of a run of equal labels
struct Run<'a> {
    label: &'static str,
    top: f64,
    sample: &'a Sample,
}

/// Build a field description from the labels of one interpretation model
///
/// Samples without a stored classification are classified on the fly. The
/// last layer ends at the deepest sample.
pub fn borehole_from_cpt(sounding: &Sounding, model: InterpretationModel) -> Borehole {
    let classifier = SoilClassifier::new();
    let mut runs: Vec<Run> = Vec::new();
    let mut current: Option<&'static str> = None;

    for sample in &sounding.samples {
        let Some(depth) = sample.depth() else {
            continue;
        };
        let label = sample
            .classification
            .or_else(|| classifier.classify_sample(sample))
            .and_then(|classification| classification.label(model));

        let Some(label) = label.or(current) else {
            continue;
        };
        if current != Some(label) {
            runs.push(Run {
                label,
                top: depth,
                sample,
            });
            current = Some(label);
        }
    }

    let groundlevel = sounding.metadata.reference_level();
    // normalization records the deepest retained sample as the final depth
    let final_depth = sounding
        .metadata
        .final_depth
        .or_else(|| sounding.max_depth())
        .unwrap_or(0.0);

    let layers: Vec<SoilLayer> = runs
        .iter()
        .enumerate()
        .map(|(i, run)| {
            let bottom = runs.get(i + 1).map_or(final_depth, |next| next.top);
            SoilLayer {
                upper_boundary: run.top,
                lower_boundary: bottom,
                upper_elevation: groundlevel - run.top,
                lower_elevation: groundlevel - bottom,
                soil_name: run.label.to_string(),
                properties: reference_values(run.sample),
                components: soil_name_components(run.label),
            }
        })
        .collect();

    debug!(
        "{}: {} samples collapsed into {} {} layers",
        sounding.metadata.source_name(),
        sounding.len(),
        layers.len(),
        model
    );

    let mut metadata = sounding.metadata.clone();
    metadata.final_depth = Some(final_depth);

    Borehole {
        metadata,
        description_quality: Some(CPT_DESCRIPTION_QUALITY.to_string()),
        layers: BTreeMap::from([(DescriptionLocation::Field, layers)]),
        analyses: Vec::new(),
    }
}

/// Measured values at the top of a layer, kept for reference
fn reference_values(sample: &Sample) -> BTreeMap<String, String> {
    [
        ("coneResistance", sample.cone_resistance()),
        ("frictionRatio", sample.friction_ratio()),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| (key.to_string(), format!("{:.3}", v))))
    .collect()
}
