//! BRO descriptive borehole log extraction

use super::fields::{
    element_text, local_name, number_field, read_date, read_location, read_vertical_position,
    text_record,
};
use crate::app::models::{
    Borehole, DescriptionLocation, FieldResult, ParseIssue, ParseStats, SoilLayer, SurveyMetadata,
};
use crate::app::services::layer_model::soil_name_components;
use crate::constants::NOT_DESCRIBED_SOIL_NAME;
use crate::Result;
use roxmltree::{Document, Node};
use std::collections::BTreeMap;
use tracing::debug;

/// Layer record keys consumed into [`SoilLayer`] fields
const UPPER_BOUNDARY: &str = "upperBoundary";
const LOWER_BOUNDARY: &str = "lowerBoundary";
const SOIL_NAME: &str = "geotechnicalSoilName";
const SPECIAL_MATERIAL: &str = "specialMaterial";

/// Extract a borehole log from a BRO BHR-GT document
pub fn parse_borehole_document(doc: &Document, source: &str) -> Result<(Borehole, ParseStats)> {
    let mut stats = ParseStats::new(source);
    let mut borehole = Borehole {
        metadata: SurveyMetadata {
            source: Some(source.to_string()),
            ..SurveyMetadata::default()
        },
        ..Borehole::default()
    };

    for node in doc.descendants().filter(|n| n.is_element()) {
        match local_name(&node) {
            // the last identifier in document order wins
            "broId" | "requestReference" => {
                if let Some(id) = element_text(&node) {
                    borehole.metadata.testid = Some(id);
                }
            }
            "deliveredLocation" => read_location(node, &mut borehole.metadata, &mut stats),
            "deliveredVerticalPosition" => {
                read_vertical_position(node, &mut borehole.metadata, &mut stats);
            }
            "finalDepthBoring" => {
                borehole.metadata.final_depth =
                    stats.take(number_field(element_text(&node).as_deref(), "finalDepthBoring"));
            }
            "descriptionReportDate" => {
                borehole.metadata.date = stats.take(read_date(node, "descriptionReportDate"));
            }
            "descriptiveBoreholeLog" => read_descriptive_log(node, &mut borehole, &mut stats),
            "boreholeSampleAnalysis" => {
                borehole.analyses.extend(
                    node.descendants()
                        .filter(|n| n.is_element() && local_name(n) == "investigatedInterval")
                        .map(text_record),
                );
            }
            _ => {}
        }
    }

    // the vertical position may follow the log in document order
    let reference_level = borehole.metadata.reference_level();
    for layer in borehole.layers.values_mut().flatten() {
        layer.upper_elevation = reference_level - layer.upper_boundary;
        layer.lower_elevation = reference_level - layer.lower_boundary;
    }

    if borehole.metadata.testid.is_none() {
        stats.record(ParseIssue::missing("broId"));
    }

    debug!(
        "{}: {} layers in {} descriptions, {} analyses",
        source,
        borehole.layer_count(),
        borehole.layers.len(),
        borehole.analyses.len()
    );

    Ok((borehole, stats))
}

/// One `descriptiveBoreholeLog`: a quality, then per location its layers
fn read_descriptive_log(log: Node, borehole: &mut Borehole, stats: &mut ParseStats) {
    let mut location: Option<DescriptionLocation> = None;

    for node in log.descendants().filter(|n| n.is_element()) {
        match local_name(&node) {
            "descriptionQuality" => borehole.description_quality = element_text(&node),
            "descriptionLocation" => {
                let current = DescriptionLocation::from_code(&element_text(&node).unwrap_or_default());
                borehole.layers.entry(current.clone()).or_default();
                location = Some(current);
            }
            "layer" => {
                let current = location.get_or_insert_with(|| {
                    stats.record(ParseIssue::missing("descriptionLocation"));
                    DescriptionLocation::Field
                });
                stats.total_rows += 1;
                match layer_from_record(text_record(node), 0.0) {
                    Ok(layer) => {
                        stats.rows_parsed += 1;
                        borehole.layers.entry(current.clone()).or_default().push(layer);
                    }
                    Err(issue) => {
                        stats.rows_skipped += 1;
                        stats.record(issue);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Build a soil layer from the text record of a `layer` element
///
/// A layer without soil name is decomposed as not described (special
/// material) and named after its special material when one is given.
pub fn layer_from_record(
    mut record: BTreeMap<String, String>,
    reference_level: f64,
) -> FieldResult<SoilLayer> {
    let upper = number_field(record.get(UPPER_BOUNDARY).map(String::as_str), UPPER_BOUNDARY)?;
    let lower = number_field(record.get(LOWER_BOUNDARY).map(String::as_str), LOWER_BOUNDARY)?;
    record.remove(UPPER_BOUNDARY);
    record.remove(LOWER_BOUNDARY);

    let (soil_name, components) = match record.remove(SOIL_NAME) {
        Some(name) => {
            let components = soil_name_components(&name);
            (name, components)
        }
        None => (
            record
                .get(SPECIAL_MATERIAL)
                .cloned()
                .unwrap_or_else(|| NOT_DESCRIBED_SOIL_NAME.to_string()),
            soil_name_components(NOT_DESCRIBED_SOIL_NAME),
        ),
    };

    Ok(SoilLayer {
        upper_boundary: upper,
        lower_boundary: lower,
        upper_elevation: reference_level - upper,
        lower_elevation: reference_level - lower,
        soil_name,
        properties: record,
        components,
    })
}
