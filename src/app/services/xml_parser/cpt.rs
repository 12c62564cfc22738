//! BRO CPT extraction

use super::fields::{
    element_text, find_descendant, local_name, number_field, read_date, read_location,
    read_vertical_position, text_record,
};
use crate::app::models::{
    ColumnMap, ParseIssue, ParseStats, RawSounding, RawTable, SurveyMetadata, VoidMap,
};
use crate::app::services::gef_parser::record_parser::parse_numeric_records;
use crate::constants::{BRO_CPT_CHANNELS, BRO_ROW_SEPARATOR, BRO_VALUE_SEPARATOR, BRO_VOID_VALUE};
use crate::{Error, Result};
use roxmltree::Document;
use tracing::debug;

/// Extract a raw sounding from a BRO CPT document
///
/// The value blob is mandatory; every other element is optional.
pub fn parse_cpt_document(doc: &Document, source: &str) -> Result<RawSounding> {
    let mut stats = ParseStats::new(source);
    let mut metadata = SurveyMetadata {
        source: Some(source.to_string()),
        ..SurveyMetadata::default()
    };
    let mut values = None;
    let mut removed_layers = Vec::new();

    for node in doc.descendants().filter(|n| n.is_element()) {
        match local_name(&node) {
            // the last identifier in document order wins
            "broId" => {
                if let Some(id) = element_text(&node) {
                    metadata.testid = Some(id);
                }
            }
            "deliveredLocation" => read_location(node, &mut metadata, &mut stats),
            "deliveredVerticalPosition" => read_vertical_position(node, &mut metadata, &mut stats),
            "finalDepth" => {
                metadata.final_depth =
                    stats.take(number_field(element_text(&node).as_deref(), "finalDepth"));
            }
            "researchReportDate" => metadata.date = stats.take(read_date(node, "researchReportDate")),
            "deliveryAccountableParty" => {
                metadata.company_id = element_text(&node).or_else(|| {
                    text_record(node).into_values().next()
                });
            }
            // a dissipation test has its own values element outside this one
            "conePenetrationTest" if values.is_none() => {
                values = find_descendant(node, "values").and_then(|v| v.text().map(str::to_string));
            }
            "removedLayer" => removed_layers.push(text_record(node)),
            _ => {}
        }
    }

    // unreadable elements were recorded while reading; this reports absent ones
    for field in ["broId", "researchReportDate", "deliveryAccountableParty"] {
        if find_descendant(doc.root_element(), field).is_none() {
            stats.record(ParseIssue::missing(field));
        }
    }

    let values = values.ok_or_else(|| Error::missing_data_block(source))?;
    let table = decode_values(&values, &mut stats);
    debug!(
        "{}: decoded {} rows, {} removed layers",
        source,
        table.len(),
        removed_layers.len()
    );

    Ok(RawSounding {
        metadata,
        table,
        columns: ColumnMap::positional(&BRO_CPT_CHANNELS),
        voids: VoidMap::uniform(BRO_CPT_CHANNELS.len(), BRO_VOID_VALUE),
        removed_layers,
        stats,
    })
}

/// Decode the `;`-terminated, `,`-separated value blob
pub fn decode_values(blob: &str, stats: &mut ParseStats) -> RawTable {
    let records: Vec<Vec<&str>> = blob
        .split(BRO_ROW_SEPARATOR)
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(|row| row.split(BRO_VALUE_SEPARATOR).map(str::trim).collect())
        .collect();

    parse_numeric_records(&records, stats)
}
