//! GEF-BORE layer assembly

use super::column_mapping::BoreColumns;
use super::field_parsers::parse_number;
use super::record_parser::unquote;
use crate::app::models::{ParseIssue, ParseStats, SoilLayer, VoidMap};
use crate::app::services::layer_model::decode_compound_code;
use std::collections::BTreeMap;

/// Property key of the free-text remark column
pub const REMARK_KEY: &str = "remark";

/// Property key of the material properties column
pub const MATERIAL_PROPERTIES_KEY: &str = "materialProperties";

/// Turn borehole records into soil layers, top-down as in the file
///
/// Records without readable boundaries are skipped and reported.
pub fn parse_layers(
    records: &[Vec<&str>],
    columns: BoreColumns,
    voids: &VoidMap,
    groundlevel: f64,
    stats: &mut ParseStats,
) -> Vec<SoilLayer> {
    let mut layers = Vec::with_capacity(records.len());

    for record in records {
        stats.total_rows += 1;

        let boundary = |index: usize| {
            record
                .get(index)
                .and_then(|field| parse_number(field))
                .filter(|value| !voids.is_void(index, *value))
        };

        let (Some(upper), Some(lower)) = (boundary(columns.upper), boundary(columns.lower)) else {
            stats.rows_skipped += 1;
            stats.record(ParseIssue::malformed("layer record", record.join(";")));
            continue;
        };

        let text = |index: usize| record.get(index).map(|field| unquote(field)).unwrap_or_default();
        let soil_name = text(columns.soil_code);

        let mut properties = BTreeMap::new();
        for (key, index) in [
            (REMARK_KEY, columns.remark),
            (MATERIAL_PROPERTIES_KEY, columns.properties),
        ] {
            let value = text(index);
            if !value.is_empty() {
                properties.insert(key.to_string(), value);
            }
        }

        stats.rows_parsed += 1;
        layers.push(SoilLayer {
            upper_boundary: upper,
            lower_boundary: lower,
            upper_elevation: groundlevel - upper,
            lower_elevation: groundlevel - lower,
            components: decode_compound_code(&soil_name),
            soil_name,
            properties,
        });
    }

    layers
}

/// Thickness of the logged interval: highest top minus lowest bottom
pub fn logged_depth(layers: &[SoilLayer]) -> Option<f64> {
    let top = layers
        .iter()
        .map(|layer| layer.upper_elevation)
        .reduce(f64::max)?;
    let bottom = layers
        .iter()
        .map(|layer| layer.lower_elevation)
        .reduce(f64::min)?;
    Some(top - bottom)
}
