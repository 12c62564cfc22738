//! Column and void maps from GEF column declarations
//!
//! GEF producers name their columns freely; only the quantity number is
//! standardised, so channels are resolved through the quantity table.

use super::field_parsers::ColumnInfo;
use crate::app::models::{
    Channel, ColumnConflict, ColumnMap, FieldResult, ParseIssue, ParseStats, VoidMap,
};
use crate::constants::bore_quantities;

/// Build the CPT column map
///
/// Unknown quantities are reported and dropped. A duplicate column number or
/// a second column with the same quantity keeps the first declaration.
pub fn build_column_map(infos: &[FieldResult<ColumnInfo>], stats: &mut ParseStats) -> ColumnMap {
    let mut columns = ColumnMap::new();

    for info in infos {
        let info = match info {
            Ok(info) => info,
            Err(issue) => {
                stats.record(issue.clone());
                continue;
            }
        };

        let Some(channel) = info.quantity_number().and_then(Channel::from_quantity_number) else {
            stats.record(ParseIssue::unknown_column(info.index + 1, info.quantity.as_str()));
            continue;
        };

        if let Err(conflict) = columns.insert(info.index, channel) {
            let detail = match conflict {
                ColumnConflict::DuplicateIndex { existing, .. } => {
                    format!("column {} already holds {}", info.index + 1, existing)
                }
                ColumnConflict::DuplicateChannel { existing, .. } => {
                    format!("{} already read from column {}", channel, existing + 1)
                }
            };
            stats.record(ParseIssue::malformed("COLUMNINFO", detail));
        }
    }

    columns
}

/// Build the void map; malformed declarations are reported and skipped
pub fn build_void_map(voids: &[FieldResult<(usize, f64)>], stats: &mut ParseStats) -> VoidMap {
    let mut map = VoidMap::new();
    for void in voids {
        match void {
            Ok((index, value)) => map.insert(*index, *value),
            Err(issue) => stats.record(issue.clone()),
        }
    }
    map
}

/// Column layout of a GEF-BORE data block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoreColumns {
    /// Column of the upper layer boundary
    pub upper: usize,

    /// Column of the lower layer boundary
    pub lower: usize,

    /// Soil code column, directly after the last declared column
    pub soil_code: usize,

    /// Free-text remark column
    pub remark: usize,

    /// Material properties column
    pub properties: usize,
}

/// Locate the boundary columns of a borehole log
///
/// Returns `None` when either boundary quantity is not declared.
pub fn bore_columns(infos: &[FieldResult<ColumnInfo>], stats: &mut ParseStats) -> Option<BoreColumns> {
    let declared: Vec<&ColumnInfo> = infos
        .iter()
        .filter_map(|info| match info {
            Ok(info) => Some(info),
            Err(issue) => {
                stats.record(issue.clone());
                None
            }
        })
        .collect();

    let column_of = |quantity: u32| {
        declared
            .iter()
            .find(|info| info.quantity_number() == Some(quantity))
            .map(|info| info.index)
    };

    let upper = column_of(bore_quantities::UPPER_BOUNDARY);
    let lower = column_of(bore_quantities::LOWER_BOUNDARY);
    let last_declared = declared.iter().map(|info| info.index).max()?;

    match (upper, lower) {
        (Some(upper), Some(lower)) => Some(BoreColumns {
            upper,
            lower,
            soil_code: last_declared + 1,
            remark: last_declared + 2,
            properties: last_declared + 3,
        }),
        _ => None,
    }
}
