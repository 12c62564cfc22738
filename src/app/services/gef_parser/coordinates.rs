//! Legacy RD reprojection
//!
//! Older GEF files give coordinates in the original Rijksdriehoeksstelsel
//! (EPSG:28991), recognisable by a negative easting. RD New (EPSG:28992)
//! differs by a fixed false origin.

use super::field_parsers::Position;
use crate::constants::rd;
use tracing::debug;

/// Whether an easting can only be legacy RD
pub fn is_legacy_rd(easting: f64) -> bool {
    easting < 0.0
}

/// Translate a legacy RD point to RD New, checking the validity window
pub fn legacy_rd_to_rd_new(easting: f64, northing: Option<f64>) -> Result<(f64, f64), String> {
    let northing = northing.ok_or_else(|| {
        format!("legacy RD easting {} has no northing", easting)
    })?;

    let x = easting + rd::FALSE_EASTING;
    let y = northing + rd::FALSE_NORTHING;

    if !(rd::MIN_EASTING..=rd::MAX_EASTING).contains(&x)
        || !(rd::MIN_NORTHING..=rd::MAX_NORTHING).contains(&y)
    {
        return Err(format!(
            "({}, {}) reprojects to ({}, {}), outside the RD New area",
            easting, northing, x, y
        ));
    }

    Ok((x, y))
}

/// Bring a declared position into RD New when it is legacy RD
pub fn resolve_position(position: Position) -> Result<Position, String> {
    if !is_legacy_rd(position.easting) {
        return Ok(position);
    }

    let (easting, northing) = legacy_rd_to_rd_new(position.easting, position.northing)?;
    debug!(
        "Reprojected legacy RD ({}, {:?}) to RD New ({}, {})",
        position.easting, position.northing, easting, northing
    );

    Ok(Position {
        srid: rd::RD_NEW_SRID.to_string(),
        easting,
        northing: Some(northing),
    })
}
