//! Core GEF parser implementation
//!
//! This module provides the parse orchestration: file reading, splitting the
//! header from the data block, metadata extraction and coordination of the
//! CPT and borehole paths.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use super::borehole::{logged_depth, parse_layers};
use super::column_mapping::{bore_columns, build_column_map, build_void_map};
use super::coordinates::resolve_position;
use super::field_parsers::{
    extract_column_infos, extract_column_voids, extract_company_id, extract_date,
    extract_groundlevel, extract_position, extract_project_id, extract_project_name,
    extract_report_code, extract_testid,
};
use super::header::GefHeader;
use super::record_parser::{Separators, parse_numeric_records};
use crate::app::models::{
    Borehole, DescriptionLocation, ParseStats, RawSounding, SurveyKind, SurveyMetadata,
};
use crate::constants::GEF_BORE_REPORT_MARKER;
use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static END_OF_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*#EOH[ \t]*=.*$").expect("end-of-header pattern is valid")
});

/// GEF parser for CPT and borehole reports
///
/// Stateless; every call parses one file from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct GefParser;

impl GefParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a GEF-CPT file into a raw sounding
    pub fn parse_cpt_file(&self, file_path: &Path) -> Result<RawSounding> {
        info!("Parsing GEF CPT file: {}", file_path.display());
        let content = read_source(file_path)?;
        self.parse_cpt_str(&content, &file_path.display().to_string())
    }

    /// Parse GEF-CPT text into a raw sounding
    pub fn parse_cpt_str(&self, content: &str, source: &str) -> Result<RawSounding> {
        let (header_text, data) = split_sections(content, source)?;
        let header = GefHeader::parse(header_text);
        if header.is_empty() {
            warn!("{}: no header records before #EOH", source);
        }
        let mut stats = ParseStats::new(source);

        let metadata = extract_metadata(&header, "STARTDATE", source, &mut stats)?;

        let infos = extract_column_infos(&header);
        let columns = build_column_map(&infos, &mut stats);
        let voids = build_void_map(&extract_column_voids(&header), &mut stats);
        debug!(
            "{}: {} header records, {} mapped columns, {} void declarations",
            source,
            header.len(),
            columns.len(),
            voids.len()
        );

        let separators = Separators::from_header(&header, &mut stats);
        let records = separators.records(data);
        let table = parse_numeric_records(&records, &mut stats);

        info!(
            "Parsed {} of {} data records from {}",
            stats.rows_parsed, stats.total_rows, source
        );

        Ok(RawSounding {
            metadata,
            table,
            columns,
            voids,
            removed_layers: Vec::new(),
            stats,
        })
    }

    /// Parse a GEF-BORE file into a borehole log
    pub fn parse_borehole_file(&self, file_path: &Path) -> Result<(Borehole, ParseStats)> {
        info!("Parsing GEF borehole file: {}", file_path.display());
        let content = read_source(file_path)?;
        self.parse_borehole_str(&content, &file_path.display().to_string())
    }

    /// Parse GEF-BORE text into a borehole log with field layers
    pub fn parse_borehole_str(&self, content: &str, source: &str) -> Result<(Borehole, ParseStats)> {
        let (header_text, data) = split_sections(content, source)?;
        let header = GefHeader::parse(header_text);
        if header.is_empty() {
            warn!("{}: no header records before #EOH", source);
        }
        let mut stats = ParseStats::new(source);

        let mut metadata = extract_metadata(&header, "FILEDATE", source, &mut stats)?;

        let infos = extract_column_infos(&header);
        let columns = bore_columns(&infos, &mut stats).ok_or_else(|| {
            Error::required_channel_missing(source, "upper/lower layer boundary")
        })?;
        let voids = build_void_map(&extract_column_voids(&header), &mut stats);

        let separators = Separators::from_header(&header, &mut stats);
        let records = separators.records(data);
        let layers = parse_layers(
            &records,
            columns,
            &voids,
            metadata.reference_level(),
            &mut stats,
        );

        metadata.final_depth = logged_depth(&layers);
        info!("Parsed {} layers from {}", layers.len(), source);

        let mut grouped = BTreeMap::new();
        grouped.insert(DescriptionLocation::Field, layers);

        Ok((
            Borehole {
                metadata,
                description_quality: None,
                layers: grouped,
                analyses: Vec::new(),
            },
            stats,
        ))
    }
}

/// Split file content at the `#EOH=` record into header and data block
pub fn split_sections<'a>(content: &'a str, source: &str) -> Result<(&'a str, &'a str)> {
    let eoh = END_OF_HEADER
        .find(content)
        .ok_or_else(|| Error::missing_data_block(source))?;

    let header = &content[..eoh.start()];
    let data = content[eoh.end()..].trim_start_matches(['\r', '\n']);
    Ok((header, data))
}

/// Report kind from `#REPORTCODE`/`#PROCEDURECODE`; anything not BORE is a CPT
pub fn detect_report_kind(content: &str) -> SurveyKind {
    let header_text = END_OF_HEADER
        .find(content)
        .map_or(content, |eoh| &content[..eoh.start()]);
    let header = GefHeader::parse(header_text);

    let is_bore = ["REPORTCODE", "PROCEDURECODE"].iter().any(|key| {
        header
            .value(key)
            .is_some_and(|code| code.to_uppercase().contains(GEF_BORE_REPORT_MARKER))
    });

    if is_bore {
        SurveyKind::Borehole
    } else {
        SurveyKind::Cpt
    }
}

/// Read a GEF file; non-UTF-8 bytes (older files are often Latin-1) are replaced
pub fn read_source(file_path: &Path) -> Result<String> {
    if !file_path.exists() {
        return Err(Error::file_not_found(file_path.display().to_string()));
    }
    let bytes = std::fs::read(file_path)
        .map_err(|e| Error::io(format!("Failed to read {}", file_path.display()), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Metadata shared by both report kinds
///
/// Only a failed legacy RD reprojection aborts; every other field degrades.
fn extract_metadata(
    header: &GefHeader,
    date_key: &'static str,
    source: &str,
    stats: &mut ParseStats,
) -> Result<SurveyMetadata> {
    let mut metadata = SurveyMetadata {
        source: Some(source.to_string()),
        ..SurveyMetadata::default()
    };

    metadata.testid = stats.take(extract_testid(header));

    if let Some(position) = stats.take(extract_position(header)) {
        let position =
            resolve_position(position).map_err(|reason| Error::coordinate_transform(source, reason))?;
        metadata.srid = Some(position.srid);
        metadata.easting = Some(position.easting);
        metadata.northing = position.northing;
    }

    metadata.groundlevel = stats.take(extract_groundlevel(header));
    metadata.company_id = stats.take(extract_company_id(header));
    metadata.project_id = stats.take(extract_project_id(header));
    metadata.project_name = stats.take(extract_project_name(header));
    metadata.date = stats.take(extract_date(header, date_key));
    metadata.report_code = stats.take(extract_report_code(header));

    Ok(metadata)
}
