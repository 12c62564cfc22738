//! BRO XML document loading

use super::borehole::parse_borehole_document;
use super::cpt::parse_cpt_document;
use super::fields::{find_descendant, local_name};
use crate::app::models::{Borehole, ParseStats, RawSounding, SurveyKind};
use crate::app::services::gef_parser::parser::read_source;
use crate::{Error, Result};
use roxmltree::Document;
use std::path::Path;
use tracing::info;

/// BRO XML reader for CPT and borehole deliveries
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

impl XmlParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a BRO CPT file into a raw sounding
    pub fn parse_cpt_file(&self, file_path: &Path) -> Result<RawSounding> {
        info!("Parsing BRO CPT file: {}", file_path.display());
        let content = read_source(file_path)?;
        self.parse_cpt_str(&content, &file_path.display().to_string())
    }

    pub fn parse_cpt_str(&self, content: &str, source: &str) -> Result<RawSounding> {
        let doc = load_document(content, source)?;
        parse_cpt_document(&doc, source)
    }

    /// Parse a BRO borehole file into a borehole log
    pub fn parse_borehole_file(&self, file_path: &Path) -> Result<(Borehole, ParseStats)> {
        info!("Parsing BRO borehole file: {}", file_path.display());
        let content = read_source(file_path)?;
        self.parse_borehole_str(&content, &file_path.display().to_string())
    }

    pub fn parse_borehole_str(&self, content: &str, source: &str) -> Result<(Borehole, ParseStats)> {
        let doc = load_document(content, source)?;
        parse_borehole_document(&doc, source)
    }
}

/// Parse XML text, mapping syntax errors to [`Error::XmlParsing`]
pub fn load_document<'input>(content: &'input str, source: &str) -> Result<Document<'input>> {
    Document::parse(content).map_err(|e| Error::xml_parsing(source, e.to_string(), Some(e)))
}

/// Survey kind from the delivered object element
///
/// The object is the root itself or a direct child of the dispatch document
/// (`BHR_GT_O`, `BHR_O` or `CPT_O`). Without such an element a document
/// holding a descriptive borehole log is a borehole.
pub fn detect_document_kind(doc: &Document) -> SurveyKind {
    let root = doc.root_element();
    let delivered = std::iter::once(root)
        .chain(root.children().filter(|n| n.is_element()))
        .find_map(|node| {
            let name = local_name(&node);
            if name.starts_with("BHR") {
                Some(SurveyKind::Borehole)
            } else if name.starts_with("CPT") {
                Some(SurveyKind::Cpt)
            } else {
                None
            }
        });

    match delivered {
        Some(kind) => kind,
        None if find_descendant(root, "descriptiveBoreholeLog").is_some() => SurveyKind::Borehole,
        None => SurveyKind::Cpt,
    }
}
