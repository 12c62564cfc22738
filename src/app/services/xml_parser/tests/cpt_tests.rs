//! Tests for BRO CPT extraction

use super::super::cpt::decode_values;
use super::super::parser::{XmlParser, detect_document_kind, load_document};
use super::*;
use crate::Error;
use crate::app::models::{Channel, ParseIssue, ParseStats, SurveyKind};
use chrono::NaiveDate;

#[test]
fn test_parse_cpt_metadata() {
    let raw = XmlParser::new()
        .parse_cpt_str(&cpt_xml(&standard_values()), "CPT000000012345.xml")
        .unwrap();
    let metadata = &raw.metadata;

    assert_eq!(metadata.testid.as_deref(), Some("CPT000000012345"));
    assert_eq!(metadata.easting, Some(120500.0));
    assert_eq!(metadata.northing, Some(480250.5));
    assert_eq!(metadata.srid.as_deref(), Some("28992"));
    assert_eq!(metadata.groundlevel, Some(-1.23));
    assert_eq!(metadata.final_depth, Some(1.5));
    assert_eq!(metadata.company_id.as_deref(), Some("27376655"));
    assert_eq!(
        metadata.date,
        Some(NaiveDate::from_ymd_opt(2020, 6, 30).unwrap())
    );
    assert!(raw.stats.issues.is_empty());
}

#[test]
fn test_parse_cpt_values() {
    let raw = XmlParser::new()
        .parse_cpt_str(&cpt_xml(&standard_values()), "cpt.xml")
        .unwrap();

    // the dissipation test values are not part of the sounding
    assert_eq!(raw.table.len(), 3);
    assert!(raw.table.rows.iter().all(|row| row.len() == 25));

    assert_eq!(raw.columns.len(), 25);
    assert_eq!(raw.columns.get(3), Some(Channel::ConeResistance));
    assert_eq!(raw.columns.get(24), Some(Channel::FrictionRatio));
    assert!(raw.voids.is_void(24, -999_999.0));

    assert_eq!(raw.table.rows[1][3], Some(2.4));
    assert_eq!(raw.table.rows[2][24], Some(-999_999.0));
}

#[test]
fn test_removed_layers() {
    let raw = XmlParser::new()
        .parse_cpt_str(&cpt_xml(&standard_values()), "cpt.xml")
        .unwrap();

    assert_eq!(raw.removed_layers.len(), 1);
    let layer = &raw.removed_layers[0];
    assert_eq!(layer.get("description").map(String::as_str), Some("klinkers"));
    assert_eq!(layer.get("lowerBoundary").map(String::as_str), Some("0.500"));
}

#[test]
fn test_missing_values_is_fatal() {
    // an empty values element carries no text
    let xml = cpt_xml("");
    let result = XmlParser::new().parse_cpt_str(&xml, "cpt.xml");
    assert!(matches!(result, Err(Error::MissingDataBlock { .. })));
}

#[test]
fn test_malformed_document_is_fatal() {
    let result = XmlParser::new().parse_cpt_str("<dispatchDocument><CPT_O>", "cpt.xml");
    assert!(matches!(result, Err(Error::XmlParsing { .. })));
}

#[test]
fn test_missing_optional_elements_degrade() {
    let xml = cpt_xml(&standard_values())
        .replace("<brocom:date>2020-06-30</brocom:date>", "")
        .replace(
            "<brocom:deliveryAccountableParty>27376655</brocom:deliveryAccountableParty>",
            "",
        );
    let raw = XmlParser::new().parse_cpt_str(&xml, "cpt.xml").unwrap();

    assert_eq!(raw.metadata.date, None);
    assert_eq!(raw.metadata.company_id, None);
    assert!(
        raw.stats
            .issues
            .contains(&ParseIssue::missing("researchReportDate"))
    );
    assert!(
        raw.stats
            .issues
            .contains(&ParseIssue::missing("deliveryAccountableParty"))
    );
    assert_eq!(raw.table.len(), 3);
}

#[test]
fn test_decode_values() {
    let mut stats = ParseStats::new("blob");
    let table = decode_values("1.0,2.0;\n  3.0, x ;;", &mut stats);

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[1], vec![Some(3.0), None]);
    assert_eq!(stats.unreadable_cells, 1);
}

#[test]
fn test_cpt_document_kind() {
    let xml = cpt_xml(&standard_values());
    let doc = load_document(&xml, "cpt.xml").unwrap();
    assert_eq!(detect_document_kind(&doc), SurveyKind::Cpt);
}

#[test]
fn test_last_bro_id_wins() {
    let xml = cpt_xml(&standard_values()).replace(
        "<removedLayer>",
        "<brocom:broId>CPT000000099999</brocom:broId>\n    <removedLayer>",
    );
    let raw = XmlParser::new().parse_cpt_str(&xml, "twice.xml").unwrap();
    assert_eq!(raw.metadata.testid.as_deref(), Some("CPT000000099999"));
}
