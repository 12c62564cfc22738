//! Element lookups shared by the CPT and borehole readers

use crate::app::models::{FieldResult, ParseIssue, ParseStats, SurveyMetadata};
use crate::app::services::gef_parser::field_parsers::parse_number;
use crate::constants::BRO_DATE_FORMAT;
use chrono::NaiveDate;
use roxmltree::Node;
use std::collections::BTreeMap;

/// Namespace-stripped tag name of an element
pub fn local_name<'a>(node: &Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// First descendant element (or the node itself) with the given tag name
pub fn find_descendant<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .find(|n| n.is_element() && local_name(n) == name)
}

/// Direct text of an element with whitespace runs collapsed; `None` when blank
pub fn element_text(node: &Node) -> Option<String> {
    let text = node.text()?.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// Text of the first descendant with the given tag name
pub fn descendant_text(node: Node, name: &str) -> Option<String> {
    find_descendant(node, name).and_then(|n| element_text(&n))
}

/// Every text-bearing element below `node`, keyed by tag name
///
/// A later element with the same name overrides an earlier one.
pub fn text_record(node: Node) -> BTreeMap<String, String> {
    node.descendants()
        .filter(|n| n.is_element())
        .filter_map(|n| element_text(&n).map(|text| (local_name(&n).to_string(), text)))
        .collect()
}

/// `gml:pos` as "easting northing"
pub fn parse_pos(text: &str) -> FieldResult<(f64, f64)> {
    let mut parts = text.split_whitespace().map(parse_number);
    match (parts.next(), parts.next()) {
        (Some(Some(x)), Some(Some(y))) => Ok((x, y)),
        _ => Err(ParseIssue::malformed("pos", text)),
    }
}

/// SRID from a `srsName` such as `urn:ogc:def:crs:EPSG::28992`
pub fn srid_from_srs_name(srs_name: &str) -> Option<String> {
    let digits: String = srs_name
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    (!digits.is_empty()).then_some(digits)
}

/// Location and vertical position readers used by both record kinds
pub fn read_location(node: Node, metadata: &mut SurveyMetadata, stats: &mut ParseStats) {
    let Some(pos) = descendant_text(node, "pos") else {
        stats.record(ParseIssue::missing("pos"));
        return;
    };

    if let Some((easting, northing)) = stats.take(parse_pos(&pos)) {
        metadata.easting = Some(easting);
        metadata.northing = Some(northing);
    }

    metadata.srid = node
        .descendants()
        .find_map(|n| n.attribute("srsName"))
        .and_then(srid_from_srs_name);
}

pub fn read_vertical_position(node: Node, metadata: &mut SurveyMetadata, stats: &mut ParseStats) {
    metadata.groundlevel = stats.take(number_field(
        descendant_text(node, "offset").as_deref(),
        "offset",
    ));
}

/// Descendant `date` of a report date element
pub fn read_date(node: Node, field: &'static str) -> FieldResult<NaiveDate> {
    let text = descendant_text(node, "date").ok_or(ParseIssue::missing(field))?;
    NaiveDate::parse_from_str(&text, BRO_DATE_FORMAT).map_err(|_| ParseIssue::malformed(field, text))
}

/// Numeric element text
pub fn number_field(text: Option<&str>, field: &'static str) -> FieldResult<f64> {
    let text = text.ok_or(ParseIssue::missing(field))?;
    parse_number(text).ok_or_else(|| ParseIssue::malformed(field, text))
}
