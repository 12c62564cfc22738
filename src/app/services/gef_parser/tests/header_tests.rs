//! Tests for GEF header tokenization

use super::super::header::GefHeader;
use super::CPT_HEADER;

#[test]
fn test_header_records() {
    let header = GefHeader::parse(CPT_HEADER);

    assert_eq!(header.len(), 18);
    assert_eq!(header.value("TESTID"), Some("CPT-01"));
    assert_eq!(header.all("COLUMNINFO").count(), 5);
    assert!(header.first("RECORDSEPARATOR").is_none());
    assert!(!header.is_empty());
}

#[test]
fn test_header_record_fields() {
    let header = GefHeader::parse("#XYID= 28992, 155000.00 ,463000.00\n");
    let record = header.first("XYID").unwrap();

    assert_eq!(record.fields(), vec!["28992", "155000.00", "463000.00"]);
    assert_eq!(record.line, 1);
}

#[test]
fn test_header_ignores_noise_and_normalizes_keys() {
    let header = GefHeader::parse(
        "garbage line\r\n#testid = lower case key \r\n\r\n  #ZID=31000,1.0\r\n",
    );

    assert_eq!(header.len(), 2);
    assert_eq!(header.value("TESTID"), Some("lower case key"));
    assert_eq!(header.value("ZID"), Some("31000,1.0"));
}

#[test]
fn test_empty_value_is_kept() {
    let header = GefHeader::parse("#COLUMNSEPARATOR= \n");
    assert_eq!(header.value("COLUMNSEPARATOR"), Some(""));
}

#[test]
fn test_header_without_records() {
    let header = GefHeader::parse("no records here\n\n");
    assert!(header.is_empty());
    assert_eq!(header.len(), 0);
}
