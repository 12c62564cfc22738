//! Test utilities for GEF parser testing
//!
//! This module provides sample GEF content and helper functions used across
//! the parser test modules.

use std::io::Write;
use tempfile::NamedTempFile;

mod header_tests;

/// Header of a small GEF-CPT report with `;` separated columns
pub const CPT_HEADER: &str = "#GEFID= 1, 1, 0
#COLUMN= 5
#COLUMNINFO= 1, m, Sondeertrajectlengte, 1
#COLUMNINFO= 2, MPa, Conusweerstand, 2
#COLUMNINFO= 3, MPa, Plaatselijke wrijving, 3
#COLUMNINFO= 4, %, Wrijvingsgetal, 4
#COLUMNINFO= 5, m, Gecorrigeerde diepte, 11
#COLUMNSEPARATOR= ;
#COLUMNVOID= 2, -9999.000000
#COLUMNVOID= 3, -9999.000000
#COMPANYID= Fugro GeoServices B.V., NL005621409B01, 31
#PROJECTID= 12345
#PROJECTNAME= Dijkversterking Noord
#STARTDATE= 2021, 03, 15
#TESTID= CPT-01
#XYID= 28992, 155000.00, 463000.00, 0.01, 0.01
#ZID= 31000, 1.25, 0.01
#REPORTCODE= GEF-CPT-Report, 1, 1, 0
";

/// Data block matching [`CPT_HEADER`]; the second record has a void cone resistance
pub const CPT_DATA: &str = "0.00;1.200;0.010;0.83;0.00;
0.02;-9999.000000;0.011;0.90;0.02;
0.04;2.500;0.020;0.80;0.04;
";

/// Small GEF-BORE report with quoted soil codes
pub const BORE_GEF: &str = "#GEFID= 1, 1, 0
#COLUMN= 2
#COLUMNINFO= 1, m, Laag van, 1
#COLUMNINFO= 2, m, Laag tot, 2
#COLUMNSEPARATOR= ;
#COLUMNVOID= 1, -99999
#FILEDATE= 2019, 11, 04
#PROCEDURECODE= GEF-BORE-Report, 1, 0, 0, -
#TESTID= B-17
#XYID= 28992, 120000.0, 480000.0
#ZID= 31000, 0.50
#EOH=
0.00;0.40;'Zs1h1';'bovengrond';'';
0.40;1.70;'Kz2';'';'stevig';
-99999;2.00;'V';'';'';
1.70;2.50;'NBE';'';'';
";

/// Assemble a complete CPT report from header and data
pub fn cpt_gef(header: &str, data: &str) -> String {
    format!("{}#EOH=\n{}", header, data)
}

/// The standard CPT report
pub fn standard_cpt_gef() -> String {
    cpt_gef(CPT_HEADER, CPT_DATA)
}

/// Standard CPT header with one record replaced
pub fn cpt_header_with(key: &str, replacement: &str) -> String {
    CPT_HEADER
        .lines()
        .map(|line| {
            if line.starts_with(&format!("#{}=", key)) {
                replacement.to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
