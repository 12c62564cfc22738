//! Tests for the batch processing engine
//!
//! Writes small GEF and BRO XML files into a temporary directory and runs
//! them through the pipeline.


use crate::app::services::gef_parser::tests::{BORE_GEF, standard_cpt_gef};
use crate::app::services::xml_parser::tests::{BOREHOLE_XML, cpt_xml, standard_values};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a file into the directory and return its path
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// One file of each format and kind
pub fn write_survey_files(dir: &TempDir) -> Vec<PathBuf> {
    vec![
        write_file(dir, "CPT-01.gef", &standard_cpt_gef()),
        write_file(dir, "B-17.GEF", BORE_GEF),
        write_file(dir, "cpt.xml", &cpt_xml(&standard_values())),
        write_file(dir, "bhr.XML", BOREHOLE_XML),
    ]
}
