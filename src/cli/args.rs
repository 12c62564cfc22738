//! Command-line argument definitions for the GEF/XML processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::models::InterpretationModel;
use crate::config::Config;
use crate::processor::SourceFormat;
use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the GEF/XML survey processor
///
/// Reads CPT and borehole records from GEF and BRO XML files, normalizes and
/// classifies them, and optionally re-exports them as GEF.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gefxml",
    version,
    about = "Read, normalize and classify GEF and BRO XML geotechnical surveys",
    long_about = "Reads cone penetration tests and borehole logs from GEF files and BRO XML \
                  deliveries. Soundings are normalized (void values, friction ratio, depth \
                  reconstruction, plausibility filtering) and classified per sample; borehole \
                  layers are decomposed into lithology fractions. With --output every record \
                  is written back as a fixed-format GEF file."
)]
pub struct Args {
    /// Survey files or directories holding .gef and .xml files
    #[arg(value_name = "PATHS", required = true)]
    pub paths: Vec<PathBuf>,

    /// Directory for re-exported GEF files
    ///
    /// Each record is written as `{file stem}.gef`. Nothing is written when
    /// not given.
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Rule set used to interpret soundings as layered logs
    ///
    /// One of qc-only, three-type, nen, robertson, custom.
    #[arg(long = "model", value_name = "MODEL", default_value = "custom")]
    pub model: InterpretationModel,

    /// Number of files processed concurrently (default: number of CPUs)
    #[arg(short = 'j', long = "jobs", value_name = "N")]
    pub jobs: Option<usize>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.jobs == Some(0) {
            return Err(Error::configuration("--jobs must be at least 1"));
        }

        if let Some(output_dir) = self.output_dir.as_ref().filter(|dir| dir.is_file()) {
            return Err(Error::configuration(format!(
                "Output path is a file: {}",
                output_dir.display()
            )));
        }

        Ok(())
    }

    /// Determine the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress bars are shown unless quiet
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the processing configuration from the arguments
    pub fn to_config(&self) -> Config {
        let mut config = Config::default().with_interpretation_model(self.model);
        if let Some(jobs) = self.jobs {
            config = config.with_max_concurrent_files(jobs);
        }
        if let Some(output_dir) = &self.output_dir {
            config = config.with_output_dir(output_dir);
        }
        if self.show_progress() {
            config = config.with_progress();
        }
        config
    }

    /// Expand the given paths into the list of files to process
    ///
    /// Directories contribute their `.gef` and `.xml` files (not recursive),
    /// sorted by name. Other paths are passed through unchanged, so a
    /// missing or unsupported file is reported by the batch.
    pub fn input_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for path in &self.paths {
            if !path.is_dir() {
                files.push(path.clone());
                continue;
            }

            let entries = std::fs::read_dir(path)
                .map_err(|e| Error::io(format!("Failed to read directory {}", path.display()), e))?;
            let mut found: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|file| file.is_file() && SourceFormat::from_path(file).is_ok())
                .collect();
            found.sort();
            files.extend(found);
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("gefxml").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["CPT-01.gef"]);

        assert_eq!(args.paths, vec![PathBuf::from("CPT-01.gef")]);
        assert_eq!(args.model, InterpretationModel::Custom);
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.output_dir.is_none());
        assert!(args.show_progress());

        let config = args.to_config();
        assert!(!config.batch.export_gef);
        assert!(config.batch.show_progress);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_paths_are_required() {
        assert!(Args::try_parse_from(["gefxml"]).is_err());
    }

    #[test]
    fn test_options_into_config() {
        let args = parse(&["a.gef", "b.xml", "-o", "out", "--model", "robertson", "-j", "3"]);
        let config = args.to_config();

        assert_eq!(args.paths.len(), 2);
        assert_eq!(config.interpretation_model, InterpretationModel::Robertson);
        assert_eq!(config.batch.max_concurrent_files, 3);
        assert_eq!(config.batch.output_dir, Some(PathBuf::from("out")));
        assert!(config.batch.export_gef);
    }

    #[test]
    fn test_unknown_model_rejected() {
        assert!(Args::try_parse_from(["gefxml", "a.gef", "--model", "unified"]).is_err());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(parse(&["a.gef", "-v"]).get_log_level(), "info");
        assert_eq!(parse(&["a.gef", "-vv"]).get_log_level(), "debug");
        assert_eq!(parse(&["a.gef", "-vvvv"]).get_log_level(), "trace");

        let quiet = parse(&["a.gef", "-q"]);
        assert_eq!(quiet.get_log_level(), "error");
        assert!(!quiet.show_progress());
        assert!(!quiet.to_config().batch.show_progress);
    }

    #[test]
    fn test_validate_rejects_zero_jobs() {
        let args = parse(&["a.gef", "-j", "0"]);
        assert!(matches!(args.validate(), Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_input_files_expands_directories() {
        let dir = TempDir::new().unwrap();
        for name in ["b.xml", "a.GEF", "notes.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.gef")).unwrap();

        let dir_arg = dir.path().to_string_lossy().into_owned();
        let args = parse(&[dir_arg.as_str(), "extra.gef"]);
        let files = args.input_files().unwrap();

        assert_eq!(
            files,
            vec![
                dir.path().join("a.GEF"),
                dir.path().join("b.xml"),
                PathBuf::from("extra.gef"),
            ]
        );
    }
}
