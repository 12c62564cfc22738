//! Batch processing engine
//!
//! Runs every input file through the complete pipeline: format detection,
//! parsing, normalization, classification (CPT) or component check
//! (borehole), and optional GEF re-export. Files are independent and run
//! concurrently on the blocking pool; a failed file is reported with its
//! reason and the batch continues.

use crate::app::models::{
    Borehole, Lithology, ParseStats, RawSounding, SoilLayer, Survey, SurveyKind,
};
use crate::app::services::gef_parser::parser::read_source;
use crate::app::services::gef_parser::{GefParser, detect_report_kind};
use crate::app::services::gef_writer::GefWriter;
use crate::app::services::layer_model::borehole_from_cpt;
use crate::app::services::record_processor::{NormalizationStats, RecordProcessor};
use crate::app::services::soil_classifier::SoilClassifier;
use crate::app::services::xml_parser::borehole::parse_borehole_document;
use crate::app::services::xml_parser::cpt::parse_cpt_document;
use crate::app::services::xml_parser::detect_document_kind;
use crate::app::services::xml_parser::parser::load_document;
use crate::config::Config;
use crate::constants::{GEF_EXTENSION, XML_EXTENSION};
use crate::{Error, Result};

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::{debug, error, info, warn};

// =============================================================================
// Format Detection and Loading
// =============================================================================

/// Source format, decided by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Gef,
    Xml,
}

impl SourceFormat {
    /// Detect the format from the extension, ignoring case
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some(GEF_EXTENSION) => Ok(SourceFormat::Gef),
            Some(XML_EXTENSION) => Ok(SourceFormat::Xml),
            _ => Err(Error::unsupported_format(
                path.display().to_string(),
                "expected a .gef or .xml extension",
            )),
        }
    }
}

/// A survey as read from a file, before normalization
#[derive(Debug, Clone)]
pub enum LoadedSurvey {
    Cpt(RawSounding),
    Borehole(Borehole, ParseStats),
}

impl LoadedSurvey {
    pub fn kind(&self) -> SurveyKind {
        match self {
            LoadedSurvey::Cpt(_) => SurveyKind::Cpt,
            LoadedSurvey::Borehole(..) => SurveyKind::Borehole,
        }
    }
}

/// Read and parse one file, detecting format and survey kind
pub fn load_survey(path: &Path) -> Result<LoadedSurvey> {
    let format = SourceFormat::from_path(path)?;
    let content = read_source(path)?;
    let source = path.display().to_string();

    let loaded = match format {
        SourceFormat::Gef => {
            let parser = GefParser::new();
            match detect_report_kind(&content) {
                SurveyKind::Cpt => LoadedSurvey::Cpt(parser.parse_cpt_str(&content, &source)?),
                SurveyKind::Borehole => {
                    let (borehole, stats) = parser.parse_borehole_str(&content, &source)?;
                    LoadedSurvey::Borehole(borehole, stats)
                }
            }
        }
        SourceFormat::Xml => {
            let doc = load_document(&content, &source)?;
            match detect_document_kind(&doc) {
                SurveyKind::Cpt => LoadedSurvey::Cpt(parse_cpt_document(&doc, &source)?),
                SurveyKind::Borehole => {
                    let (borehole, stats) = parse_borehole_document(&doc, &source)?;
                    LoadedSurvey::Borehole(borehole, stats)
                }
            }
        }
    };

    debug!("{}: {:?} {} record", source, format, loaded.kind());
    Ok(loaded)
}

// =============================================================================
// Single File Pipeline
// =============================================================================

/// Result of processing one file
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub path: PathBuf,

    /// The canonical record
    pub survey: Survey,

    /// Layered log interpreted from a sounding with the configured model
    pub interpreted: Option<Borehole>,

    pub parse_stats: ParseStats,

    /// Normalization statistics, CPT only
    pub normalization: Option<NormalizationStats>,

    /// GEF file written for this record, if exported
    pub output: Option<PathBuf>,
}

impl ProcessedFile {
    /// Samples of a sounding or layers of a borehole log
    pub fn record_count(&self) -> usize {
        match &self.survey {
            Survey::Cpt(sounding) => sounding.len(),
            Survey::Borehole(borehole) => borehole.layer_count(),
        }
    }
}

/// Lithology covering the largest thickness, by each layer's dominant component
fn prevailing_lithology(layers: &[SoilLayer]) -> Option<Lithology> {
    let mut totals: BTreeMap<Lithology, f64> = BTreeMap::new();
    for layer in layers {
        if let Some(lithology) = layer.dominant_lithology() {
            *totals.entry(lithology).or_default() += layer.thickness().abs();
        }
    }
    totals
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(lithology, _)| lithology)
}

fn log_layers(path: &Path, borehole: &Borehole) {
    for (location, layers) in &borehole.layers {
        let prevailing = prevailing_lithology(layers)
            .map(|lithology| lithology.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        debug!(
            "{}: {} description with {} layers, mostly {}",
            path.display(),
            location.code(),
            layers.len(),
            prevailing
        );
    }
}

fn log_parse_issues(path: &Path, stats: &ParseStats) {
    if stats.has_unknown_columns() {
        warn!("{}: columns with unknown quantities ignored", path.display());
    }
    let warnings = stats.warning_count();
    if warnings > 0 {
        debug!("{}: {} parse warnings", path.display(), warnings);
    }
}

/// Run one file through the synchronous part of the pipeline
pub fn process_file(path: &Path, config: &Config) -> Result<ProcessedFile> {
    match load_survey(path)? {
        LoadedSurvey::Cpt(raw) => {
            log_parse_issues(path, &raw.stats);
            let result = RecordProcessor::new(config.normalization.clone()).normalize(raw)?;
            let mut sounding = result.sounding;
            let classified = SoilClassifier::new().classify_sounding(&mut sounding);
            if !sounding.is_classified() {
                warn!(
                    "{}: {} of {} samples left unclassified",
                    path.display(),
                    sounding.len() - classified,
                    sounding.len()
                );
            }
            let interpreted = borehole_from_cpt(&sounding, config.interpretation_model);
            log_layers(path, &interpreted);

            Ok(ProcessedFile {
                path: path.to_path_buf(),
                survey: Survey::Cpt(sounding),
                interpreted: Some(interpreted),
                parse_stats: result.parse_stats,
                normalization: Some(result.stats),
                output: None,
            })
        }
        LoadedSurvey::Borehole(borehole, parse_stats) => {
            log_parse_issues(path, &parse_stats);
            log_layers(path, &borehole);
            let incomplete = borehole
                .layers
                .values()
                .flatten()
                .filter(|layer| !layer.components_are_complete())
                .count();
            if incomplete > 0 {
                warn!(
                    "{}: {} layers with component fractions not summing to one",
                    path.display(),
                    incomplete
                );
            }
            info!(
                "{}: {} layers in {} descriptions",
                path.display(),
                borehole.layer_count(),
                borehole.layers.len()
            );

            Ok(ProcessedFile {
                path: path.to_path_buf(),
                survey: Survey::Borehole(borehole),
                interpreted: None,
                parse_stats,
                normalization: None,
                output: None,
            })
        }
    }
}

/// Output file for an input: `{stem}.gef` inside the output directory
pub fn export_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "survey".to_string());
    output_dir.join(format!("{}.{}", stem, GEF_EXTENSION))
}

/// Key under which two paths name the same file
///
/// The directory is canonicalized when it exists; the file name is compared
/// without case so `B-17.GEF` and `B-17.gef` collide on any filesystem.
fn file_key(path: &Path) -> PathBuf {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let dir = std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    dir.join(name)
}

/// Assign an export target to every input
///
/// Inputs are claimed in path order. An input whose target is a source file
/// of the batch, or a target already claimed by an earlier input, gets an
/// [`Error::ExportConflict`] instead of a path.
pub fn plan_exports(output_dir: &Path, inputs: &[PathBuf]) -> Vec<Result<PathBuf>> {
    let sources: HashSet<PathBuf> = inputs.iter().map(|input| file_key(input)).collect();
    let targets: Vec<(PathBuf, PathBuf)> = inputs
        .iter()
        .map(|input| {
            let target = export_path(output_dir, input);
            let key = file_key(&target);
            (target, key)
        })
        .collect();

    let mut order: Vec<usize> = (0..inputs.len()).collect();
    order.sort_by(|&a, &b| inputs[a].cmp(&inputs[b]));
    let mut owners: HashMap<&PathBuf, usize> = HashMap::new();
    for index in order {
        owners.entry(&targets[index].1).or_insert(index);
    }

    inputs
        .iter()
        .zip(&targets)
        .enumerate()
        .map(|(index, (input, (target, key)))| {
            let owner = owners.get(key).copied().unwrap_or(index);
            if sources.contains(key) {
                Err(Error::export_conflict(
                    input.display().to_string(),
                    format!("{} is a source file", target.display()),
                ))
            } else if owner != index {
                Err(Error::export_conflict(
                    input.display().to_string(),
                    format!("{} is already written for {}", target.display(), inputs[owner].display()),
                ))
            } else {
                Ok(target.clone())
            }
        })
        .collect()
}

// =============================================================================
// Batch Processing
// =============================================================================

/// Outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub files_processed: usize,
    pub files_failed: usize,

    /// Processed files, ordered by path
    pub processed: Vec<ProcessedFile>,

    /// Failed files with the reason, ordered by path
    pub failures: Vec<(PathBuf, String)>,

    /// GEF files written
    pub outputs: Vec<PathBuf>,

    pub processing_time_ms: u128,
}

impl BatchReport {
    pub fn count_of(&self, kind: SurveyKind) -> usize {
        self.processed
            .iter()
            .filter(|file| file.survey.kind() == kind)
            .count()
    }

    /// Samples and layers over all processed files
    pub fn total_records(&self) -> usize {
        self.processed.iter().map(ProcessedFile::record_count).sum()
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.files_processed + self.files_failed;
        if total == 0 {
            return 0.0;
        }
        (self.files_processed as f64 / total as f64) * 100.0
    }
}

/// Concurrent processor for a list of survey files
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: Config,
    writer: GefWriter,
}

impl BatchProcessor {
    /// Create a processor, validating the configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let writer = GefWriter::new(config.export.clone());
        Ok(Self { config, writer })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process all files; individual failures never abort the batch
    pub async fn process(&self, paths: &[PathBuf]) -> BatchReport {
        let start_time = Instant::now();
        let pb = self.progress_bar(paths.len());
        let concurrent_limit = self.config.batch.max_concurrent_files.min(paths.len()).max(1);
        debug!(
            "Processing {} files with concurrency {}",
            paths.len(),
            concurrent_limit
        );

        let targets: Vec<Option<Result<PathBuf>>> = match self.export_dir() {
            Some(output_dir) => plan_exports(output_dir, paths).into_iter().map(Some).collect(),
            None => paths.iter().map(|_| None).collect(),
        };

        let results: Vec<(PathBuf, Result<ProcessedFile>)> = stream::iter(paths.iter().zip(targets))
            .map(|(path, target)| {
                let pb = pb.clone();
                async move {
                    if let Some(file_name) = path.file_name() {
                        pb.set_message(format!("Processing: {}", file_name.to_string_lossy()));
                    }
                    let result = match target.transpose() {
                        Ok(target) => self.process_one(path, target).await,
                        Err(e) => Err(e),
                    };
                    pb.inc(1);
                    (path.clone(), result)
                }
            })
            .buffer_unordered(concurrent_limit)
            .collect()
            .await;

        pb.finish_with_message("All files processed");

        let mut report = BatchReport::default();
        for (path, result) in results {
            match result {
                Ok(processed) => {
                    if let Some(output) = &processed.output {
                        report.outputs.push(output.clone());
                    }
                    report.processed.push(processed);
                }
                Err(e) => {
                    error!("Failed to process {}: {}", path.display(), e);
                    report.failures.push((path, e.to_string()));
                }
            }
        }

        report.processed.sort_by(|a, b| a.path.cmp(&b.path));
        report.failures.sort_by(|a, b| a.0.cmp(&b.0));
        report.outputs.sort();
        report.files_processed = report.processed.len();
        report.files_failed = report.failures.len();
        report.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Batch complete: {} processed, {} failed in {}ms",
            report.files_processed, report.files_failed, report.processing_time_ms
        );
        report
    }

    fn export_dir(&self) -> Option<&Path> {
        if !self.config.batch.export_gef {
            return None;
        }
        self.config.batch.output_dir.as_deref()
    }

    async fn process_one(&self, path: &Path, target: Option<PathBuf>) -> Result<ProcessedFile> {
        let config = self.config.clone();
        let task_path = path.to_path_buf();
        let mut processed = task::spawn_blocking(move || process_file(&task_path, &config))
            .await
            .map_err(|e| {
                Error::processing_interrupted(format!("worker for {} failed: {}", path.display(), e))
            })??;

        if let Some(output) = target {
            match &processed.survey {
                Survey::Cpt(sounding) => self.writer.write_cpt(sounding, &output).await?,
                Survey::Borehole(borehole) => self.writer.write_borehole(borehole, &output).await?,
            }
            processed.output = Some(output);
        }

        Ok(processed)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.batch.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

#[cfg(test)]
mod tests;
