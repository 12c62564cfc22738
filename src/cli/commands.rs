//! Command implementations for the GEF/XML processor CLI
//!
//! This module contains the main command execution logic, logging setup and
//! the summary report.

use crate::app::models::{Survey, SurveyKind};
use crate::cli::args::Args;
use crate::processor::{BatchProcessor, BatchReport};
use crate::{Error, Result};
use colored::*;
use indicatif::HumanDuration;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Main command runner
///
/// 1. Set up logging and validate arguments
/// 2. Expand the input paths into files
/// 3. Run the batch with progress reporting
/// 4. Print the summary
pub async fn run(args: Args) -> Result<BatchReport> {
    let start_time = Instant::now();

    setup_logging(&args)?;
    info!("Starting GEF/XML processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = args.to_config();
    debug!("Configuration: {:?}", config);

    let files = args.input_files()?;
    if files.is_empty() {
        return Err(Error::configuration("No .gef or .xml files found in the given paths"));
    }
    info!("Processing {} files", files.len());

    let processor = BatchProcessor::new(config)?;
    let report = processor.process(&files).await;

    if !args.quiet {
        print_summary(&report, start_time.elapsed());
    }

    Ok(report)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gefxml_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Print the colored processing summary
fn print_summary(report: &BatchReport, elapsed: Duration) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(elapsed).to_string().bright_white()
    );
    println!(
        "  {} {} ({} CPT, {} borehole)",
        "Files processed:".bright_cyan(),
        report.files_processed.to_string().bright_white().bold(),
        report.count_of(SurveyKind::Cpt),
        report.count_of(SurveyKind::Borehole)
    );
    println!(
        "  {} {}",
        "Samples and layers:".bright_cyan(),
        report.total_records().to_string().bright_white()
    );

    for file in &report.processed {
        let detail = match &file.survey {
            Survey::Cpt(sounding) => {
                let method = file
                    .normalization
                    .as_ref()
                    .map(|stats| stats.depth_method.to_string())
                    .unwrap_or_default();
                let layers = file
                    .interpreted
                    .as_ref()
                    .map(|log| log.layer_count())
                    .unwrap_or_default();
                format!(
                    "{} samples, depth {}, {} interpreted layers",
                    sounding.len(),
                    method,
                    layers
                )
            }
            Survey::Borehole(borehole) => format!("{} layers", borehole.layer_count()),
        };
        let warnings = file.parse_stats.warning_count();
        let detail = if warnings > 0 {
            format!("{}, {} parse warnings", detail, warnings)
        } else {
            detail
        };
        println!("    {} {}", file.path.display(), detail.dimmed());
    }

    if !report.outputs.is_empty() {
        println!(
            "  {} {}",
            "GEF files written:".bright_cyan(),
            report.outputs.len().to_string().bright_white()
        );
    }

    if report.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            report.files_failed.to_string().bright_red().bold()
        );
        for (path, reason) in &report.failures {
            println!("    {} {}", path.display().to_string().red(), reason);
        }
    }
    println!();
}
