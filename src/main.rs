use anyhow::Context;
use clap::Parser;
use gefxml_processor::cli::{args::Args, commands};
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let result = tokio::select! {
        result = commands::run(args) => result.context("Processing failed"),
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nReceived CTRL+C, shutting down...");
            Err(gefxml_processor::Error::processing_interrupted(
                "Processing interrupted by user",
            ))
            .context("Processing stopped")
        }
    };

    match result {
        Ok(report) if report.files_processed == 0 && report.files_failed > 0 => {
            eprintln!("Error: none of the {} files could be processed", report.files_failed);
            process::exit(1);
        }
        Ok(_report) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
