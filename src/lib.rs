//! GEF/XML Processor Library
//!
//! A Rust library for reading Dutch geotechnical survey records, cone
//! penetration tests (CPT) and borehole logs, from the GEF exchange format
//! and from BRO registry XML deliveries.
//!
//! This library provides tools for:
//! - Parsing GEF headers and data blocks with per-field graceful degradation
//! - Extracting CPT samples and borehole layers from BRO XML documents
//! - Normalizing raw channels (void values, derived friction ratio, plausibility bounds)
//! - Reconstructing depth from penetration length and inclination
//! - Classifying soil per sample (qc-only, three-type, NEN, Robertson, custom rules)
//! - Decomposing soil names and compound codes into lithology fractions
//! - Re-exporting canonical records as fixed-format GEF

pub mod config;
pub mod constants;
pub mod processor;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod gef_parser;
        pub mod gef_writer;
        pub mod layer_model;
        pub mod record_processor;
        pub mod soil_classifier;
        pub mod xml_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    Borehole, Channel, Classification, DescriptionLocation, InterpretationModel, Lithology,
    Sample, SoilLayer, Sounding, SurveyMetadata,
};
pub use config::Config;

/// Result type alias for the GEF/XML processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for survey parsing operations that abort a single file
///
/// Recoverable problems (a missing optional field, a malformed header record,
/// an unknown column quantity) are not errors; they are collected as
/// [`app::models::issues::ParseIssue`] values in the parse statistics.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// File is neither a recognised GEF nor a recognised BRO XML delivery
    #[error("Unsupported format for '{file}': {reason}")]
    UnsupportedFormat { file: String, reason: String },

    /// XML document could not be parsed
    #[error("XML parsing error in file '{file}': {message}")]
    XmlParsing {
        file: String,
        message: String,
        #[source]
        source: Option<roxmltree::Error>,
    },

    /// GEF file without an end-of-header marker or XML without a data payload
    #[error("No data block found in file '{file}'")]
    MissingDataBlock { file: String },

    /// A channel needed for classification is absent after normalization
    #[error("Required channel '{channel}' missing in file '{file}'")]
    RequiredChannelMissing { file: String, channel: String },

    /// Every sample was dropped by normalization
    #[error("No valid samples left after normalization in file '{file}'")]
    NoValidSamples { file: String },

    /// Legacy RD coordinates could not be reprojected
    #[error("Coordinate transformation failed in file '{file}': {reason}")]
    CoordinateTransform { file: String, reason: String },

    /// Export target would overwrite a source file or another export
    #[error("Export of '{file}' refused: {reason}")]
    ExportConflict { file: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create an XML parsing error
    pub fn xml_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<roxmltree::Error>,
    ) -> Self {
        Self::XmlParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a missing data block error
    pub fn missing_data_block(file: impl Into<String>) -> Self {
        Self::MissingDataBlock { file: file.into() }
    }

    /// Create a required channel missing error
    pub fn required_channel_missing(file: impl Into<String>, channel: impl Into<String>) -> Self {
        Self::RequiredChannelMissing {
            file: file.into(),
            channel: channel.into(),
        }
    }

    /// Create a no valid samples error
    pub fn no_valid_samples(file: impl Into<String>) -> Self {
        Self::NoValidSamples { file: file.into() }
    }

    /// Create a coordinate transformation error
    pub fn coordinate_transform(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CoordinateTransform {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create an export conflict error
    pub fn export_conflict(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ExportConflict {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
