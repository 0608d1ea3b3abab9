use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::EntityKind;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Config directory not found at {0}. Run 'payreport init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid payment record #{id}: {reason}")]
    InvalidRecord { id: u32, reason: String },

    #[error("Invalid period: end date {end} is before start date {start}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("No payments found between {start} and {end}")]
    EmptyResult { start: NaiveDate, end: NaiveDate },

    #[error("{kind} #{id} could not be resolved (payment references a missing record)")]
    EntityResolution { kind: EntityKind, id: u32 },

    #[error("Failed to export report to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF converter '{0}' not found. Install wkhtmltopdf or set [pdf] converter in config.toml")]
    ConverterNotFound(String),

    #[error("Failed to convert report to PDF at {path}: {reason}")]
    PdfConversion { path: PathBuf, reason: String },

    #[error("{0} export needs an output file path")]
    MissingDestination(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
