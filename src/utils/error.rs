//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// A data or header line that could not be turned into an event record.
///
/// Never fatal: the line is dropped and reported as a diagnostic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("invalid integer for {field}: '{value}'")]
    InvalidInteger { field: &'static str, value: String },

    #[error("invalid number for {field}: '{value}'")]
    InvalidFloat { field: &'static str, value: String },

    #[error("end offset {end} precedes start offset {start}")]
    EndBeforeStart { start: f64, end: f64 },

    #[error("section header carries no file name")]
    MissingFileIdentifier,

    #[error("data line outside of any file section")]
    NoActiveFile,
}

/// Errors raised when required run-level metadata is unusable
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    #[error("missing required run metadata: {0}")]
    MissingMetadata(String),

    #[error("invalid value for run metadata {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Serialized JSON is not UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Inconsistencies found when checking an existing timeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("end event without matching begin: {name} (pid {pid}, tid {tid})")]
    UnmatchedEnd { name: String, pid: u32, tid: u32 },

    #[error("{count} begin event(s) never closed")]
    UnclosedBegin { count: usize },

    #[error("span {name} (pid {pid}) ends at {end} before it begins at {begin}")]
    EndBeforeBegin {
        name: String,
        pid: u32,
        begin: f64,
        end: f64,
    },
}
