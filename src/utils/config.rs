//! Configuration and constants for the CLI.
//!
//! The marker strings mirror the text emitted by `darshan-dxt-parser`
//! and must match it byte for byte.

/// Current output schema version (reported by `schema`/`version`)
pub const SCHEMA_VERSION: &str = "1.0.0";

// Line markers of the DXT text format
pub const SECTION_MARKER: &str = "DXT, file_id";
pub const COLUMN_HEADER_MARKER: &str = "Module";
pub const METADATA_MARKER: &str = "# ";
pub const METADATA_SEPARATOR: &str = ": ";

/// Zero-based index of the file path token in a section header line
/// (`# DXT, file_id: <id>, file_name: <path>`)
pub const SECTION_FILE_TOKEN: usize = 5;

/// Data line columns: Module, Rank, Wt/Rd, Segment, Offset, Length, Start(s), End(s)
pub const DATA_FIELD_COUNT: usize = 8;

// Run metadata keys
pub const KEY_NPROCS: &str = "nprocs";
pub const KEY_START_TIME: &str = "start_time";
pub const KEY_END_TIME: &str = "end_time";

/// Largest rank count accepted from `nprocs`; bounds the per-rank spans
pub const MAX_NPROCS: u32 = 1 << 22;

// Naming convention of the per-rank cache shadow files (`<name>-cache/mmap-<rank>.dat`)
pub const CACHE_FILE_PREFIX: &str = "mmap-";
pub const CACHE_FILE_SUFFIX: &str = ".dat";
pub const CACHE_DIR_SUFFIX: &str = "-cache";
pub const CACHE_PATH_MARKER: &str = "-cache/mmap-";
pub const PRIMARY_FILE_SUFFIX: &str = "h5";

pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

// Trace Event Format output
/// Must match the `rename` on `Timeline::trace_events`
pub const TRACE_EVENTS_KEY: &str = "traceEvents";
pub const APPLICATION_SPAN_NAME: &str = "Application";
pub const APPLICATION_SPAN_CATEGORY: &str = "N/A";

// CLI defaults
pub const DEFAULT_OUTPUT: &str = "timeline.json";
pub const TRACE_DIR_ENV: &str = "DXT_TRACE_DIR";
pub const STDIN_INPUT: &str = "-";
