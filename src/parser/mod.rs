//! DXT trace text parsing.
//!
//! This module handles:
//! - Classifying raw lines (metadata, section header, column header, data)
//! - Building I/O event records from data lines
//! - Collecting run metadata

pub mod metadata;
pub mod record;
pub mod scanner;

// Re-export main types
pub use metadata::{basename, RunMetadata};
pub use record::{build_record, IoEventRecord};
pub use scanner::{
    classify_line, parse_trace, parse_trace_reader, Diagnostic, LineKind, ScanOutput, ScanState,
    Scanner,
};
