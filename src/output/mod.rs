//! Output writers for timeline data.
//!
//! This module handles writing data to disk:
//! - Trace Event Format JSON (indented and compact)
//! - Reading an existing timeline back for validation

pub mod json;

// Re-export main functions
pub use json::{read_timeline, timeline_to_string, write_timeline, JsonStyle};
