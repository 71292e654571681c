//! JSON timeline writer.
//!
//! The whole document is serialized in memory, written to a temporary file
//! next to the destination and renamed into place, so an interrupted or
//! failed run never leaves a truncated artifact behind.

use crate::timeline::schema::Timeline;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Layout of the written JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonStyle {
    /// Four-space indentation
    #[default]
    Pretty,
    /// Single line, no whitespace
    Compact,
}

/// Serialize a timeline to bytes
fn timeline_to_vec(timeline: &Timeline, style: JsonStyle) -> Result<Vec<u8>, OutputError> {
    let mut buf = Vec::new();
    match style {
        JsonStyle::Pretty => {
            let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
            timeline.serialize(&mut ser)?;
        }
        JsonStyle::Compact => serde_json::to_writer(&mut buf, timeline)?,
    }
    Ok(buf)
}

/// Write a timeline to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `timeline` - Timeline to write
/// * `output_path` - Destination file
/// * `style` - Indented or compact layout
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write or rename
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_timeline(
    timeline: &Timeline,
    output_path: impl AsRef<Path>,
    style: JsonStyle,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing timeline to: {}", output_path.display());

    validate_output_path(output_path)?;

    let bytes = timeline_to_vec(timeline, style)?;

    let parent = match output_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        debug!("Creating parent directories: {}", parent.display());
        std::fs::create_dir_all(parent).map_err(|e| {
            OutputError::InvalidPath(format!(
                "Cannot create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(output_path).map_err(|e| OutputError::WriteFailed(e.error))?;

    info!("Timeline written successfully ({} bytes)", bytes.len());

    Ok(())
}

/// Serialize a timeline to a string (for tests or stdout)
pub fn timeline_to_string(timeline: &Timeline, style: JsonStyle) -> Result<String, OutputError> {
    let bytes = timeline_to_vec(timeline, style)?;
    Ok(String::from_utf8(bytes)?)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Read a timeline from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_timeline(input_path: impl AsRef<Path>) -> Result<Timeline, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading timeline from: {}", input_path.display());

    let file = File::open(input_path)?;
    let timeline: Timeline = serde_json::from_reader(BufReader::new(file))?;

    debug!("Timeline loaded: {} events", timeline.len());

    Ok(timeline)
}
