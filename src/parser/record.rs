//! I/O event records built from DXT data lines.

use super::metadata::basename;
use crate::utils::config::DATA_FIELD_COUNT;
use crate::utils::error::ParseError;
use std::str::FromStr;

/// One logged I/O operation
///
/// `module` and `operation` are kept verbatim; the trace tool defines
/// their vocabulary (X_POSIX, X_MPIIO, write, read, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct IoEventRecord {
    pub module: String,
    /// Full path from the enclosing section header
    pub file_identifier: String,
    pub rank: u32,
    pub operation: String,
    pub segment: u64,
    pub offset: u64,
    pub length: u64,
    /// Seconds since run start
    pub start_offset: f64,
    /// Seconds since run start, never before `start_offset`
    pub end_offset: f64,
}

impl IoEventRecord {
    /// File identifier without its directory component
    pub fn file_name(&self) -> &str {
        basename(&self.file_identifier)
    }
}

/// Build a record from one data line
///
/// **Public** - used by the scanner for every line inside an event block
///
/// # Arguments
/// * `line` - Whitespace-delimited data line
/// * `file_identifier` - Path from the most recent section header
///
/// # Errors
/// * `ParseError::TooFewFields` - fewer than 8 columns
/// * `ParseError::InvalidInteger` / `ParseError::InvalidFloat` - bad numeric column
/// * `ParseError::EndBeforeStart` - inverted time interval
pub fn build_record(line: &str, file_identifier: &str) -> Result<IoEventRecord, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < DATA_FIELD_COUNT {
        return Err(ParseError::TooFewFields {
            expected: DATA_FIELD_COUNT,
            found: fields.len(),
        });
    }

    let start_offset = parse_float("start", fields[6])?;
    let end_offset = parse_float("end", fields[7])?;
    if end_offset < start_offset {
        return Err(ParseError::EndBeforeStart {
            start: start_offset,
            end: end_offset,
        });
    }

    Ok(IoEventRecord {
        module: fields[0].to_string(),
        file_identifier: file_identifier.to_string(),
        rank: parse_int("rank", fields[1])?,
        operation: fields[2].to_string(),
        segment: parse_int("segment", fields[3])?,
        offset: parse_int("offset", fields[4])?,
        length: parse_int("length", fields[5])?,
        start_offset,
        end_offset,
    })
}

fn parse_int<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

fn parse_float(field: &'static str, value: &str) -> Result<f64, ParseError> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::InvalidFloat {
            field,
            value: value.to_string(),
        }),
    }
}
