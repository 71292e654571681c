//! Single-pass scanner over `darshan-dxt-parser` text output.
//!
//! The scanner is a two-state machine. Section headers and blank lines
//! leave an event block, the `Module` column header enters one, and every
//! other line inside a block is a data line. Metadata lines are only
//! recognised outside a block and may appear anywhere in the stream.

use super::metadata::RunMetadata;
use super::record::{build_record, IoEventRecord};
use crate::utils::config::{
    COLUMN_HEADER_MARKER, METADATA_MARKER, METADATA_SEPARATOR, SECTION_FILE_TOKEN, SECTION_MARKER,
};
use crate::utils::error::ParseError;
use log::{debug, warn};
use std::io::BufRead;

/// Scanner position relative to an event block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    OutsideBlock,
    InsideBlock,
}

/// What a single line means in the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// Start of a per-file block; `None` when the header has no file token
    SectionHeader(Option<&'a str>),
    ColumnHeader,
    Data(&'a str),
    Metadata { key: &'a str, value: &'a str },
    Ignored,
}

/// Classify a line given the current scanner state
///
/// **Public** - pure function, independent of scanner bookkeeping
pub fn classify_line(line: &str, state: ScanState) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if line.contains(SECTION_MARKER) {
        return LineKind::SectionHeader(line.split_whitespace().nth(SECTION_FILE_TOKEN));
    }
    if line.contains(COLUMN_HEADER_MARKER) {
        return LineKind::ColumnHeader;
    }
    if state == ScanState::InsideBlock {
        return LineKind::Data(line);
    }
    if let Some(rest) = line.strip_prefix(METADATA_MARKER) {
        if let Some((key, value)) = rest.split_once(METADATA_SEPARATOR) {
            return LineKind::Metadata { key, value };
        }
    }
    LineKind::Ignored
}

/// A dropped line and the reason it was dropped
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// One-based line number in the input
    pub line: usize,
    pub error: ParseError,
}

/// Everything one scan produced
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub metadata: RunMetadata,
    /// Records in input order
    pub records: Vec<IoEventRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Incremental scanner; feed lines in order, then call `finish`
#[derive(Debug)]
pub struct Scanner {
    state: ScanState,
    current_file: Option<String>,
    line_number: usize,
    output: ScanOutput,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::OutsideBlock,
            current_file: None,
            line_number: 0,
            output: ScanOutput::default(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Process the next line of input
    pub fn feed(&mut self, line: &str) {
        self.line_number += 1;

        match classify_line(line, self.state) {
            LineKind::Blank => self.state = ScanState::OutsideBlock,
            LineKind::SectionHeader(file) => {
                self.state = ScanState::OutsideBlock;
                match file {
                    Some(path) => {
                        self.output.metadata.observe_file(path);
                        self.current_file = Some(path.to_string());
                    }
                    None => {
                        self.current_file = None;
                        self.reject(ParseError::MissingFileIdentifier);
                    }
                }
            }
            LineKind::ColumnHeader => self.state = ScanState::InsideBlock,
            LineKind::Data(data) => {
                let result = match &self.current_file {
                    Some(file) => build_record(data, file),
                    None => Err(ParseError::NoActiveFile),
                };
                match result {
                    Ok(record) => self.output.records.push(record),
                    Err(e) => self.reject(e),
                }
            }
            LineKind::Metadata { key, value } => self.output.metadata.insert(key, value),
            LineKind::Ignored => {}
        }
    }

    fn reject(&mut self, error: ParseError) {
        debug!("Skipping line {}: {}", self.line_number, error);
        self.output.diagnostics.push(Diagnostic {
            line: self.line_number,
            error,
        });
    }

    /// Stop scanning and hand over the collected output
    pub fn finish(self) -> ScanOutput {
        let output = self.output;
        debug!(
            "Scanned {} lines: {} records, {} metadata keys",
            self.line_number,
            output.records.len(),
            output.metadata.len()
        );
        if !output.diagnostics.is_empty() {
            warn!(
                "Skipped {} malformed line(s) while parsing trace",
                output.diagnostics.len()
            );
        }
        output
    }
}

/// Parse a complete trace text
///
/// **Public** - main entry point for in-memory input
pub fn parse_trace(text: &str) -> ScanOutput {
    let mut scanner = Scanner::new();
    for line in text.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}

/// Parse a trace from any buffered reader, line by line
///
/// # Errors
/// Returns the underlying I/O error if reading fails (including invalid UTF-8)
pub fn parse_trace_reader(reader: impl BufRead) -> std::io::Result<ScanOutput> {
    let mut scanner = Scanner::new();
    for line in reader.lines() {
        scanner.feed(&line?);
    }
    Ok(scanner.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_section_header() {
        let line = "# DXT, file_id: 1234, file_name: /scratch/out.h5";
        assert_eq!(
            classify_line(line, ScanState::InsideBlock),
            LineKind::SectionHeader(Some("/scratch/out.h5"))
        );
        assert_eq!(
            classify_line("# DXT, file_id: 1234,", ScanState::OutsideBlock),
            LineKind::SectionHeader(None)
        );
    }

    #[test]
    fn test_classify_depends_on_state() {
        let line = "# nprocs: 4";
        assert_eq!(
            classify_line(line, ScanState::OutsideBlock),
            LineKind::Metadata {
                key: "nprocs",
                value: "4"
            }
        );
        assert_eq!(classify_line(line, ScanState::InsideBlock), LineKind::Data(line));
    }

    #[test]
    fn test_classify_misc() {
        assert_eq!(classify_line("   ", ScanState::InsideBlock), LineKind::Blank);
        assert_eq!(
            classify_line("# Module    Rank  Wt/Rd", ScanState::OutsideBlock),
            LineKind::ColumnHeader
        );
        assert_eq!(
            classify_line("# no separator here", ScanState::OutsideBlock),
            LineKind::Ignored
        );
        assert_eq!(
            classify_line("x_posix 0 write", ScanState::OutsideBlock),
            LineKind::Ignored
        );
    }

    #[test]
    fn test_metadata_value_keeps_separators() {
        assert_eq!(
            classify_line("# exe: ./vpic -f a: b", ScanState::OutsideBlock),
            LineKind::Metadata {
                key: "exe",
                value: "./vpic -f a: b"
            }
        );
    }

    #[test]
    fn test_state_transitions() {
        let mut scanner = Scanner::new();
        scanner.feed("# DXT, file_id: 1, file_name: /a/b.h5");
        assert_eq!(scanner.state(), ScanState::OutsideBlock);
        scanner.feed("# Module    Rank  Wt/Rd  Segment  Offset  Length  Start(s)  End(s)");
        assert_eq!(scanner.state(), ScanState::InsideBlock);
        scanner.feed(" X_POSIX 0 write 0 0 8 0.1 0.2");
        assert_eq!(scanner.state(), ScanState::InsideBlock);
        scanner.feed("");
        assert_eq!(scanner.state(), ScanState::OutsideBlock);

        let output = scanner.finish();
        assert_eq!(output.records.len(), 1);
        assert_eq!(output.records[0].file_identifier, "/a/b.h5");
    }

    #[test]
    fn test_data_without_section() {
        let output = parse_trace("# Module\nX_POSIX 0 write 0 0 8 0.1 0.2\n");
        assert!(output.records.is_empty());
        assert_eq!(
            output.diagnostics,
            vec![Diagnostic {
                line: 2,
                error: ParseError::NoActiveFile
            }]
        );
    }

    #[test]
    fn test_reader_matches_text() {
        let text = "# nprocs: 1\n# DXT, file_id: 1, file_name: /a/b.h5\n# Module\nX_POSIX 0 read 0 0 8 0.1 0.2\n";
        let from_reader = parse_trace_reader(text.as_bytes()).unwrap();
        let from_text = parse_trace(text);
        assert_eq!(from_reader.records, from_text.records);
        assert_eq!(from_reader.metadata, from_text.metadata);
    }
}
