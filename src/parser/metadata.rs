//! Run-level metadata collected from `# key: value` lines.
//!
//! Values are kept as raw strings and only parsed when a downstream stage
//! asks for them. Required accessors fail with `MetadataError` instead of
//! falling back to a default.

use crate::utils::config::{
    CACHE_DIR_SUFFIX, CACHE_PATH_MARKER, KEY_END_TIME, KEY_NPROCS, KEY_START_TIME, MAX_NPROCS,
    PRIMARY_FILE_SUFFIX,
};
use crate::utils::error::MetadataError;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Metadata of one traced run
///
/// Filled progressively by the scanner, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetadata {
    entries: BTreeMap<String, String>,
    primary_file: Option<String>,
}

impl RunMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a metadata entry (last write wins)
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Update the primary traced file from a section header path
    ///
    /// Cache shadow files (`<dir>/<name>-cache/mmap-<rank>.dat`) name the
    /// primary file through their parent directory; an `.h5` path names it
    /// directly. Anything else leaves the current value untouched.
    pub(crate) fn observe_file(&mut self, path: &str) {
        if path.contains(CACHE_PATH_MARKER) {
            let parent = path.rsplit('/').nth(1).unwrap_or_default();
            let name = parent.split(CACHE_DIR_SUFFIX).next().unwrap_or_default();
            if !name.is_empty() {
                self.primary_file = Some(name.to_string());
            }
        } else if path.ends_with(PRIMARY_FILE_SUFFIX) {
            self.primary_file = Some(basename(path).to_string());
        }
    }

    /// Raw value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Raw value for a key that must be present
    pub fn require(&self, key: &str) -> Result<&str, MetadataError> {
        self.get(key)
            .ok_or_else(|| MetadataError::MissingMetadata(key.to_string()))
    }

    /// Parse a required key into any `FromStr` type
    pub fn require_parsed<T: FromStr>(&self, key: &str) -> Result<T, MetadataError> {
        let raw = self.require(key)?;
        raw.trim().parse().map_err(|_| MetadataError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
    }

    /// Parse a required key as a finite number of seconds
    fn require_seconds(&self, key: &str) -> Result<f64, MetadataError> {
        let seconds: f64 = self.require_parsed(key)?;
        if !seconds.is_finite() {
            return Err(self.invalid(key));
        }
        Ok(seconds)
    }

    fn invalid(&self, key: &str) -> MetadataError {
        MetadataError::InvalidValue {
            key: key.to_string(),
            value: self.get(key).unwrap_or_default().to_string(),
        }
    }

    /// Run start in seconds since the epoch
    pub fn start_time(&self) -> Result<f64, MetadataError> {
        self.require_seconds(KEY_START_TIME)
    }

    /// Run end in seconds since the epoch
    pub fn end_time(&self) -> Result<f64, MetadataError> {
        self.require_seconds(KEY_END_TIME)
    }

    /// Number of ranks in the run, at most `MAX_NPROCS`
    pub fn nprocs(&self) -> Result<u32, MetadataError> {
        let nprocs: u32 = self.require_parsed(KEY_NPROCS)?;
        if nprocs > MAX_NPROCS {
            return Err(self.invalid(KEY_NPROCS));
        }
        Ok(nprocs)
    }

    /// Basename of the backend file the run targeted, if any header named it
    pub fn primary_file(&self) -> Option<&str> {
        self.primary_file.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Last path component of a file identifier
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
