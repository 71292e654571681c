//! Conversion of run-relative seconds into absolute microseconds.

use crate::parser::metadata::RunMetadata;
use crate::utils::config::MICROS_PER_SECOND;
use crate::utils::error::MetadataError;

/// Time origin of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunClock {
    start_seconds: f64,
}

impl RunClock {
    pub fn new(start_seconds: f64) -> Self {
        Self { start_seconds }
    }

    /// Build from the `start_time` metadata key
    ///
    /// # Errors
    /// * `MetadataError::MissingMetadata` - no `start_time` in the trace
    /// * `MetadataError::InvalidValue` - `start_time` is not a number
    pub fn from_metadata(metadata: &RunMetadata) -> Result<Self, MetadataError> {
        metadata.start_time().map(Self::new)
    }

    pub fn start_seconds(&self) -> f64 {
        self.start_seconds
    }

    /// Absolute microseconds for an offset in seconds since run start
    pub fn to_micros(&self, relative_seconds: f64) -> f64 {
        relative_seconds * MICROS_PER_SECOND + self.start_seconds * MICROS_PER_SECOND
    }
}

/// Absolute seconds to microseconds
pub fn absolute_micros(seconds: f64) -> f64 {
    seconds * MICROS_PER_SECOND
}
