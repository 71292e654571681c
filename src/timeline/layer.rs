//! Storage layer classification of traced files.

use crate::parser::metadata::basename;
use crate::utils::config::{CACHE_FILE_PREFIX, CACHE_FILE_SUFFIX};
use std::fmt;

/// Storage layer an I/O operation hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Per-rank node-local shadow file of the cache
    CacheLocal,
    /// Shared parallel filesystem
    Backend,
}

impl Layer {
    /// Viewer track (thread id) the layer is drawn on
    pub fn track_id(self) -> u32 {
        match self {
            Layer::CacheLocal => 0,
            Layer::Backend => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::CacheLocal => "cache-local",
            Layer::Backend => "backend",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Whether a file name follows the `mmap-<rank>.dat` cache convention
pub fn is_cache_file(file_identifier: &str) -> bool {
    let name = basename(file_identifier);
    name.len() > CACHE_FILE_PREFIX.len() + CACHE_FILE_SUFFIX.len()
        && name.starts_with(CACHE_FILE_PREFIX)
        && name.ends_with(CACHE_FILE_SUFFIX)
}

/// Maps file identifiers to layers
#[derive(Debug, Clone, Default)]
pub struct LayerClassifier {
    primary_file: Option<String>,
}

impl LayerClassifier {
    /// `primary_file` is the basename of the backend file of the run
    pub fn new(primary_file: Option<&str>) -> Self {
        Self {
            primary_file: primary_file.map(str::to_string),
        }
    }

    /// Classify a file; unknown files fall back to the backend layer
    pub fn classify(&self, file_identifier: &str) -> Layer {
        if is_cache_file(file_identifier) {
            Layer::CacheLocal
        } else {
            // primary file and unclassified files share the backend track
            Layer::Backend
        }
    }

    /// Whether a file is the run's primary backend file
    pub fn is_primary(&self, file_identifier: &str) -> bool {
        self.primary_file
            .as_deref()
            .is_some_and(|primary| basename(file_identifier) == primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_file_convention() {
        assert!(is_cache_file("mmap-0.dat"));
        assert!(is_cache_file("/tmp/parts.h5-cache/mmap-12.dat"));
        assert!(!is_cache_file("mmap-.dat"));
        assert!(!is_cache_file("mmap-0.h5"));
        assert!(!is_cache_file("/data/mmap-0.dat.bak"));
    }

    #[test]
    fn test_classify_layers() {
        let classifier = LayerClassifier::new(Some("parts.h5"));
        assert_eq!(classifier.classify("/nvme/parts.h5-cache/mmap-1.dat"), Layer::CacheLocal);
        assert_eq!(classifier.classify("/lustre/parts.h5"), Layer::Backend);
        assert!(classifier.is_primary("/lustre/parts.h5"));
    }

    #[test]
    fn test_unknown_file_defaults_to_backend() {
        let classifier = LayerClassifier::new(None);
        let layer = classifier.classify("/etc/hosts");
        assert_eq!(layer, Layer::Backend);
        assert_eq!(layer.track_id(), 1);
    }
}
