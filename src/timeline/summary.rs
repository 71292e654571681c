//! Per-rank grouping of records by layer, for the text summary.

use super::layer::{Layer, LayerClassifier};
use crate::parser::record::IoEventRecord;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Operation counts of one rank
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankSummary {
    pub cache_ops: usize,
    pub backend_ops: usize,
}

/// Grouped view of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineSummary {
    pub start_time: f64,
    pub end_time: f64,
    pub ranks: BTreeMap<u32, RankSummary>,
    /// Files that matched neither the cache convention nor the primary file
    pub unclassified_files: BTreeSet<String>,
    pub skipped_lines: usize,
}

impl TimelineSummary {
    pub fn new(
        records: &[IoEventRecord],
        classifier: &LayerClassifier,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        let mut summary = Self {
            start_time,
            end_time,
            ..Self::default()
        };

        for record in records {
            let entry = summary.ranks.entry(record.rank).or_default();
            match classifier.classify(&record.file_identifier) {
                Layer::CacheLocal => entry.cache_ops += 1,
                Layer::Backend => {
                    entry.backend_ops += 1;
                    if !classifier.is_primary(&record.file_identifier) {
                        summary
                            .unclassified_files
                            .insert(record.file_name().to_string());
                    }
                }
            }
        }

        summary
    }

    pub fn with_skipped_lines(mut self, skipped_lines: usize) -> Self {
        self.skipped_lines = skipped_lines;
        self
    }

    pub fn total_ops(&self) -> usize {
        self.ranks
            .values()
            .map(|r| r.cache_ops + r.backend_ops)
            .sum()
    }
}

fn format_epoch(seconds: f64) -> String {
    let secs = seconds.floor();
    let nanos = ((seconds - secs) * 1e9) as u32;
    DateTime::<Utc>::from_timestamp(secs as i64, nanos)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| format!("{seconds}"))
}

impl fmt::Display for TimelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run start:   {}", format_epoch(self.start_time))?;
        writeln!(f, "Run length:  {:.3}s", self.end_time - self.start_time)?;
        writeln!(f, "Operations:  {}", self.total_ops())?;
        writeln!(f, "Skipped:     {} line(s)", self.skipped_lines)?;
        writeln!(f)?;
        writeln!(f, "{:>6}  {:>12}  {:>12}", "rank", Layer::CacheLocal, Layer::Backend)?;
        for (rank, counts) in &self.ranks {
            writeln!(
                f,
                "{:>6}  {:>12}  {:>12}",
                rank, counts.cache_ops, counts.backend_ops
            )?;
        }
        if !self.unclassified_files.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unclassified files drawn on the backend track:")?;
            for name in &self.unclassified_files {
                writeln!(f, "  {name}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rank: u32, file: &str) -> IoEventRecord {
        IoEventRecord {
            module: "X_POSIX".to_string(),
            file_identifier: file.to_string(),
            rank,
            operation: "write".to_string(),
            segment: 0,
            offset: 0,
            length: 8,
            start_offset: 0.0,
            end_offset: 0.1,
        }
    }

    #[test]
    fn test_grouping() {
        let records = vec![
            record(0, "/nvme/a.h5-cache/mmap-0.dat"),
            record(0, "/lustre/a.h5"),
            record(1, "/lustre/a.h5"),
            record(1, "/lustre/extra.log"),
        ];
        let classifier = LayerClassifier::new(Some("a.h5"));
        let summary = TimelineSummary::new(&records, &classifier, 0.0, 1.0);

        assert_eq!(
            summary.ranks[&0],
            RankSummary {
                cache_ops: 1,
                backend_ops: 1
            }
        );
        assert_eq!(summary.ranks[&1].backend_ops, 2);
        assert_eq!(summary.total_ops(), 4);
        assert!(summary.unclassified_files.contains("extra.log"));
    }

    #[test]
    fn test_display_renders_epoch() {
        let summary = TimelineSummary::new(&[], &LayerClassifier::default(), 0.0, 2.5);
        let text = summary.to_string();
        assert!(text.contains("1970-01-01T00:00:00+00:00"));
        assert!(text.contains("2.500s"));
    }
}
