//! Consistency checks for an existing timeline.

use super::schema::{Phase, Timeline};
use crate::utils::config::APPLICATION_SPAN_NAME;
use crate::utils::error::ValidationError;
use std::collections::{BTreeSet, HashMap};

/// Counts gathered while validating a timeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineStats {
    pub events: usize,
    /// Closed begin/end pairs, application spans included
    pub spans: usize,
    pub application_spans: usize,
    /// Distinct ranks (pids) seen
    pub ranks: usize,
}

/// Check that every begin is closed by a later end on the same track
///
/// Events are paired in emission order per `(pid, tid, name, cat)`.
pub fn validate_timeline(timeline: &Timeline) -> Result<TimelineStats, ValidationError> {
    let mut open: HashMap<(u32, u32, &str, &str), Vec<f64>> = HashMap::new();
    let mut stats = TimelineStats {
        events: timeline.len(),
        ..TimelineStats::default()
    };
    let mut ranks = BTreeSet::new();

    for event in &timeline.trace_events {
        ranks.insert(event.pid);
        let key = (event.pid, event.tid, event.name.as_str(), event.cat.as_str());
        match event.ph {
            Phase::Begin => open.entry(key).or_default().push(event.ts),
            Phase::End => {
                let begin = open.get_mut(&key).and_then(Vec::pop).ok_or_else(|| {
                    ValidationError::UnmatchedEnd {
                        name: event.name.clone(),
                        pid: event.pid,
                        tid: event.tid,
                    }
                })?;
                if event.ts < begin {
                    return Err(ValidationError::EndBeforeBegin {
                        name: event.name.clone(),
                        pid: event.pid,
                        begin,
                        end: event.ts,
                    });
                }
                stats.spans += 1;
                if event.name == APPLICATION_SPAN_NAME {
                    stats.application_spans += 1;
                }
            }
        }
    }

    let unclosed: usize = open.values().map(Vec::len).sum();
    if unclosed > 0 {
        return Err(ValidationError::UnclosedBegin { count: unclosed });
    }

    stats.ranks = ranks.len();
    Ok(stats)
}
