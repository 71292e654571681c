//! Output JSON schema in the Chrome Trace Event Format.
//!
//! Field names and declaration order are what viewers such as
//! `chrome://tracing` and Perfetto expect; do not reorder or add fields.

use serde::{Deserialize, Serialize};

/// Duration event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "B")]
    Begin,
    #[serde(rename = "E")]
    End,
}

/// Auxiliary fields attached to an event
///
/// Empty for the per-rank application spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
}

/// One begin or end marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Display label (file name or "Application")
    pub name: String,

    /// I/O module tag
    pub cat: String,

    /// Absolute timestamp in microseconds
    pub ts: f64,

    /// Rank
    pub pid: u32,

    /// Layer track
    pub tid: u32,

    pub ph: Phase,

    pub args: EventArgs,
}

/// Top-level document written to disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    // keep in sync with TRACE_EVENTS_KEY
    #[serde(rename = "traceEvents")]
    pub trace_events: Vec<TraceEvent>,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.trace_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace_events.is_empty()
    }

    /// Append a begin/end pair sharing everything but phase and timestamp
    pub(crate) fn push_span(&mut self, begin: TraceEvent, end_ts: f64) {
        let end = TraceEvent {
            ts: end_ts,
            ph: Phase::End,
            ..begin.clone()
        };
        self.trace_events.push(begin);
        self.trace_events.push(end);
    }
}
