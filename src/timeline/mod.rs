//! Timeline synthesis from parsed I/O records.
//!
//! This module transforms parsed records into:
//! - Layer/track assignments (cache-local vs. backend)
//! - Absolute microsecond timestamps
//! - Paired begin/end trace events in the Chrome Trace Event Format

pub mod clock;
pub mod layer;
pub mod schema;
pub mod summary;
pub mod synthesizer;
pub mod validate;

// Re-export main types and functions
pub use clock::{absolute_micros, RunClock};
pub use layer::{is_cache_file, Layer, LayerClassifier};
pub use schema::{EventArgs, Phase, Timeline, TraceEvent};
pub use summary::{RankSummary, TimelineSummary};
pub use synthesizer::synthesize_timeline;
pub use validate::{validate_timeline, TimelineStats};
