//! Turn parsed records into begin/end trace events.

use super::clock::{absolute_micros, RunClock};
use super::layer::LayerClassifier;
use super::schema::{EventArgs, Phase, Timeline, TraceEvent};
use crate::parser::metadata::RunMetadata;
use crate::parser::record::IoEventRecord;
use crate::utils::config::{APPLICATION_SPAN_CATEGORY, APPLICATION_SPAN_NAME, KEY_END_TIME};
use crate::utils::error::MetadataError;
use log::debug;

/// Build the full timeline of a run
///
/// **Public** - main entry point for timeline synthesis
///
/// Emits one begin/end pair per record in input order, then one
/// "Application" pair per rank `0..nprocs` spanning the whole run.
///
/// # Errors
/// * `MetadataError::MissingMetadata` - `start_time`, `end_time` or `nprocs` absent
/// * `MetadataError::InvalidValue` - one of those keys is not a finite number,
///   `end_time` precedes `start_time`, or `nprocs` exceeds `MAX_NPROCS`
///
/// Metadata is checked before any event is built, so a failure never
/// yields a partial timeline.
pub fn synthesize_timeline(
    records: &[IoEventRecord],
    metadata: &RunMetadata,
    classifier: &LayerClassifier,
) -> Result<Timeline, MetadataError> {
    let clock = RunClock::from_metadata(metadata)?;
    let end_time = metadata.end_time()?;
    if end_time < clock.start_seconds() {
        return Err(MetadataError::InvalidValue {
            key: KEY_END_TIME.to_string(),
            value: metadata.get(KEY_END_TIME).unwrap_or_default().to_string(),
        });
    }
    let nprocs = metadata.nprocs()?;

    let mut timeline = Timeline {
        trace_events: Vec::with_capacity(2 * records.len()),
    };

    for record in records {
        let layer = classifier.classify(&record.file_identifier);
        timeline.push_span(
            TraceEvent {
                name: record.file_name().to_string(),
                cat: record.module.clone(),
                ts: clock.to_micros(record.start_offset),
                pid: record.rank,
                tid: layer.track_id(),
                ph: Phase::Begin,
                args: record_args(record),
            },
            clock.to_micros(record.end_offset),
        );
    }

    let run_begin = clock.to_micros(0.0);
    let run_end = absolute_micros(end_time);
    for rank in 0..nprocs {
        timeline.push_span(application_span(rank, run_begin), run_end);
    }

    debug!(
        "Synthesized {} events ({} records, {} ranks)",
        timeline.len(),
        records.len(),
        nprocs
    );

    Ok(timeline)
}

fn record_args(record: &IoEventRecord) -> EventArgs {
    EventArgs {
        operation: Some(record.operation.clone()),
        segment: Some(record.segment),
        offset: Some(record.offset),
        length: Some(record.length),
    }
}

fn application_span(rank: u32, ts: f64) -> TraceEvent {
    TraceEvent {
        name: APPLICATION_SPAN_NAME.to_string(),
        cat: APPLICATION_SPAN_CATEGORY.to_string(),
        ts,
        pid: rank,
        tid: 0,
        ph: Phase::Begin,
        args: EventArgs::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_trace;

    const TRACE: &str = "\
# nprocs: 2
# start_time: 100.0
# end_time: 110.0

# DXT, file_id: 42, file_name: /nvme/parts.h5-cache/mmap-0.dat
# Module    Rank  Wt/Rd  Segment          Offset       Length    Start(s)      End(s)
 X_POSIX       0  write        0               0         1024      0.5000      0.6000

# DXT, file_id: 43, file_name: /lustre/parts.h5
# Module    Rank  Wt/Rd  Segment          Offset       Length    Start(s)      End(s)
 X_MPIIO       1  write        0            2048         1024      0.7000      0.9000
";

    #[test]
    fn test_event_layout() {
        let scan = parse_trace(TRACE);
        let classifier = LayerClassifier::new(scan.metadata.primary_file());
        let timeline = synthesize_timeline(&scan.records, &scan.metadata, &classifier).unwrap();

        assert_eq!(timeline.len(), 2 * 2 + 2 * 2);

        let events = &timeline.trace_events;
        assert_eq!(events[0].name, "mmap-0.dat");
        assert_eq!(events[0].tid, 0);
        assert_eq!(events[0].ts, 100_500_000.0);
        assert_eq!(events[1].ph, Phase::End);

        assert_eq!(events[2].name, "parts.h5");
        assert_eq!(events[2].cat, "X_MPIIO");
        assert_eq!(events[2].pid, 1);
        assert_eq!(events[2].tid, 1);
        assert_eq!(events[2].args.offset, Some(2048));

        for (rank, pair) in events[4..].chunks(2).enumerate() {
            assert_eq!(pair[0].name, "Application");
            assert_eq!(pair[0].cat, "N/A");
            assert_eq!(pair[0].pid, rank as u32);
            assert_eq!(pair[0].ts, 100_000_000.0);
            assert_eq!(pair[1].ts, 110_000_000.0);
            assert_eq!(pair[0].args, EventArgs::default());
        }
    }

    #[test]
    fn test_missing_end_time_is_fatal() {
        let scan = parse_trace("# nprocs: 1\n# start_time: 5\n");
        let err = synthesize_timeline(&scan.records, &scan.metadata, &LayerClassifier::default())
            .unwrap_err();
        assert_eq!(err, MetadataError::MissingMetadata("end_time".to_string()));
    }
}
