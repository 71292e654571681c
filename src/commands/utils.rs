use anyhow::{Context, Result};
use std::path::Path;
use crate::output::read_timeline;
use crate::timeline::validate_timeline;
use crate::utils::config::{SCHEMA_VERSION, TRACE_EVENTS_KEY};

/// Validate a timeline JSON file
pub fn validate_timeline_file(file_path: &Path) -> Result<()> {
    println!("Validating timeline: {}", file_path.display());

    let timeline = read_timeline(file_path)?;
    let stats = validate_timeline(&timeline)
        .with_context(|| format!("Inconsistent timeline {}", file_path.display()))?;

    println!("✓ Valid timeline JSON");
    println!("  Events: {}", stats.events);
    println!("  Spans: {}", stats.spans);
    println!("  Application spans: {}", stats.application_spans);
    println!("  Ranks: {}", stats.ranks);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("DXT Timeline Output Schema (Chrome Trace Event Format)");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  {}: array       - Ordered begin/end events", TRACE_EVENTS_KEY);
        println!("    name: string           - File name, or 'Application' for run spans");
        println!("    cat: string            - I/O module (X_POSIX, X_MPIIO, ...), 'N/A' for run spans");
        println!("    ts: number             - Absolute timestamp in microseconds");
        println!("    pid: number            - MPI rank");
        println!("    tid: number            - Track: 0 = cache-local, 1 = backend");
        println!("    ph: string             - 'B' (begin) or 'E' (end)");
        println!("    args: object           - operation, segment, offset, length (empty for run spans)");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("DXT Timeline v{}", env!("CARGO_PKG_VERSION"));
    println!("Output Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Converts DXT I/O traces of cached HDF5 runs into trace-event timelines.");
}
