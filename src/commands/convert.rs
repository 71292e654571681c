//! Convert command implementation.
//!
//! The convert command:
//! 1. Reads the DXT trace text
//! 2. Parses records and run metadata
//! 3. Synthesizes the timeline
//! 4. Writes the output file

use crate::output::{write_timeline, JsonStyle};
use crate::parser::{parse_trace_reader, ScanOutput};
use crate::timeline::{synthesize_timeline, LayerClassifier, TimelineSummary};
use crate::utils::config::{DEFAULT_OUTPUT, STDIN_INPUT};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// DXT text file, or `-` for stdin
    pub input: PathBuf,

    /// Directory searched for a relative input that does not exist as given
    pub trace_dir: Option<PathBuf>,

    /// Output path for the timeline JSON
    pub output: PathBuf,

    /// Backend file name, overriding the one inferred from the trace
    pub primary_file: Option<String>,

    pub style: JsonStyle,

    /// Print per-rank summary to stdout
    pub print_summary: bool,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(STDIN_INPUT),
            trace_dir: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            primary_file: None,
            style: JsonStyle::Pretty,
            print_summary: false,
        }
    }
}

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input cannot be located or read
/// * Required run metadata missing (nothing is written)
/// * Output cannot be written
pub fn execute_convert(args: ConvertArgs) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Read and parse trace
    info!("Step 1/3: Parsing trace data...");
    let scan = read_trace(&args)?;

    debug!(
        "Parsed trace: {} records, {} metadata keys, {} skipped lines",
        scan.records.len(),
        scan.metadata.len(),
        scan.diagnostics.len()
    );

    let primary_file = args
        .primary_file
        .as_deref()
        .or(scan.metadata.primary_file());
    match primary_file {
        Some(name) => info!("Primary backend file: {}", name),
        None => warn!("No primary backend file found; non-cache files go to the backend track"),
    }
    let classifier = LayerClassifier::new(primary_file);

    // Step 2: Synthesize timeline
    info!("Step 2/3: Synthesizing timeline...");
    let timeline = synthesize_timeline(&scan.records, &scan.metadata, &classifier)
        .context("Cannot build timeline from trace metadata")?;

    // Step 3: Write output
    info!("Step 3/3: Writing output file...");
    write_timeline(&timeline, &args.output, args.style)
        .context("Failed to write timeline JSON")?;

    info!("✓ Timeline written to: {}", args.output.display());

    if args.print_summary {
        // metadata was already validated by synthesize_timeline
        let summary = TimelineSummary::new(
            &scan.records,
            &classifier,
            scan.metadata.start_time()?,
            scan.metadata.end_time()?,
        )
        .with_skipped_lines(scan.diagnostics.len());

        println!("\n{}", "=".repeat(60));
        println!("TIMELINE SUMMARY");
        println!("{}", "=".repeat(60));
        println!("Events:      {}", timeline.len());
        print!("{}", summary);
        println!("{}", "=".repeat(60));
    }

    let elapsed = start_time.elapsed();
    info!("Convert completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Parse the trace named by the arguments
///
/// **Private** - internal helper for execute_convert
fn read_trace(args: &ConvertArgs) -> Result<ScanOutput> {
    if args.input.as_os_str() == STDIN_INPUT {
        debug!("Reading trace from stdin");
        let stdin = std::io::stdin();
        return parse_trace_reader(stdin.lock()).context("Failed to read trace from stdin");
    }

    let path = resolve_input(&args.input, args.trace_dir.as_deref())?;
    info!("Reading trace: {}", path.display());
    let file = File::open(&path)
        .with_context(|| format!("Failed to open trace {}", path.display()))?;
    parse_trace_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read trace {}", path.display()))
}

/// Locate the input file
///
/// **Public** - an existing path is used as is; otherwise a relative path
/// is looked up in `trace_dir`.
pub fn resolve_input(input: &Path, trace_dir: Option<&Path>) -> Result<PathBuf> {
    if input.exists() {
        return Ok(input.to_path_buf());
    }
    if let Some(dir) = trace_dir {
        if input.is_relative() {
            let candidate = dir.join(input);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
        anyhow::bail!(
            "Trace not found: {} (also searched {})",
            input.display(),
            dir.display()
        );
    }
    anyhow::bail!("Trace not found: {}", input.display())
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.input == args.output {
        anyhow::bail!("Output path must differ from the input path");
    }

    if let Some(name) = &args.primary_file {
        if name.is_empty() || name.contains('/') {
            anyhow::bail!("Primary file must be a bare file name");
        }
    }

    Ok(())
}
