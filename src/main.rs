//! DXT Timeline CLI
//!
//! Turns DXT I/O traces into per-rank, per-layer trace-event timelines.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use dxt_timeline::commands::{
    display_schema, display_version, execute_convert, validate_args, validate_timeline_file,
    ConvertArgs,
};
use dxt_timeline::output::JsonStyle;
use dxt_timeline::utils::config::{DEFAULT_OUTPUT, TRACE_DIR_ENV};

/// DXT Timeline - I/O trace timelines for cached HDF5 runs
#[derive(Parser, Debug)]
#[command(name = "dxt-timeline")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert darshan-dxt-parser output into a timeline
    Convert {
        /// DXT text file ("-" reads stdin)
        input: PathBuf,

        /// Output path for the timeline JSON
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Directory searched for a relative input path
        #[arg(long, env = TRACE_DIR_ENV)]
        trace_dir: Option<PathBuf>,

        /// Backend file name (defaults to the one found in the trace)
        #[arg(long)]
        primary_file: Option<String>,

        /// Write single-line JSON instead of indented JSON
        #[arg(long)]
        compact: bool,

        /// Print per-rank summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a timeline JSON file
    Validate {
        /// Path to timeline JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            trace_dir,
            primary_file,
            compact,
            summary,
        } => {
            let args = ConvertArgs {
                input,
                trace_dir,
                output,
                primary_file,
                style: if compact {
                    JsonStyle::Compact
                } else {
                    JsonStyle::Pretty
                },
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_convert(args)?;
        }

        Commands::Validate { file } => {
            validate_timeline_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
