//! DXT Timeline
//!
//! Converts the text output of `darshan-dxt-parser` for runs that use a
//! node-local write cache into a Chrome Trace Event Format timeline.
//! Every rank gets two tracks, one for the cache shadow file and one for
//! the backend file, so cache and parallel-filesystem I/O can be compared
//! on a shared time axis.
//!
//! This crate provides the core implementation for the
//! `dxt-timeline` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! darshan-dxt-parser run.darshan > run.txt
//! dxt-timeline convert run.txt -o timeline.json
//! ```
//!
//! The result opens in `chrome://tracing` or Perfetto.

pub mod commands;
pub mod output;
pub mod parser;
pub mod timeline;
pub mod utils;
