// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI is described by a plain struct and clap
// generates the parser, --help and --version from the attributes.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_MAX_WORKERS, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "health-checker",
    version,
    about = "Check health of HTTP endpoints",
    long_about = "health-checker sends one GET request to each URL, a few at a time, and reports \
                  which ones are up. It exits with 0 when every endpoint is healthy and 1 otherwise, \
                  which makes it easy to drop into CI pipelines and cron jobs."
)]
pub struct Cli {
    /// URLs to check
    pub urls: Vec<String>,

    /// File containing URLs (one per line, '#' starts a comment)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Timeout in seconds for each request
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Max concurrent workers
    #[arg(short, long, default_value_t = DEFAULT_MAX_WORKERS)]
    pub workers: usize,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Extra request header, e.g. -H "Authorization: Bearer xyz" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    /// Log each probe to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
