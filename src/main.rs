// src/main.rs
// =============================================================================
// This is the entry point of the health-checker CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so JSON on stdout stays clean)
// 3. Collect targets and build the check options
// 4. Run the batch and print the report
// 5. Exit with proper code (0 = all healthy, 1 = something down or no
//    targets, 2 = configuration or I/O error)
// =============================================================================

mod checker;
mod cli;
mod config;
mod output;
mod targets;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

use crate::config::CheckOptions;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr. RUST_LOG wins over --verbose when both are set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "health_checker=debug" } else { "health_checker=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = every target is up
//   Ok(1) = at least one target is down, or there was nothing to check
//   Err   = bad configuration or unreadable targets file
async fn run(cli: Cli) -> Result<i32> {
    let targets = targets::collect_targets(&cli.urls, cli.file.as_deref())?;

    if targets.is_empty() {
        eprintln!("No URLs provided");
        return Ok(1);
    }

    let headers = config::parse_headers(&cli.headers)?;
    let options = CheckOptions::new(cli.timeout, cli.workers, headers)?;

    let report = checker::run_batch(&targets, &options).await?;

    if cli.json {
        println!("{}", output::render_json(&report)?);
    } else {
        println!("{}", output::render_text(&report));
    }

    Ok(if report.all_healthy { 0 } else { 1 })
}
