// src/checker/mod.rs
// =============================================================================
// This module contains all health checking logic.
//
// Submodules:
// - probe: Checks one URL and classifies the outcome
// - pool: Runs many probes with a concurrency limit
// - report: Restores input order and computes the summary
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `checker::check_all()` instead of
// `checker::pool::check_all()`.
// =============================================================================

mod pool;
mod probe;
mod report;

#[cfg(test)]
mod test_server;

pub use pool::check_all;
pub use probe::{round_ms, CheckOutcome, HealthStatus};
pub use report::{summarize, Report};

use crate::config::{CheckOptions, ConfigError};

// Checks every target and builds the ordered report in one call
//
// This is what the CLI uses: check_all followed by summarize.
pub async fn run_batch(targets: &[String], options: &CheckOptions) -> Result<Report, ConfigError> {
    let outcomes = check_all(targets, options).await?;
    Ok(summarize(outcomes, targets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_batch_empty() {
        let report = run_batch(&[], &CheckOptions::default()).await.unwrap();
        assert!(report.results.is_empty());
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.summary.healthy_percentage, 0.0);
        assert!(report.all_healthy);
    }

    #[tokio::test]
    async fn test_run_batch_orders_results() {
        let server = test_server::StubServer::start().await;
        let targets = vec![server.url("/missing"), server.url("/ok"), "not a url".to_string()];
        let options = CheckOptions::new(2, 3, Default::default()).unwrap();

        let report = run_batch(&targets, &options).await.unwrap();
        let urls: Vec<_> = report.results.iter().map(|o| o.url.clone()).collect();
        assert_eq!(urls, targets);
        assert_eq!(report.summary.up, 1);
        assert_eq!(report.summary.down, 2);
        assert!(!report.all_healthy);
    }
}
