// src/checker/pool.rs
// =============================================================================
// Runs one probe per target with a cap on how many run at the same time.
//
// How it works:
// 1. Turn every target into a (not yet started) probe future
// 2. Feed them through buffer_unordered(max_workers)
// 3. buffer_unordered keeps at most max_workers of them in flight and hands
//    back outcomes in whatever order they finish
//
// Each probe runs in its own tokio task. If a probe panics, only that task
// dies: the pool records a "down" outcome for its target and carries on.
//
// Results come back in completion order. Putting them back in input order is
// the aggregator's job (see report.rs).
// =============================================================================

use futures::stream::{self, StreamExt};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::any::Any;
use std::future::Future;
use std::time::Instant;
use tokio::task::JoinError;
use tracing::{info, warn};

use super::probe::{probe, CheckOutcome};
use crate::config::{CheckOptions, ConfigError};

/// Redirects followed before a probe gives up.
const MAX_REDIRECTS: usize = 10;

// Checks every target over HTTP
//
// Parameters:
//   targets: URLs in the caller's order (duplicates allowed)
//   options: timeout, worker limit and headers for this batch
//
// Returns: one outcome per target, in completion order
//
// Only caller misuse produces an Err, and it does so before anything is sent.
pub async fn check_all(
    targets: &[String],
    options: &CheckOptions,
) -> Result<Vec<CheckOutcome>, ConfigError> {
    options.validate()?;
    if targets.is_empty() {
        return Ok(Vec::new());
    }

    // One client per batch so probes share its connection pool
    let client = Client::builder()
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()?;

    let timeout = options.timeout;
    let headers = options.probe_headers();

    check_all_with(targets, options.max_workers, move |url| {
        let client = client.clone();
        let headers = headers.clone();
        async move { probe(&client, &url, timeout, headers).await }
    })
    .await
}

// Runs `probe_fn` once per target with at most `max_workers` in flight
//
// This is the scheduling half of check_all, generic over the probe itself.
// It checks max_workers again since it can be called directly.
pub async fn check_all_with<F, Fut>(
    targets: &[String],
    max_workers: usize,
    probe_fn: F,
) -> Result<Vec<CheckOutcome>, ConfigError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = CheckOutcome> + Send + 'static,
{
    if max_workers == 0 {
        return Err(ConfigError::InvalidWorkers(max_workers));
    }
    if targets.is_empty() {
        return Ok(Vec::new());
    }

    info!(targets = targets.len(), max_workers, "starting health checks");

    // Futures are lazy: nothing is spawned until buffer_unordered admits it
    let tasks = targets.iter().map(|url| {
        let work = probe_fn(url.clone());
        let url = url.clone();
        async move {
            let start = Instant::now();
            match tokio::spawn(work).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    let reason = join_error_message(e);
                    warn!(url = %url, error = %reason, "probe task failed");
                    CheckOutcome::down(url, None, Some(start.elapsed()), reason)
                }
            }
        }
    });

    let outcomes: Vec<CheckOutcome> = stream::iter(tasks)
        .buffer_unordered(max_workers)
        .collect()
        .await;

    let up = outcomes.iter().filter(|o| o.is_up()).count();
    info!(total = outcomes.len(), up, down = outcomes.len() - up, "health checks finished");

    Ok(outcomes)
}

fn join_error_message(error: JoinError) -> String {
    if error.is_panic() {
        format!("probe panicked: {}", panic_message(error.into_panic()))
    } else {
        "probe task was cancelled".to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
