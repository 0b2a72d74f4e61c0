// src/checker/probe.rs
// =============================================================================
// This module performs a single reachability check against one URL.
//
// Key functionality:
// - Sends one GET request (no retries)
// - Measures wall-clock time from dispatch until the request resolves
// - Classifies the result as "up" or "down"
//
// Classification:
// - 1xx/2xx/3xx response        -> up,   status code, no error
// - 4xx/5xx response            -> down, status code, reason phrase
// - timeout / connect / DNS     -> down, no status code, reason
// - anything else               -> down, no status code, error text
//
// Every failure ends up inside the returned CheckOutcome. Nothing here
// returns an Err, so one bad target can never take down the batch.
// =============================================================================

use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use serde::{Serialize, Serializer};
use std::error::Error as StdError;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

// Whether a target answered successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Up => "up",
            HealthStatus::Down => "down",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// The result of probing one target
//
// Field order here is the key order in the JSON report. Optional fields are
// left out of the JSON entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    /// The URL exactly as the caller supplied it
    pub url: String,
    pub status: HealthStatus,
    /// Present whenever the server sent back a response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Milliseconds from dispatch until the request resolved
    #[serde(
        rename = "response_time_ms",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_rounded_ms"
    )]
    pub elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckOutcome {
    pub fn up(url: String, status_code: u16, elapsed: Duration) -> Self {
        Self {
            url,
            status: HealthStatus::Up,
            status_code: Some(status_code),
            elapsed_ms: Some(duration_ms(elapsed)),
            error: None,
        }
    }

    pub fn down(
        url: String,
        status_code: Option<u16>,
        elapsed: Option<Duration>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            url,
            status: HealthStatus::Down,
            status_code,
            elapsed_ms: elapsed.map(duration_ms),
            error: Some(error.into()),
        }
    }

    pub fn is_up(&self) -> bool {
        self.status == HealthStatus::Up
    }
}

fn duration_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

/// Rounds a millisecond value to two decimal places.
pub fn round_ms(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}

fn serialize_rounded_ms<S: Serializer>(ms: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match ms {
        Some(ms) => serializer.serialize_f64(round_ms(*ms)),
        None => serializer.serialize_none(),
    }
}

// Probes one target and classifies the result
//
// Parameters:
//   client: shared HTTP client (connection pool, redirect policy)
//   target: the URL to check
//   timeout: upper bound on this single attempt
//   headers: headers for this request, already merged with the defaults
//
// The timer starts right before the request is sent and stops as soon as it
// resolves, whichever way it resolves. The body is never read.
pub async fn probe(client: &Client, target: &str, timeout: Duration, headers: HeaderMap) -> CheckOutcome {
    let start = Instant::now();

    let url = match Url::parse(target) {
        Ok(url) => url,
        Err(e) => {
            let outcome =
                CheckOutcome::down(target.to_string(), None, Some(start.elapsed()), format!("invalid URL: {}", e));
            debug!(url = %target, error = ?outcome.error, "probe rejected");
            return outcome;
        }
    };

    let result = client.get(url).headers(headers).timeout(timeout).send().await;
    let elapsed = start.elapsed();

    let outcome = match result {
        Ok(response) => classify_response(target.to_string(), &response, elapsed),
        Err(e) => classify_error(target.to_string(), &e, elapsed, timeout),
    };

    debug!(
        url = %outcome.url,
        status = %outcome.status,
        status_code = ?outcome.status_code,
        elapsed_ms = ?outcome.elapsed_ms,
        "probe finished"
    );
    outcome
}

fn classify_response(url: String, response: &Response, elapsed: Duration) -> CheckOutcome {
    classify_status(url, response.status(), elapsed)
}

// Turns an HTTP status into an outcome
//
// Error statuses count as down even though the server answered: the target
// is reachable but not healthy.
pub(crate) fn classify_status(url: String, status: StatusCode, elapsed: Duration) -> CheckOutcome {
    if status.is_client_error() || status.is_server_error() {
        let reason = status.canonical_reason().unwrap_or("Unknown Status");
        CheckOutcome::down(url, Some(status.as_u16()), Some(elapsed), reason)
    } else {
        CheckOutcome::up(url, status.as_u16(), elapsed)
    }
}

// Turns a transport-level failure into an outcome
//
// reqwest errors can happen for many reasons:
// - The per-request timeout fired
// - DNS resolution or TCP connect failed
// - TLS handshake failed, body/protocol errors, too many redirects
fn classify_error(url: String, error: &reqwest::Error, elapsed: Duration, timeout: Duration) -> CheckOutcome {
    let reason = if error.is_timeout() {
        format!("timed out after {}s", timeout.as_secs())
    } else if error.is_connect() {
        format!("connection failed: {}", root_cause(error))
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else {
        root_cause(error)
    };

    CheckOutcome::down(url, None, Some(elapsed), reason)
}

// reqwest wraps the interesting part (e.g. "Connection refused") a few
// levels down the source chain
fn root_cause(error: &reqwest::Error) -> String {
    let mut source: &dyn StdError = error;
    while let Some(next) = source.source() {
        source = next;
    }
    source.to_string()
}
