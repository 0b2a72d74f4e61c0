// src/config.rs
// =============================================================================
// Configuration for one batch of health checks.
//
// A CheckOptions value is built once per batch, validated eagerly, and then
// only read. Every probe gets its own freshly built header map, so nothing
// one probe does can leak into the next.
//
// Rust concepts:
// - thiserror: Derive std::error::Error for our own error enum
// - Builder-ish constructors returning Result: fail fast on bad input
// - HeaderMap: reqwest's typed header collection
// =============================================================================

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::time::Duration;
use thiserror::Error;

/// Timeout applied to each probe when the caller doesn't pick one
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Number of probes allowed in flight at once by default
pub const DEFAULT_MAX_WORKERS: usize = 5;

/// User-Agent sent when the caller's headers don't include one
pub const DEFAULT_USER_AGENT: &str = "HealthChecker/1.0";

// Errors caused by caller misuse.
//
// These are the only errors a batch can return. Anything that goes wrong
// while probing a single target is recorded in that target's outcome instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max workers must be at least 1, got {0}")]
    InvalidWorkers(usize),

    #[error("timeout must be at least 1 second")]
    InvalidTimeout,

    #[error("invalid header '{header}': {reason}")]
    InvalidHeader { header: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

// Options shared by every probe in a batch
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Per-probe timeout, covering connect through response headers
    pub timeout: Duration,
    /// Upper bound on simultaneously running probes
    pub max_workers: usize,
    /// Extra request headers supplied by the caller
    pub headers: HeaderMap,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_workers: DEFAULT_MAX_WORKERS,
            headers: HeaderMap::new(),
        }
    }
}

impl CheckOptions {
    // Builds validated options
    //
    // Returns an error before any network activity if the worker count or
    // timeout can't possibly work.
    pub fn new(
        timeout_secs: u64,
        max_workers: usize,
        headers: HeaderMap,
    ) -> Result<Self, ConfigError> {
        let options = Self {
            timeout: Duration::from_secs(timeout_secs),
            max_workers,
            headers,
        };
        options.validate()?;
        Ok(options)
    }

    /// Checks the invariants the worker pool relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == 0 {
            return Err(ConfigError::InvalidWorkers(self.max_workers));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    // Returns the headers to send with a probe
    //
    // This is a new map every time: the caller's headers plus our default
    // User-Agent if they didn't set one. self.headers is never modified.
    pub fn probe_headers(&self) -> HeaderMap {
        let mut headers = self.headers.clone();
        if !headers.contains_key(USER_AGENT) {
            headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        }
        headers
    }
}

// Parses a "Name: value" string from the command line into a typed header
pub fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidHeader {
        header: raw.to_string(),
        reason: reason.to_string(),
    };

    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| invalid("expected 'Name: value'"))?;

    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|e| invalid(&e.to_string()))?;
    let value = HeaderValue::from_str(value.trim()).map_err(|e| invalid(&e.to_string()))?;

    Ok((name, value))
}

// Collects many "Name: value" strings into one HeaderMap
//
// Later duplicates replace earlier ones, matching how a plain dictionary of
// headers behaves.
pub fn parse_headers<S: AsRef<str>>(raw: &[S]) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();
    for entry in raw {
        let (name, value) = parse_header(entry.as_ref())?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CheckOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.max_workers, 5);
        assert!(options.headers.is_empty());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = CheckOptions::new(10, 0, HeaderMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkers(0)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = CheckOptions::new(0, 5, HeaderMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout));
    }

    #[test]
    fn test_probe_headers_adds_user_agent() {
        let options = CheckOptions::default();
        let headers = options.probe_headers();
        assert_eq!(headers.get(USER_AGENT).unwrap(), DEFAULT_USER_AGENT);
        // The caller's map stays untouched
        assert!(options.headers.is_empty());
    }

    #[test]
    fn test_probe_headers_keeps_custom_user_agent() {
        let headers = parse_headers(&["User-Agent: probe/2.0", "X-Token: abc"]).unwrap();
        let options = CheckOptions::new(10, 5, headers).unwrap();
        let sent = options.probe_headers();
        assert_eq!(sent.get(USER_AGENT).unwrap(), "probe/2.0");
        assert_eq!(sent.get("x-token").unwrap(), "abc");
    }

    #[test]
    fn test_parse_header() {
        let (name, value) = parse_header("Authorization:  Bearer xyz ").unwrap();
        assert_eq!(name.as_str(), "authorization");
        assert_eq!(value, "Bearer xyz");

        assert!(parse_header("no-colon-here").is_err());
        assert!(parse_header("bad name: value").is_err());
    }
}
