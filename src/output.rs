// src/output.rs
// =============================================================================
// Renders a Report for humans or machines.
//
// Text:
//   ✓ https://a.test: up (12.34ms)
//   ✗ https://b.test: down (8.1ms) - Internal Server Error
//
//   Summary: 1/2 up (50.0%)
//
// JSON: the Report serialized as-is (see checker::report for the shape).
// =============================================================================

use crate::checker::{round_ms, CheckOutcome, HealthStatus, Report};

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    for outcome in &report.results {
        out.push_str(&format_outcome(outcome));
        out.push('\n');
    }

    let summary = &report.summary;
    // An empty batch prints "0", anything else keeps one decimal
    let pct = if summary.total == 0 {
        "0".to_string()
    } else {
        format!("{:.1}", summary.healthy_percentage)
    };

    out.push('\n');
    out.push_str(&format!("Summary: {}/{} up ({}%)", summary.up, summary.total, pct));
    out
}

pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn format_outcome(outcome: &CheckOutcome) -> String {
    let icon = match outcome.status {
        HealthStatus::Up => "✓",
        HealthStatus::Down => "✗",
    };
    let time = outcome
        .elapsed_ms
        .map(|ms| format!(" ({:?}ms)", round_ms(ms)))
        .unwrap_or_default();
    let error = outcome
        .error
        .as_deref()
        .map(|e| format!(" - {}", e))
        .unwrap_or_default();

    format!("{} {}: {}{}{}", icon, outcome.url, outcome.status, time, error)
}
