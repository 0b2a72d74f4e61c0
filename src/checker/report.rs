// src/checker/report.rs
// =============================================================================
// Turns a pile of outcomes (in completion order) into the final report.
//
// - Restores the caller's target order
// - Counts up/down and the healthy percentage
// - Decides whether the whole batch is healthy
//
// summarize() is a pure function: same inputs, same report.
// =============================================================================

use serde::Serialize;
use std::collections::HashMap;

use super::probe::CheckOutcome;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub up: usize,
    pub down: usize,
    /// up / total * 100, rounded to one decimal; 0 for an empty batch
    pub healthy_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub results: Vec<CheckOutcome>,
    pub summary: Summary,
    pub all_healthy: bool,
}

// Builds a report from outcomes and the order the targets were given in
//
// Outcomes are stable-sorted by the position of their URL in `target_order`.
// Duplicate URLs share a position, so among themselves they keep the order
// they arrived in. A URL that isn't in `target_order` sorts last.
pub fn summarize(mut outcomes: Vec<CheckOutcome>, target_order: &[String]) -> Report {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(target_order.len());
    for (i, url) in target_order.iter().enumerate() {
        positions.entry(url.as_str()).or_insert(i);
    }

    // sort_by_key is stable
    outcomes.sort_by_key(|o| positions.get(o.url.as_str()).copied().unwrap_or(usize::MAX));

    let total = outcomes.len();
    let up = outcomes.iter().filter(|o| o.is_up()).count();
    let down = total - up;

    Report {
        results: outcomes,
        summary: Summary {
            total,
            up,
            down,
            healthy_percentage: healthy_percentage(up, total),
        },
        all_healthy: down == 0,
    }
}

fn healthy_percentage(up: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = up as f64 / total as f64 * 100.0;
    // Exact halves go to the even neighbour: 6.25 -> 6.2
    (pct * 10.0).round_ties_even() / 10.0
}
