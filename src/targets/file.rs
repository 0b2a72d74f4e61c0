// src/targets/file.rs
// =============================================================================
// Reads targets from the command line and an optional targets file.
//
// File format:
// - One URL per line, surrounding whitespace ignored
// - Blank lines are skipped
// - Lines starting with '#' are comments
//
// Duplicates are kept: each occurrence is checked on its own.
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

// Combines CLI URLs with the contents of the targets file (if any)
//
// Returns: CLI URLs first, then file URLs, in the order they were written
pub fn collect_targets(cli_urls: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut targets = cli_urls.to_vec();

    if let Some(path) = file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read targets file {}", path.display()))?;
        let from_file = parse_targets(&contents);
        debug!(path = %path.display(), count = from_file.len(), "loaded targets file");
        targets.extend(from_file);
    }

    Ok(targets)
}

// Extracts URLs from the text of a targets file
pub fn parse_targets(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
