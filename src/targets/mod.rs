// src/targets/mod.rs
// =============================================================================
// This module gathers the list of URLs to check.
//
// Targets come from two places, in this order:
// - Positional arguments on the command line
// - A targets file with one URL per line
// =============================================================================

mod file;

pub use file::collect_targets;
