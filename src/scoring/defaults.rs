//! Missing-data policy
//!
//! Every fallback the scorers apply when an input is absent.

/// Score and percentile reported for a facet that has no data to judge
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Percentile rank against an empty benchmark population
pub const NEUTRAL_PERCENTILE: f64 = 50.0;

/// Merge time assumed for velocity when a developer or benchmark
/// repository reports no merge time (missing or zero)
pub const ASSUMED_MERGE_HOURS: f64 = 48.0;

/// Merge rate assumed for a benchmark repository with no merge data
pub const ASSUMED_BENCHMARK_MERGE_RATE: f64 = 0.0;

/// Health component score used when its input metric is missing
pub const HEALTH_COMPONENT_DEFAULT: f64 = 60.0;

/// Reducer result for an empty population (median, nearest-rank value)
pub const EMPTY_REDUCTION: f64 = 0.0;
