//! Developer and repository scoring
//!
//! Turns aggregate metric rows into banded efficiency scores, benchmark
//! percentiles, and comparison insights.
//!
//! # Scoring Formula
//!
//! ```text
//! Overall = 0.20 Velocity + 0.20 Quality + 0.14 Collaboration
//!         + 0.10 Consistency + 0.14 Throughput + 0.08 MergeSpeed
//!         + 0.07 ReviewResponsiveness + 0.04 PrSizeDiscipline
//!         + 0.03 MergeSuccess
//!
//! Velocity = 0.6 × max(0, 100 − merge_h/72 × 100) + 0.4 × min(100, prs_per_day/0.5 × 100)
//! Quality  = 0.4 × merge_rate
//!          + 0.35 × min(100, small% × 1.2)
//!          + 0.25 × min(100, engagement × 20)
//! ```
//!
//! Every sub-score is clamped to [0, 100] and only the overall score is
//! rounded.
//!
//! # Percentiles
//!
//! Velocity and Quality rank against the benchmark repositories
//! (rank-based, direction-aware, 50 for an empty population).
//! Collaboration and Consistency use a fixed percentile per band. The
//! other facets map score to percentile through a step table:
//!
//! - score ≥ 90 → 95
//! - score ≥ 75 → 80
//! - score ≥ 60 → 65
//! - score ≥ 40 → 45
//! - score ≥ 20 → 25
//! - otherwise → 10

pub mod bands;
mod comparison;
pub mod defaults;
pub mod developer;
mod efficiency;
mod percentile;
mod team;

pub use comparison::{
    benchmarks_excluding, generate_comparison_insights, ComparisonInsight, ComparisonMetric,
};
pub use efficiency::{
    developer_efficiency, needs_attention, score_developers, top_developers, DeveloperEfficiency,
    Facet,
};
pub use percentile::{median, percentile_rank, percentile_value, Polarity};
pub use team::{summarize_team, TeamEfficiency, TeamEfficiencySummary};
