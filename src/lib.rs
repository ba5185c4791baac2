//! Kaizen - delivery metrics scoring
//!
//! Turns synced pull-request aggregates into developer efficiency scores,
//! team summaries, benchmark comparisons, a repository health score and
//! an action queue of PRs that need attention.
//!
//! Scoring is pure and synchronous: every function takes borrowed input,
//! returns owned output and never fails. Errors exist only where loosely
//! typed rows are decoded ([`records`]) and where configuration is read
//! ([`config`]).

pub mod config;
pub mod delivery;
pub mod models;
pub mod records;
pub mod reporters;
pub mod scoring;
pub mod series;

pub use config::{load_config, KaizenConfig};
pub use delivery::{build_action_groups, compute_team_health, latest_sync, HealthSummary};
pub use models::{
    DeveloperMetrics, EfficiencyScore, PrState, PullRequest, RepositoryMetrics, RepositoryRef,
};
pub use records::{decode_json, decode_rows, RecordError};
pub use scoring::{
    developer_efficiency, generate_comparison_insights, score_developers, summarize_team,
    DeveloperEfficiency, TeamEfficiency,
};
