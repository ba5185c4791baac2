//! Configuration for Kaizen
//!
//! This module handles:
//! - Project-level configuration (kaizen.toml or .kaizenrc.json)
//! - Report sizing (how many developers to list)
//! - Summarization fallback limits
//!
//! Scoring weights and thresholds are fixed and not configurable.

mod project_config;

pub use project_config::{load_config, KaizenConfig, OverviewConfig, ReportConfig};
