//! Core data models for Kaizen
//!
//! These are the aggregate rows supplied by the record store and the
//! derived score types produced by the scoring pipeline. Input rows are
//! decoded through [`crate::records`], which applies the lenient field
//! decoders referenced below.

use crate::records::de;
use crate::scoring::defaults::NEUTRAL_SCORE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner/name pair identifying a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Rolling per-developer metrics for one repository
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeveloperMetrics {
    pub author: String,
    pub repository_owner: String,
    pub repository_name: String,
    #[serde(default, deserialize_with = "de::count")]
    pub total_prs: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub merged_prs: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub small_prs: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub medium_prs: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub large_prs: u32,
    #[serde(default, deserialize_with = "de::number")]
    pub merge_rate_percent: f64,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub avg_merge_hours: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub avg_time_to_first_review_hours: Option<f64>,
    /// Average comments plus review comments per PR
    #[serde(default, deserialize_with = "de::number")]
    pub avg_engagement: f64,
    #[serde(default, deserialize_with = "de::number")]
    pub activity_span_days: f64,
}

impl DeveloperMetrics {
    pub fn repository(&self) -> RepositoryRef {
        RepositoryRef::new(&self.repository_owner, &self.repository_name)
    }

    /// PRs opened per day of activity; the span is floored at one day
    pub fn prs_per_day(&self) -> f64 {
        self.total_prs as f64 / self.activity_span_days.max(1.0)
    }

    /// PRs opened per week of activity; the span is floored at one week
    pub fn prs_per_week(&self) -> f64 {
        self.total_prs as f64 / (self.activity_span_days / 7.0).max(1.0)
    }

    /// Share of small PRs in percent, `None` when there are no PRs
    pub fn small_pr_percent(&self) -> Option<f64> {
        (self.total_prs > 0).then(|| self.small_prs as f64 / self.total_prs as f64 * 100.0)
    }
}

/// Aggregate metrics for one repository snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryMetrics {
    pub repository_owner: String,
    pub repository_name: String,
    #[serde(default, deserialize_with = "de::count")]
    pub total_prs: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub merged_prs: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub small_prs: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub medium_prs: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub large_prs: u32,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub merge_rate_percent: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub avg_merge_hours: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub avg_time_to_first_review_hours: Option<f64>,
    /// Average additions plus deletions per PR
    #[serde(default, deserialize_with = "de::optional_number")]
    pub avg_pr_size: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub avg_reviews_per_pr: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_count")]
    pub active_contributors: Option<u32>,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub data_span_days: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub health_percentile: Option<f64>,
}

impl RepositoryMetrics {
    pub fn repository(&self) -> RepositoryRef {
        RepositoryRef::new(&self.repository_owner, &self.repository_name)
    }

    pub fn small_pr_percent(&self) -> Option<f64> {
        (self.total_prs > 0).then(|| self.small_prs as f64 / self.total_prs as f64 * 100.0)
    }

    pub fn large_pr_percent(&self) -> Option<f64> {
        (self.total_prs > 0).then(|| self.large_prs as f64 / self.total_prs as f64 * 100.0)
    }
}

/// Pull request lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    #[default]
    Open,
    Closed,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrState::Open => write!(f, "open"),
            PrState::Closed => write!(f, "closed"),
        }
    }
}

/// A raw pull request record
///
/// `created_at` and `updated_at` are `None` when the stored value was
/// missing or could not be parsed; downstream age calculations decide
/// how to treat an unknown age.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub pr_number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub html_url: String,
    pub state: PrState,
    #[serde(default)]
    pub draft: bool,
    #[serde(default, deserialize_with = "de::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::timestamp")]
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::timestamp")]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::timestamp")]
    pub synced_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::optional_count")]
    pub additions: Option<u32>,
    #[serde(default, deserialize_with = "de::optional_count")]
    pub deletions: Option<u32>,
    #[serde(default, deserialize_with = "de::optional_count")]
    pub changed_files: Option<u32>,
    #[serde(default, deserialize_with = "de::count")]
    pub comments_count: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub reviews_count: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub review_comments_count: u32,
    #[serde(default)]
    pub is_merged: bool,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub time_to_merge_hours: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub time_to_first_review_hours: Option<f64>,
}

impl PullRequest {
    pub fn is_open(&self) -> bool {
        self.state == PrState::Open
    }

    /// Additions plus deletions, missing sides counted as zero
    pub fn total_changes(&self) -> u64 {
        u64::from(self.additions.unwrap_or(0)) + u64::from(self.deletions.unwrap_or(0))
    }

    /// True when nobody has reviewed or left a review comment yet
    pub fn has_no_review_activity(&self) -> bool {
        self.reviews_count == 0 && self.review_comments_count == 0
    }
}

/// One scored facet: `score` and `percentile` always lie in [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyScore {
    pub score: f64,
    pub percentile: f64,
    pub interpretation: String,
    pub recommendation: String,
}

impl EfficiencyScore {
    /// Build a score, clamping both numbers into [0, 100].
    ///
    /// A NaN is replaced with the neutral score so it can never reach a
    /// weighted sum.
    pub fn new(
        score: f64,
        percentile: f64,
        interpretation: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            score: bounded(score),
            percentile: bounded(percentile),
            interpretation: interpretation.into(),
            recommendation: recommendation.into(),
        }
    }
}

/// Clamp into [0, 100], mapping NaN to the neutral score
pub(crate) fn bounded(value: f64) -> f64 {
    if value.is_nan() {
        NEUTRAL_SCORE
    } else {
        value.clamp(0.0, 100.0)
    }
}
