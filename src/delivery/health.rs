//! Composite delivery health for one repository
//!
//! ```text
//! Health = round(0.30 × MergeRate + 0.30 × MergeTime + 0.20 × ReviewTime + 0.20 × Throughput)
//!
//! Throughput = min(100, prs_per_week / 20 × 100)
//! MergeRate  = min(100, merge_rate / 90 × 100)
//! MergeTime  = max(0, 100 − merge_h / 48 × 100)
//! ReviewTime = max(0, 100 − first_review_h / 12 × 100)
//! ```
//!
//! A component whose input metric is missing scores
//! [`HEALTH_COMPONENT_DEFAULT`] instead of 0.

use crate::delivery::age::is_stale;
use crate::delivery::backlog::{backlog_histogram, BacklogCount};
use crate::models::{bounded, PullRequest, RepositoryMetrics};
use crate::scoring::defaults::HEALTH_COMPONENT_DEFAULT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const MERGE_RATE_WEIGHT: f64 = 0.30;
const MERGE_TIME_WEIGHT: f64 = 0.30;
const REVIEW_TIME_WEIGHT: f64 = 0.20;
const THROUGHPUT_WEIGHT: f64 = 0.20;

const TARGET_PRS_PER_WEEK: f64 = 20.0;
const TARGET_MERGE_RATE: f64 = 90.0;
const MERGE_TIME_ZERO_HOURS: f64 = 48.0;
const REVIEW_TIME_ZERO_HOURS: f64 = 12.0;

const WAITING_FOR_METRICS: &str = "Waiting for metrics - trigger a sync";

/// Summary wording by health score
const SUMMARY_BANDS: &[(f64, &str)] = &[
    (80.0, "Delivery is healthy - keep the cadence"),
    (65.0, "Steady delivery, but cycle times can tighten"),
    (0.0, "Delivery risk is rising - focus on reviews & merges"),
];

/// Composite health, derived rates, backlog, and generated talking points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub health_score: Option<u32>,
    pub health_percentile: Option<f64>,
    pub summary: String,
    pub throughput_per_week: Option<f64>,
    pub merge_rate: Option<f64>,
    pub avg_merge_hours: Option<f64>,
    pub avg_time_to_first_review: Option<f64>,
    pub avg_reviews_per_pr: Option<f64>,
    pub active_contributors: Option<u32>,
    pub small_pr_share: Option<f64>,
    pub large_pr_share: Option<f64>,
    pub open_pr_count: usize,
    pub stale_pr_count: usize,
    pub backlog_buckets: [BacklogCount; 4],
    pub wins: Vec<String>,
    pub focus_areas: Vec<String>,
}

/// The four health components before weighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthComponents {
    pub throughput: f64,
    pub merge_rate: f64,
    pub merge_time: f64,
    pub review_time: f64,
}

impl HealthComponents {
    pub fn weighted_score(&self) -> u32 {
        let raw = self.merge_rate * MERGE_RATE_WEIGHT
            + self.merge_time * MERGE_TIME_WEIGHT
            + self.review_time * REVIEW_TIME_WEIGHT
            + self.throughput * THROUGHPUT_WEIGHT;
        bounded(raw).round() as u32
    }
}

/// PRs per week over the data span; absent when the span is missing or zero
pub fn throughput_per_week(metrics: &RepositoryMetrics) -> Option<f64> {
    metrics
        .data_span_days
        .filter(|days| *days > 0.0)
        .map(|days| metrics.total_prs as f64 / (days / 7.0).max(1.0))
}

fn component(input: Option<f64>, score: impl FnOnce(f64) -> f64) -> f64 {
    input.map_or(HEALTH_COMPONENT_DEFAULT, |v| bounded(score(v)))
}

pub fn health_components(metrics: &RepositoryMetrics) -> HealthComponents {
    HealthComponents {
        throughput: component(throughput_per_week(metrics), |tp| {
            (tp / TARGET_PRS_PER_WEEK * 100.0).min(100.0)
        }),
        merge_rate: component(metrics.merge_rate_percent, |rate| {
            (rate / TARGET_MERGE_RATE * 100.0).min(100.0)
        }),
        merge_time: component(metrics.avg_merge_hours, |h| {
            (100.0 - h / MERGE_TIME_ZERO_HOURS * 100.0).max(0.0)
        }),
        review_time: component(metrics.avg_time_to_first_review_hours, |h| {
            (100.0 - h / REVIEW_TIME_ZERO_HOURS * 100.0).max(0.0)
        }),
    }
}

fn summary_for(score: u32) -> &'static str {
    let score = f64::from(score);
    SUMMARY_BANDS
        .iter()
        .find(|(min, _)| score >= *min)
        .map_or(SUMMARY_BANDS[SUMMARY_BANDS.len() - 1].1, |(_, text)| *text)
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Score a repository's delivery health from its metrics and raw PRs
pub fn compute_team_health(
    metrics: Option<&RepositoryMetrics>,
    prs: &[PullRequest],
    now: DateTime<Utc>,
) -> HealthSummary {
    let open: Vec<&PullRequest> = prs.iter().filter(|pr| pr.is_open()).collect();
    let backlog_buckets = backlog_histogram(open.iter().copied(), now);
    let stale_pr_count = open.iter().filter(|pr| is_stale(pr.updated_at, now)).count();

    let Some(metrics) = metrics else {
        debug!("No repository metrics yet; {} open PRs", open.len());
        return HealthSummary {
            health_score: None,
            health_percentile: None,
            summary: WAITING_FOR_METRICS.to_string(),
            throughput_per_week: None,
            merge_rate: None,
            avg_merge_hours: None,
            avg_time_to_first_review: None,
            avg_reviews_per_pr: None,
            active_contributors: None,
            small_pr_share: None,
            large_pr_share: None,
            open_pr_count: open.len(),
            stale_pr_count,
            backlog_buckets,
            wins: Vec::new(),
            focus_areas: Vec::new(),
        };
    };

    let throughput = throughput_per_week(metrics);
    let merge_rate = metrics.merge_rate_percent;
    let avg_merge_hours = metrics.avg_merge_hours;
    let avg_first_review = metrics.avg_time_to_first_review_hours;
    let small_share = metrics.small_pr_percent();
    let large_share = metrics.large_pr_percent();

    let components = health_components(metrics);
    let health_score = components.weighted_score();

    debug!(
        "Health components for {}: throughput={:.1}, merge_rate={:.1}, merge_time={:.1}, review_time={:.1}",
        metrics.repository(),
        components.throughput,
        components.merge_rate,
        components.merge_time,
        components.review_time
    );

    let mut wins = Vec::new();
    if let Some(rate) = merge_rate.filter(|r| *r >= 85.0) {
        wins.push(format!("Merge rate is strong at {rate:.1}%."));
    }
    if let Some(hours) = avg_first_review.filter(|h| *h <= 12.0) {
        wins.push(format!("First reviews land in {hours:.1}h on average."));
    }
    if let Some(share) = small_share.filter(|s| *s >= 60.0) {
        wins.push(format!("{}% of PRs are small and easy to review.", share.round()));
    }
    if let Some(tp) = throughput.filter(|t| *t >= 15.0) {
        wins.push(format!("Team ships roughly {tp:.1} PRs per week."));
    }

    let mut focus_areas = Vec::new();
    if let Some(hours) = avg_merge_hours.filter(|h| *h > 48.0) {
        focus_areas.push(format!("Avg merge time is {hours:.1}h - target < 48h."));
    }
    if let Some(hours) = avg_first_review.filter(|h| *h > 16.0) {
        focus_areas.push(format!("First review waits {hours:.1}h - aim for < 12h."));
    }
    if stale_pr_count > 0 {
        focus_areas.push(format!(
            "{} open PR{} idle > 3 days.",
            stale_pr_count,
            plural(stale_pr_count)
        ));
    }
    if let Some(share) = large_share.filter(|s| *s > 20.0) {
        focus_areas.push(format!(
            "{}% of PRs are large - encourage smaller chunks.",
            share.round()
        ));
    }

    info!(
        "Health score for {}: {} ({} open, {} stale)",
        metrics.repository(),
        health_score,
        open.len(),
        stale_pr_count
    );

    HealthSummary {
        health_score: Some(health_score),
        health_percentile: metrics.health_percentile,
        summary: summary_for(health_score).to_string(),
        throughput_per_week: throughput,
        merge_rate,
        avg_merge_hours,
        avg_time_to_first_review: avg_first_review,
        avg_reviews_per_pr: metrics.avg_reviews_per_pr,
        active_contributors: metrics.active_contributors,
        small_pr_share: small_share,
        large_pr_share: large_share,
        open_pr_count: open.len(),
        stale_pr_count,
        backlog_buckets,
        wins,
        focus_areas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrState;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn metrics() -> RepositoryMetrics {
        RepositoryMetrics {
            repository_owner: "acme".into(),
            repository_name: "api".into(),
            total_prs: 140,
            merged_prs: 126,
            small_prs: 70,
            medium_prs: 50,
            large_prs: 20,
            merge_rate_percent: Some(90.0),
            avg_merge_hours: Some(24.0),
            avg_time_to_first_review_hours: Some(6.0),
            data_span_days: Some(70.0),
            ..Default::default()
        }
    }

    fn open_pr(created_h: i64, updated_h: i64) -> PullRequest {
        PullRequest {
            state: PrState::Open,
            created_at: Some(now() - Duration::hours(created_h)),
            updated_at: Some(now() - Duration::hours(updated_h)),
            ..Default::default()
        }
    }

    #[test]
    fn test_health_scenario() {
        let m = metrics();
        let c = health_components(&m);
        assert!((c.throughput - 70.0).abs() < 1e-9);
        assert_eq!(c.merge_rate, 100.0);
        assert_eq!(c.merge_time, 50.0);
        assert_eq!(c.review_time, 50.0);

        let h = compute_team_health(Some(&m), &[], now());
        assert_eq!(h.health_score, Some(69));
        assert_eq!(h.summary, "Steady delivery, but cycle times can tighten");
        assert_eq!(h.throughput_per_week, Some(14.0));
    }

    #[test]
    fn test_missing_inputs_default_to_sixty() {
        let m = RepositoryMetrics {
            repository_owner: "acme".into(),
            repository_name: "api".into(),
            ..Default::default()
        };
        let c = health_components(&m);
        assert_eq!(
            c,
            HealthComponents {
                throughput: 60.0,
                merge_rate: 60.0,
                merge_time: 60.0,
                review_time: 60.0,
            }
        );
        assert_eq!(compute_team_health(Some(&m), &[], now()).health_score, Some(60));
    }

    #[test]
    fn test_zero_span_has_no_throughput() {
        let m = RepositoryMetrics {
            data_span_days: Some(0.0),
            ..metrics()
        };
        assert_eq!(throughput_per_week(&m), None);
        let short = RepositoryMetrics {
            data_span_days: Some(3.0),
            total_prs: 10,
            ..metrics()
        };
        // span under a week is floored at one week
        assert_eq!(throughput_per_week(&short), Some(10.0));
    }

    #[test]
    fn test_waiting_for_metrics() {
        let prs = vec![open_pr(2, 1), open_pr(200, 100), PullRequest {
            state: PrState::Closed,
            ..open_pr(300, 300)
        }];
        let h = compute_team_health(None, &prs, now());
        assert_eq!(h.health_score, None);
        assert_eq!(h.summary, WAITING_FOR_METRICS);
        assert_eq!(h.open_pr_count, 2);
        assert_eq!(h.stale_pr_count, 1);
        assert_eq!(h.backlog_buckets.iter().map(|b| b.count).sum::<usize>(), 2);
        assert!(h.wins.is_empty());
        assert!(h.focus_areas.is_empty());
    }

    #[test]
    fn test_wins_in_order() {
        let m = RepositoryMetrics {
            total_prs: 200,
            small_prs: 130,
            large_prs: 10,
            medium_prs: 60,
            avg_merge_hours: Some(12.0),
            ..metrics()
        };
        let h = compute_team_health(Some(&m), &[], now());
        assert_eq!(
            h.wins,
            vec![
                "Merge rate is strong at 90.0%.".to_string(),
                "First reviews land in 6.0h on average.".to_string(),
                "65% of PRs are small and easy to review.".to_string(),
                "Team ships roughly 20.0 PRs per week.".to_string(),
            ]
        );
        assert!(h.focus_areas.is_empty());
        assert_eq!(h.summary, "Delivery is healthy - keep the cadence");
    }

    #[test]
    fn test_focus_areas_in_order() {
        let m = RepositoryMetrics {
            merge_rate_percent: Some(50.0),
            avg_merge_hours: Some(60.0),
            avg_time_to_first_review_hours: Some(20.0),
            small_prs: 40,
            medium_prs: 50,
            large_prs: 50,
            ..metrics()
        };
        let prs = vec![open_pr(100, 80)];
        let h = compute_team_health(Some(&m), &prs, now());
        assert_eq!(
            h.focus_areas,
            vec![
                "Avg merge time is 60.0h - target < 48h.".to_string(),
                "First review waits 20.0h - aim for < 12h.".to_string(),
                "1 open PR idle > 3 days.".to_string(),
                "36% of PRs are large - encourage smaller chunks.".to_string(),
            ]
        );
        assert!(h.wins.is_empty());
        assert_eq!(h.summary, "Delivery risk is rising - focus on reviews & merges");
    }
}
