//! Report payload assembly
//!
//! Bundles everything a delivery report needs into one serializable
//! value: health projection, action queue counts, developer rankings and
//! benchmark groups.

use crate::config::ReportConfig;
use crate::delivery::{
    build_action_groups, compute_team_health, latest_sync, ActionGroupKey, HealthSummary,
};
use crate::models::{PullRequest, RepositoryMetrics, RepositoryRef};
use crate::scoring::{
    benchmarks_excluding, median, needs_attention, percentile_value, top_developers,
    ComparisonMetric, DeveloperEfficiency,
};
use crate::series::{first_review_vs_merge_time, size_distribution, size_vs_merge_time, SizeShare};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything a report is built from
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub repository: &'a RepositoryRef,
    /// Aggregate metrics for the repository, if a sync has produced them
    pub metrics: Option<&'a RepositoryMetrics>,
    /// Known repositories; the focal one is excluded automatically
    pub benchmarks: &'a [RepositoryMetrics],
    pub developers: &'a [DeveloperEfficiency],
    pub prs: &'a [PullRequest],
}

/// Health fields carried into a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHealth {
    pub health_score: Option<u32>,
    pub summary: String,
    pub open_pr_count: usize,
    pub stale_pr_count: usize,
    pub throughput_per_week: Option<f64>,
    pub merge_rate: Option<f64>,
    pub avg_merge_hours: Option<f64>,
    pub avg_time_to_first_review: Option<f64>,
}

impl From<&HealthSummary> for ReportHealth {
    fn from(h: &HealthSummary) -> Self {
        Self {
            health_score: h.health_score,
            summary: h.summary.clone(),
            open_pr_count: h.open_pr_count,
            stale_pr_count: h.stale_pr_count,
            throughput_per_week: h.throughput_per_week,
            merge_rate: h.merge_rate,
            avg_merge_hours: h.avg_merge_hours,
            avg_time_to_first_review: h.avg_time_to_first_review,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionQueueCount {
    pub key: ActionGroupKey,
    pub title: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperScore {
    pub author: String,
    pub overall_score: u32,
}

impl From<&DeveloperEfficiency> for DeveloperScore {
    fn from(e: &DeveloperEfficiency) -> Self {
        Self {
            author: e.author.clone(),
            overall_score: e.overall_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportDevelopers {
    pub top: Vec<DeveloperScore>,
    pub needs_attention: Vec<DeveloperScore>,
}

/// One benchmark bar: your value against the population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    pub name: String,
    pub your_team: f64,
    pub industry_median: f64,
    /// Absent when no benchmark repository has data for the metric
    pub top_performer: Option<f64>,
}

impl BenchmarkEntry {
    fn new(name: &str, your_team: f64, population: &[f64], top_percentile: f64) -> Self {
        Self {
            name: name.to_string(),
            your_team,
            industry_median: median(population),
            top_performer: (!population.is_empty())
                .then(|| percentile_value(population, top_percentile)),
        }
    }

    fn for_metric(
        name: &str,
        metric: ComparisonMetric,
        focal: &RepositoryMetrics,
        others: &[RepositoryMetrics],
    ) -> Self {
        Self::new(
            name,
            metric.value(focal),
            &metric.population(others),
            metric.top_percentile(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportBenchmarks {
    pub speed: Vec<BenchmarkEntry>,
    pub quality: Vec<BenchmarkEntry>,
}

/// Number of points available for each chart
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartsSummary {
    pub size_vs_time_points: usize,
    pub review_vs_merge_points: usize,
}

/// A complete, serializable delivery report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub repository: RepositoryRef,
    pub latest_sync: Option<DateTime<Utc>>,
    pub health: ReportHealth,
    pub action_queue: Vec<ActionQueueCount>,
    pub developers: ReportDevelopers,
    pub benchmarks: ReportBenchmarks,
    pub size_distribution: Vec<SizeShare>,
    pub charts_summary: ChartsSummary,
}

/// First review is lower-is-better; top performer is the 10th percentile
const FIRST_REVIEW_TOP_PERCENTILE: f64 = 10.0;

fn first_review_hours(repo: &RepositoryMetrics) -> Option<f64> {
    repo.avg_time_to_first_review_hours.filter(|h| *h > 0.0)
}

fn benchmark_groups(focal: &RepositoryMetrics, all: &[RepositoryMetrics]) -> ReportBenchmarks {
    let others = benchmarks_excluding(all, &focal.repository());
    let review_population: Vec<f64> = others.iter().filter_map(first_review_hours).collect();

    ReportBenchmarks {
        speed: vec![
            BenchmarkEntry::for_metric(
                "Merge Time (hrs)",
                ComparisonMetric::MergeTime,
                focal,
                &others,
            ),
            BenchmarkEntry::new(
                "First Review (hrs)",
                focal.avg_time_to_first_review_hours.unwrap_or(0.0),
                &review_population,
                FIRST_REVIEW_TOP_PERCENTILE,
            ),
        ],
        quality: vec![
            BenchmarkEntry::for_metric(
                "Merge Rate (%)",
                ComparisonMetric::MergeRate,
                focal,
                &others,
            ),
            BenchmarkEntry::for_metric(
                "Reviews per PR",
                ComparisonMetric::ReviewsPerPr,
                focal,
                &others,
            ),
            BenchmarkEntry::for_metric("PR Size (lines)", ComparisonMetric::PrSize, focal, &others),
        ],
    }
}

/// Assemble a report payload
pub fn build_report(
    inputs: &ReportInputs<'_>,
    config: &ReportConfig,
    now: DateTime<Utc>,
) -> ReportPayload {
    let health = compute_team_health(inputs.metrics, inputs.prs, now);
    let action_queue = build_action_groups(inputs.prs, now)
        .iter()
        .map(|g| ActionQueueCount {
            key: g.key,
            title: g.title.to_string(),
            count: g.prs.len(),
        })
        .collect();

    let developers = ReportDevelopers {
        top: top_developers(inputs.developers, config.top_developers)
            .into_iter()
            .map(DeveloperScore::from)
            .collect(),
        needs_attention: needs_attention(inputs.developers, config.needs_attention)
            .into_iter()
            .map(DeveloperScore::from)
            .collect(),
    };

    let (benchmarks, size_distribution) = match inputs.metrics {
        Some(m) => (benchmark_groups(m, inputs.benchmarks), size_distribution(m).to_vec()),
        None => (ReportBenchmarks::default(), Vec::new()),
    };

    let payload = ReportPayload {
        repository: inputs.repository.clone(),
        latest_sync: latest_sync(inputs.prs),
        health: ReportHealth::from(&health),
        action_queue,
        developers,
        benchmarks,
        size_distribution,
        charts_summary: ChartsSummary {
            size_vs_time_points: size_vs_merge_time(inputs.prs).len(),
            review_vs_merge_points: first_review_vs_merge_time(inputs.prs).len(),
        },
    };

    info!(
        "Built report for {}: {} PRs, {} developers, {} action groups",
        payload.repository,
        inputs.prs.len(),
        inputs.developers.len(),
        payload.action_queue.len()
    );
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{now, test_inputs, TestData};

    #[test]
    fn test_report_sections() {
        let data = TestData::new();
        let payload = build_report(&test_inputs(&data), &ReportConfig::default(), now());

        assert_eq!(payload.repository.to_string(), "acme/api");
        assert_eq!(payload.health.health_score, Some(69));
        assert_eq!(payload.health.open_pr_count, 2);
        assert_eq!(payload.latest_sync, data.prs[0].synced_at);

        let keys: Vec<_> = payload.action_queue.iter().map(|q| q.key).collect();
        assert_eq!(keys, vec![ActionGroupKey::Stale, ActionGroupKey::Review]);
        assert_eq!(payload.action_queue[0].title, "Stuck > 3 days");

        assert_eq!(payload.developers.top.len(), 3);
        assert_eq!(payload.developers.needs_attention.len(), 3);
        assert!(payload.developers.top[0].overall_score >= payload.developers.top[2].overall_score);
        assert!(
            payload.developers.needs_attention[0].overall_score
                <= payload.developers.needs_attention[2].overall_score
        );

        assert_eq!(payload.size_distribution.len(), 3);
        assert_eq!(payload.charts_summary.size_vs_time_points, 1);
    }

    #[test]
    fn test_benchmarks_exclude_focal_repository() {
        let data = TestData::new();
        let payload = build_report(&test_inputs(&data), &ReportConfig::default(), now());

        let merge = &payload.benchmarks.speed[0];
        assert_eq!(merge.name, "Merge Time (hrs)");
        assert_eq!(merge.your_team, 24.0);
        // focal repo (24h) excluded: population is 30, 40, 50
        assert_eq!(merge.industry_median, 40.0);
        assert_eq!(merge.top_performer, Some(30.0));

        let review = &payload.benchmarks.speed[1];
        assert_eq!(review.your_team, 6.0);
        assert_eq!(review.industry_median, 10.0);

        let names: Vec<_> = payload.benchmarks.quality.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Merge Rate (%)", "Reviews per PR", "PR Size (lines)"]);
    }

    #[test]
    fn test_config_limits_developer_lists() {
        let data = TestData::new();
        let config = ReportConfig {
            top_developers: 1,
            needs_attention: 0,
        };
        let payload = build_report(&test_inputs(&data), &config, now());
        assert_eq!(payload.developers.top.len(), 1);
        assert!(payload.developers.needs_attention.is_empty());
    }

    #[test]
    fn test_without_metrics() {
        let data = TestData::new();
        let inputs = ReportInputs {
            metrics: None,
            benchmarks: &[],
            ..test_inputs(&data)
        };
        let payload = build_report(&inputs, &ReportConfig::default(), now());
        assert_eq!(payload.health.health_score, None);
        assert!(payload.health.summary.starts_with("Waiting for metrics"));
        assert!(payload.benchmarks.speed.is_empty());
        assert!(payload.size_distribution.is_empty());
    }

    #[test]
    fn test_empty_population_has_no_top_performer() {
        let data = TestData::new();
        let inputs = ReportInputs {
            benchmarks: &[],
            ..test_inputs(&data)
        };
        let payload = build_report(&inputs, &ReportConfig::default(), now());
        let merge = &payload.benchmarks.speed[0];
        assert_eq!(merge.industry_median, 0.0);
        assert_eq!(merge.top_performer, None);
    }
}
