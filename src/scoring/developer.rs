//! Developer sub-score calculators
//!
//! Nine independent facets, each a clamped linear blend of normalized
//! ratios. Velocity and Quality rank against the benchmark repositories;
//! Collaboration and Consistency carry a fixed percentile per band; the
//! rest derive their percentile from the score step table.

use crate::models::{DeveloperMetrics, EfficiencyScore, RepositoryMetrics};
use crate::scoring::bands::{self, Band};
use crate::scoring::defaults::{
    ASSUMED_BENCHMARK_MERGE_RATE, ASSUMED_MERGE_HOURS, NEUTRAL_SCORE,
};
use crate::scoring::percentile::{percentile_rank, Polarity};

/// Merge time at which the velocity merge component reaches zero
const VELOCITY_MERGE_CAP_HOURS: f64 = 72.0;
/// PRs per day that saturate the velocity throughput component
const VELOCITY_TARGET_PRS_PER_DAY: f64 = 0.5;
const VELOCITY_MERGE_WEIGHT: f64 = 0.6;
const VELOCITY_THROUGHPUT_WEIGHT: f64 = 0.4;

const QUALITY_MERGE_RATE_WEIGHT: f64 = 0.40;
const QUALITY_SIZE_WEIGHT: f64 = 0.35;
const QUALITY_ENGAGEMENT_WEIGHT: f64 = 0.25;
/// Small-PR share multiplier (about 83% small PRs saturates)
const QUALITY_SIZE_FACTOR: f64 = 1.2;
/// Engagement multiplier for quality (5 interactions saturate)
const QUALITY_ENGAGEMENT_FACTOR: f64 = 20.0;

/// Engagement multiplier for collaboration (about 6.7 interactions saturate)
const COLLABORATION_ENGAGEMENT_FACTOR: f64 = 15.0;

/// Sustainable PRs-per-day range that scores a full 100
const CONSISTENCY_RANGE: (f64, f64) = (0.2, 1.0);
/// Points lost per PR/day above the range
const CONSISTENCY_DECAY_PER_UNIT: f64 = 20.0;

const THROUGHPUT_TARGET_PRS_PER_WEEK: f64 = 3.0;
const MERGE_SPEED_ZERO_HOURS: f64 = 48.0;
const REVIEW_ZERO_HOURS: f64 = 24.0;

fn banded(table: &'static [Band], score: f64, percentile: f64) -> EfficiencyScore {
    let band = bands::classify(table, score);
    EfficiencyScore::new(score, percentile, band.interpretation, band.recommendation)
}

/// Band text plus the generic step-table percentile
fn stepped(table: &'static [Band], score: f64) -> EfficiencyScore {
    banded(table, score, bands::step(bands::STEP_PERCENTILES, score))
}

/// Linear decay from 100 at zero hours to 0 at `zero_at` hours
fn inverse_hours(hours: f64, zero_at: f64) -> f64 {
    (100.0 - hours / zero_at * 100.0).max(0.0)
}

/// Average merge hours for velocity; zero or missing means no merged PRs
fn velocity_merge_hours(avg_merge_hours: Option<f64>) -> f64 {
    avg_merge_hours
        .filter(|h| *h > 0.0)
        .unwrap_or(ASSUMED_MERGE_HOURS)
}

/// Velocity: merge speed (60%) and daily throughput (40%)
pub fn velocity_score(
    metrics: &DeveloperMetrics,
    benchmarks: &[RepositoryMetrics],
) -> EfficiencyScore {
    let merge_hours = velocity_merge_hours(metrics.avg_merge_hours);
    let merge_component = inverse_hours(merge_hours, VELOCITY_MERGE_CAP_HOURS);
    let throughput_component =
        (metrics.prs_per_day() / VELOCITY_TARGET_PRS_PER_DAY * 100.0).min(100.0);
    let score = merge_component * VELOCITY_MERGE_WEIGHT
        + throughput_component * VELOCITY_THROUGHPUT_WEIGHT;

    let population: Vec<f64> = benchmarks
        .iter()
        .map(|b| velocity_merge_hours(b.avg_merge_hours))
        .collect();
    let percentile = percentile_rank(merge_hours, &population, Polarity::LowerIsBetter);

    banded(bands::VELOCITY, score, percentile)
}

/// Quality: merge rate (40%), small-PR share (35%), review engagement (25%)
pub fn quality_score(
    metrics: &DeveloperMetrics,
    benchmarks: &[RepositoryMetrics],
) -> EfficiencyScore {
    let merge_rate = metrics.merge_rate_percent;
    let size_component =
        (metrics.small_pr_percent().unwrap_or(0.0) * QUALITY_SIZE_FACTOR).min(100.0);
    let engagement_component = (metrics.avg_engagement * QUALITY_ENGAGEMENT_FACTOR).min(100.0);
    let score = merge_rate * QUALITY_MERGE_RATE_WEIGHT
        + size_component * QUALITY_SIZE_WEIGHT
        + engagement_component * QUALITY_ENGAGEMENT_WEIGHT;

    let population: Vec<f64> = benchmarks
        .iter()
        .map(|b| b.merge_rate_percent.unwrap_or(ASSUMED_BENCHMARK_MERGE_RATE))
        .collect();
    let percentile = percentile_rank(merge_rate, &population, Polarity::HigherIsBetter);

    banded(bands::QUALITY, score, percentile)
}

/// Collaboration: review engagement per PR
pub fn collaboration_score(metrics: &DeveloperMetrics) -> EfficiencyScore {
    let score = (metrics.avg_engagement * COLLABORATION_ENGAGEMENT_FACTOR).min(100.0);
    let percentile = bands::step(bands::COLLABORATION_PERCENTILES, score);
    banded(bands::COLLABORATION, score, percentile)
}

/// Consistency: how close the daily PR rate sits to a sustainable range
pub fn consistency_score(metrics: &DeveloperMetrics) -> EfficiencyScore {
    let per_day = metrics.prs_per_day();
    let (low, high) = CONSISTENCY_RANGE;
    let score = if per_day < low {
        per_day / low * 100.0
    } else if per_day <= high {
        100.0
    } else {
        (100.0 - (per_day - high) * CONSISTENCY_DECAY_PER_UNIT).max(0.0)
    };
    let percentile = bands::step(bands::CONSISTENCY_PERCENTILES, score);
    banded(bands::CONSISTENCY, score, percentile)
}

/// Throughput: PRs per week against a target of three
pub fn throughput_score(metrics: &DeveloperMetrics) -> EfficiencyScore {
    let score = (metrics.prs_per_week() / THROUGHPUT_TARGET_PRS_PER_WEEK * 100.0).min(100.0);
    stepped(bands::THROUGHPUT, score)
}

/// Merge speed: 100 at instant merges, 0 at two days. Neutral without data.
pub fn merge_speed_score(metrics: &DeveloperMetrics) -> EfficiencyScore {
    match metrics.avg_merge_hours {
        Some(hours) => stepped(
            bands::MERGE_SPEED,
            inverse_hours(hours, MERGE_SPEED_ZERO_HOURS),
        ),
        None => EfficiencyScore::new(
            NEUTRAL_SCORE,
            NEUTRAL_SCORE,
            "No merged PRs yet to measure merge speed",
            "Merge a few PRs to unlock this signal",
        ),
    }
}

/// Review responsiveness: 100 at instant first review, 0 at one day. Neutral without data.
pub fn review_responsiveness_score(metrics: &DeveloperMetrics) -> EfficiencyScore {
    match metrics.avg_time_to_first_review_hours {
        Some(hours) => stepped(
            bands::REVIEW_RESPONSIVENESS,
            inverse_hours(hours, REVIEW_ZERO_HOURS),
        ),
        None => EfficiencyScore::new(
            NEUTRAL_SCORE,
            NEUTRAL_SCORE,
            "No reviewed PRs yet to measure review latency",
            "Request reviews on open PRs to unlock this signal",
        ),
    }
}

/// PR size discipline: share of PRs classified small
pub fn pr_size_discipline_score(metrics: &DeveloperMetrics) -> EfficiencyScore {
    let score = metrics.small_pr_percent().unwrap_or(0.0).min(100.0);
    stepped(bands::PR_SIZE_DISCIPLINE, score)
}

/// Merge success: the merge rate itself
pub fn merge_success_score(metrics: &DeveloperMetrics) -> EfficiencyScore {
    let score = metrics.merge_rate_percent.clamp(0.0, 100.0);
    stepped(bands::MERGE_SUCCESS, score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev() -> DeveloperMetrics {
        DeveloperMetrics {
            author: "ada".into(),
            repository_owner: "acme".into(),
            repository_name: "api".into(),
            total_prs: 20,
            merged_prs: 18,
            small_prs: 12,
            medium_prs: 6,
            large_prs: 2,
            merge_rate_percent: 90.0,
            avg_merge_hours: Some(24.0),
            avg_time_to_first_review_hours: Some(6.0),
            avg_engagement: 3.0,
            activity_span_days: 40.0,
        }
    }

    fn repo(merge_hours: Option<f64>, merge_rate: Option<f64>) -> RepositoryMetrics {
        RepositoryMetrics {
            repository_owner: "bench".into(),
            repository_name: "repo".into(),
            avg_merge_hours: merge_hours,
            merge_rate_percent: merge_rate,
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_speed_scenario() {
        let s = merge_speed_score(&dev());
        assert_eq!(s.score, 50.0);
        assert_eq!(s.percentile, 45.0);
    }

    #[test]
    fn test_merge_speed_neutral_without_data() {
        let m = DeveloperMetrics {
            avg_merge_hours: None,
            ..dev()
        };
        let s = merge_speed_score(&m);
        assert_eq!((s.score, s.percentile), (50.0, 50.0));
    }

    #[test]
    fn test_review_responsiveness() {
        let s = review_responsiveness_score(&dev());
        assert_eq!(s.score, 75.0);
        assert_eq!(s.percentile, 80.0);
        let slow = DeveloperMetrics {
            avg_time_to_first_review_hours: Some(100.0),
            ..dev()
        };
        assert_eq!(review_responsiveness_score(&slow).score, 0.0);
        let none = DeveloperMetrics {
            avg_time_to_first_review_hours: None,
            ..dev()
        };
        assert_eq!(review_responsiveness_score(&none).score, 50.0);
    }

    #[test]
    fn test_velocity_blend_and_percentile() {
        // merge: 100 - 24/72*100 = 66.67; throughput: 0.5/0.5 = 100
        let benchmarks = vec![repo(Some(10.0), None), repo(Some(30.0), None), repo(None, None)];
        let s = velocity_score(&dev(), &benchmarks);
        let expected = (100.0 - 24.0 / 72.0 * 100.0) * 0.6 + 100.0 * 0.4;
        assert!((s.score - expected).abs() < 1e-9);
        // 30h and the assumed 48h are worse than 24h
        assert_eq!(s.percentile, 67.0);
        assert_eq!(
            s.interpretation,
            bands::classify(bands::VELOCITY, expected).interpretation
        );
    }

    #[test]
    fn test_velocity_assumes_48h_when_missing() {
        let m = DeveloperMetrics {
            avg_merge_hours: None,
            total_prs: 0,
            ..dev()
        };
        let s = velocity_score(&m, &[]);
        let expected = (100.0 - 48.0 / 72.0 * 100.0) * 0.6;
        assert!((s.score - expected).abs() < 1e-9);
        assert_eq!(s.percentile, 50.0);
    }

    #[test]
    fn test_velocity_treats_zero_merge_hours_as_missing() {
        // a 0h benchmark counts as 48h, so 24h beats both rows
        let benchmarks = vec![repo(Some(0.0), None), repo(Some(30.0), None)];
        assert_eq!(velocity_score(&dev(), &benchmarks).percentile, 100.0);

        let unmerged = DeveloperMetrics {
            avg_merge_hours: Some(0.0),
            total_prs: 0,
            ..dev()
        };
        let missing = DeveloperMetrics {
            avg_merge_hours: None,
            ..unmerged.clone()
        };
        let s = velocity_score(&unmerged, &[]);
        assert!((s.score - 20.0).abs() < 1e-9);
        assert_eq!(s, velocity_score(&missing, &[]));
    }

    #[test]
    fn test_quality_blend() {
        // 90*0.4 + min(100, 60*1.2)*0.35 + min(100, 3*20)*0.25
        let benchmarks = vec![repo(None, Some(80.0)), repo(None, Some(95.0))];
        let s = quality_score(&dev(), &benchmarks);
        let expected = 36.0 + 72.0 * 0.35 + 60.0 * 0.25;
        assert!((s.score - expected).abs() < 1e-9);
        assert_eq!(s.percentile, 50.0);
    }

    #[test]
    fn test_quality_zero_prs_is_not_nan() {
        let m = DeveloperMetrics {
            total_prs: 0,
            small_prs: 0,
            medium_prs: 0,
            large_prs: 0,
            ..dev()
        };
        let s = quality_score(&m, &[]);
        assert!(!s.score.is_nan());
    }

    #[test]
    fn test_collaboration_band_percentiles() {
        let high = DeveloperMetrics {
            avg_engagement: 7.0,
            ..dev()
        };
        let s = collaboration_score(&high);
        assert_eq!((s.score, s.percentile), (100.0, 90.0));

        let s = collaboration_score(&dev());
        assert_eq!((s.score, s.percentile), (45.0, 40.0));

        let none = DeveloperMetrics {
            avg_engagement: 0.0,
            ..dev()
        };
        assert_eq!(collaboration_score(&none).percentile, 20.0);
    }

    #[test]
    fn test_consistency_piecewise() {
        let rate = |prs: u32, days: f64| DeveloperMetrics {
            total_prs: prs,
            activity_span_days: days,
            ..dev()
        };
        assert_eq!(consistency_score(&rate(10, 20.0)).score, 100.0);
        assert_eq!(consistency_score(&rate(2, 10.0)).score, 100.0);
        assert_eq!(consistency_score(&rate(1, 10.0)).score, 50.0);
        assert_eq!(consistency_score(&rate(20, 10.0)).score, 80.0);
        assert_eq!(consistency_score(&rate(100, 10.0)).score, 0.0);
        assert_eq!(consistency_score(&rate(10, 20.0)).percentile, 85.0);
    }

    #[test]
    fn test_throughput() {
        // 20 PRs over 40 days = 3.5 PRs/week -> capped 100
        let s = throughput_score(&dev());
        assert_eq!(s.score, 100.0);
        assert_eq!(s.interpretation, bands::THROUGHPUT[0].interpretation);
        let slow = DeveloperMetrics {
            total_prs: 3,
            activity_span_days: 14.0,
            ..dev()
        };
        assert_eq!(throughput_score(&slow).score, 50.0);
    }

    #[test]
    fn test_pr_size_discipline() {
        assert_eq!(pr_size_discipline_score(&dev()).score, 60.0);
        let empty = DeveloperMetrics {
            total_prs: 0,
            small_prs: 0,
            medium_prs: 0,
            large_prs: 0,
            ..dev()
        };
        assert_eq!(pr_size_discipline_score(&empty).score, 0.0);
    }

    #[test]
    fn test_merge_success_clamps_and_bands() {
        let over = DeveloperMetrics {
            merge_rate_percent: 120.0,
            ..dev()
        };
        assert_eq!(merge_success_score(&over).score, 100.0);
        let s = merge_success_score(&dev());
        assert_eq!(s.interpretation, bands::MERGE_SUCCESS[0].interpretation);
        let low = DeveloperMetrics {
            merge_rate_percent: 74.9,
            ..dev()
        };
        assert_eq!(
            merge_success_score(&low).interpretation,
            bands::MERGE_SUCCESS[2].interpretation
        );
    }

    #[test]
    fn test_calculators_are_idempotent() {
        let m = dev();
        let benchmarks = vec![repo(Some(12.0), Some(70.0))];
        assert_eq!(velocity_score(&m, &benchmarks), velocity_score(&m, &benchmarks));
        assert_eq!(quality_score(&m, &benchmarks), quality_score(&m, &benchmarks));
        assert_eq!(consistency_score(&m), consistency_score(&m));
    }
}
