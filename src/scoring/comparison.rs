//! Repository vs benchmark comparison insights
//!
//! Four fixed metrics, always emitted in the same order. Each compares the
//! focal repository's raw value with the benchmark population's median and
//! top-decile value, and phrases the gap as a percentage.

use crate::models::{RepositoryMetrics, RepositoryRef};
use crate::scoring::percentile::{median, percentile_rank, percentile_value, Polarity};
use serde::{Deserialize, Serialize};

/// One benchmark comparison row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonInsight {
    pub metric: String,
    pub your_value: f64,
    pub industry_median: f64,
    pub industry_top10: f64,
    pub percentile: f64,
    pub interpretation: String,
}

/// Metrics compared against the benchmark population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMetric {
    MergeTime,
    PrSize,
    MergeRate,
    ReviewsPerPr,
}

impl ComparisonMetric {
    pub fn all() -> [ComparisonMetric; 4] {
        [
            ComparisonMetric::MergeTime,
            ComparisonMetric::PrSize,
            ComparisonMetric::MergeRate,
            ComparisonMetric::ReviewsPerPr,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComparisonMetric::MergeTime => "Average Time to Merge",
            ComparisonMetric::PrSize => "Average PR Size",
            ComparisonMetric::MergeRate => "Merge Rate",
            ComparisonMetric::ReviewsPerPr => "Reviews per PR",
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            ComparisonMetric::MergeTime | ComparisonMetric::PrSize => Polarity::LowerIsBetter,
            ComparisonMetric::MergeRate | ComparisonMetric::ReviewsPerPr => {
                Polarity::HigherIsBetter
            }
        }
    }

    /// Percentile holding the "top performer" value
    pub(crate) fn top_percentile(&self) -> f64 {
        match self.polarity() {
            Polarity::LowerIsBetter => 10.0,
            Polarity::HigherIsBetter => 90.0,
        }
    }

    /// Raw metric, 0 when missing
    pub fn value(&self, repo: &RepositoryMetrics) -> f64 {
        let raw = match self {
            ComparisonMetric::MergeTime => repo.avg_merge_hours,
            ComparisonMetric::PrSize => repo.avg_pr_size,
            ComparisonMetric::MergeRate => repo.merge_rate_percent,
            ComparisonMetric::ReviewsPerPr => repo.avg_reviews_per_pr,
        };
        raw.unwrap_or(0.0)
    }

    /// Benchmark values for this metric.
    ///
    /// Lower-is-better metrics drop zeros; a zero merge time or PR size
    /// means no data.
    pub(crate) fn population(&self, benchmarks: &[RepositoryMetrics]) -> Vec<f64> {
        let values = benchmarks.iter().map(|b| self.value(b));
        match self.polarity() {
            Polarity::LowerIsBetter => values.filter(|v| *v > 0.0).collect(),
            Polarity::HigherIsBetter => values.collect(),
        }
    }

    /// Phrase the ratio of your value to the median
    fn interpret(&self, your_value: f64, median: f64) -> String {
        if median <= 0.0 {
            return format!("No benchmark data yet for {}", self.label().to_lowercase());
        }
        let ratio = your_value / median;
        let below = ((1.0 - ratio) * 100.0).round();
        let above = ((ratio - 1.0) * 100.0).round();
        match self {
            ComparisonMetric::MergeTime => {
                if ratio <= 0.7 {
                    format!("Excellent! {below}% faster than industry median")
                } else if ratio <= 1.0 {
                    format!("Good - {below}% faster than industry median")
                } else if ratio <= 1.5 {
                    format!("{above}% slower than median - room for improvement")
                } else {
                    format!("{above}% slower than median - significant opportunity to improve")
                }
            }
            ComparisonMetric::PrSize => {
                if ratio <= 0.7 {
                    format!("Excellent - PRs {below}% smaller and more focused than typical")
                } else if ratio <= 1.0 {
                    format!("Good - PRs {below}% smaller than industry median")
                } else if ratio <= 1.5 {
                    format!("PRs {above}% larger than median - consider breaking down")
                } else {
                    format!("PRs {above}% larger than median - strongly recommend smaller chunks")
                }
            }
            ComparisonMetric::MergeRate => {
                if ratio <= 0.7 {
                    format!("Low merge rate - {below}% below median, improve PR quality and scoping")
                } else if ratio <= 1.0 {
                    format!("Moderate merge rate - {below}% below median, some PRs may need better scoping")
                } else if ratio <= 1.5 {
                    format!("Good merge rate - {above}% above industry median")
                } else {
                    format!("Excellent merge rate - {above}% above median, most PRs land successfully")
                }
            }
            ComparisonMetric::ReviewsPerPr => {
                if ratio <= 0.7 {
                    format!("Low engagement - {below}% fewer reviews than median, establish stronger review practices")
                } else if ratio <= 1.0 {
                    format!("Moderate engagement - {below}% fewer reviews than median")
                } else if ratio <= 1.5 {
                    format!("Good review engagement - {above}% more reviews than median")
                } else {
                    format!("Strong review culture - {above}% more reviews than median")
                }
            }
        }
    }

    fn insight(
        &self,
        focal: &RepositoryMetrics,
        benchmarks: &[RepositoryMetrics],
    ) -> ComparisonInsight {
        let population = self.population(benchmarks);
        let your_value = self.value(focal);
        let industry_median = median(&population);
        ComparisonInsight {
            metric: self.label().to_string(),
            your_value,
            industry_median,
            industry_top10: percentile_value(&population, self.top_percentile()),
            percentile: percentile_rank(your_value, &population, self.polarity()),
            interpretation: self.interpret(your_value, industry_median),
        }
    }
}

/// Compare one repository against a benchmark population
pub fn generate_comparison_insights(
    focal: &RepositoryMetrics,
    benchmarks: &[RepositoryMetrics],
) -> [ComparisonInsight; 4] {
    ComparisonMetric::all().map(|metric| metric.insight(focal, benchmarks))
}

/// Every known repository except the focal one
pub fn benchmarks_excluding(
    all: &[RepositoryMetrics],
    focal: &RepositoryRef,
) -> Vec<RepositoryMetrics> {
    all.iter()
        .filter(|r| r.repository_owner != focal.owner || r.repository_name != focal.name)
        .cloned()
        .collect()
}
