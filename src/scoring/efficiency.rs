//! Developer efficiency composer
//!
//! Runs all nine sub-score calculators for a developer and folds them into
//! one weighted overall score. Sub-scores are kept unrounded until the
//! final sum.

use crate::models::{DeveloperMetrics, EfficiencyScore, RepositoryMetrics};
use crate::scoring::developer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The nine scored facets of a developer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Velocity,
    Quality,
    Collaboration,
    Consistency,
    Throughput,
    MergeSpeed,
    ReviewResponsiveness,
    PrSizeDiscipline,
    MergeSuccess,
}

impl Facet {
    pub fn all() -> &'static [Facet] {
        &[
            Facet::Velocity,
            Facet::Quality,
            Facet::Collaboration,
            Facet::Consistency,
            Facet::Throughput,
            Facet::MergeSpeed,
            Facet::ReviewResponsiveness,
            Facet::PrSizeDiscipline,
            Facet::MergeSuccess,
        ]
    }

    /// Weight in the overall score; the nine weights sum to 1.00
    pub fn weight(&self) -> f64 {
        match self {
            Facet::Velocity => 0.20,
            Facet::Quality => 0.20,
            Facet::Collaboration => 0.14,
            Facet::Consistency => 0.10,
            Facet::Throughput => 0.14,
            Facet::MergeSpeed => 0.08,
            Facet::ReviewResponsiveness => 0.07,
            Facet::PrSizeDiscipline => 0.04,
            Facet::MergeSuccess => 0.03,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Facet::Velocity => "velocity",
            Facet::Quality => "quality",
            Facet::Collaboration => "collaboration",
            Facet::Consistency => "consistency",
            Facet::Throughput => "throughput",
            Facet::MergeSpeed => "merge_speed",
            Facet::ReviewResponsiveness => "review_responsiveness",
            Facet::PrSizeDiscipline => "pr_size_discipline",
            Facet::MergeSuccess => "merge_success",
        }
    }
}

/// Full efficiency breakdown for one developer in one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperEfficiency {
    pub author: String,
    pub repository_owner: String,
    pub repository_name: String,
    pub velocity: EfficiencyScore,
    pub quality: EfficiencyScore,
    pub collaboration: EfficiencyScore,
    pub consistency: EfficiencyScore,
    pub throughput: EfficiencyScore,
    pub merge_speed: EfficiencyScore,
    pub review_responsiveness: EfficiencyScore,
    pub pr_size_discipline: EfficiencyScore,
    pub merge_success: EfficiencyScore,
    /// Weighted sum of the nine facet scores, rounded half away from zero
    pub overall_score: u32,
}

impl DeveloperEfficiency {
    pub fn facet(&self, facet: Facet) -> &EfficiencyScore {
        match facet {
            Facet::Velocity => &self.velocity,
            Facet::Quality => &self.quality,
            Facet::Collaboration => &self.collaboration,
            Facet::Consistency => &self.consistency,
            Facet::Throughput => &self.throughput,
            Facet::MergeSpeed => &self.merge_speed,
            Facet::ReviewResponsiveness => &self.review_responsiveness,
            Facet::PrSizeDiscipline => &self.pr_size_discipline,
            Facet::MergeSuccess => &self.merge_success,
        }
    }

    /// Unrounded weighted sum of the facet scores
    pub fn weighted_sum(&self) -> f64 {
        Facet::all()
            .iter()
            .map(|f| f.weight() * self.facet(*f).score)
            .sum()
    }
}

/// Score one developer against the benchmark repositories
pub fn developer_efficiency(
    metrics: &DeveloperMetrics,
    benchmarks: &[RepositoryMetrics],
) -> DeveloperEfficiency {
    let mut efficiency = DeveloperEfficiency {
        author: metrics.author.clone(),
        repository_owner: metrics.repository_owner.clone(),
        repository_name: metrics.repository_name.clone(),
        velocity: developer::velocity_score(metrics, benchmarks),
        quality: developer::quality_score(metrics, benchmarks),
        collaboration: developer::collaboration_score(metrics),
        consistency: developer::consistency_score(metrics),
        throughput: developer::throughput_score(metrics),
        merge_speed: developer::merge_speed_score(metrics),
        review_responsiveness: developer::review_responsiveness_score(metrics),
        pr_size_discipline: developer::pr_size_discipline_score(metrics),
        merge_success: developer::merge_success_score(metrics),
        overall_score: 0,
    };
    let overall = efficiency.weighted_sum();
    efficiency.overall_score = overall.round().clamp(0.0, 100.0) as u32;

    debug!(
        "{} in {}/{}: overall={} (velocity={:.1}, quality={:.1}, collaboration={:.1}, consistency={:.1})",
        efficiency.author,
        efficiency.repository_owner,
        efficiency.repository_name,
        efficiency.overall_score,
        efficiency.velocity.score,
        efficiency.quality.score,
        efficiency.collaboration.score,
        efficiency.consistency.score
    );

    efficiency
}

/// Score many developers in parallel; output order matches input order
pub fn score_developers(
    developers: &[DeveloperMetrics],
    benchmarks: &[RepositoryMetrics],
) -> Vec<DeveloperEfficiency> {
    let scored: Vec<DeveloperEfficiency> = developers
        .par_iter()
        .map(|m| developer_efficiency(m, benchmarks))
        .collect();
    info!(
        "Scored {} developers against {} benchmark repositories",
        scored.len(),
        benchmarks.len()
    );
    scored
}

fn by_score_then_author(a: &DeveloperEfficiency, b: &DeveloperEfficiency) -> std::cmp::Ordering {
    b.overall_score
        .cmp(&a.overall_score)
        .then_with(|| a.author.cmp(&b.author))
}

/// Highest `n` overall scores, ties broken by author
pub fn top_developers(scored: &[DeveloperEfficiency], n: usize) -> Vec<&DeveloperEfficiency> {
    let mut ranked: Vec<&DeveloperEfficiency> = scored.iter().collect();
    ranked.sort_by(|a, b| by_score_then_author(a, b));
    ranked.truncate(n);
    ranked
}

/// Lowest `n` overall scores, lowest first, ties broken by author
pub fn needs_attention(scored: &[DeveloperEfficiency], n: usize) -> Vec<&DeveloperEfficiency> {
    let mut ranked: Vec<&DeveloperEfficiency> = scored.iter().collect();
    ranked.sort_by(|a, b| {
        a.overall_score
            .cmp(&b.overall_score)
            .then_with(|| a.author.cmp(&b.author))
    });
    ranked.truncate(n);
    ranked
}
