//! Team-level efficiency aggregation

use crate::models::EfficiencyScore;
use crate::scoring::bands;
use crate::scoring::efficiency::{DeveloperEfficiency, Facet};
use serde::{Deserialize, Serialize};

/// The four lenses summarized at team level
const TEAM_FACETS: [Facet; 4] = [
    Facet::Velocity,
    Facet::Quality,
    Facet::Collaboration,
    Facet::Consistency,
];

/// Averaged team scores for the four headline lenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEfficiencySummary {
    pub developer_count: usize,
    pub velocity: EfficiencyScore,
    pub quality: EfficiencyScore,
    pub collaboration: EfficiencyScore,
    pub consistency: EfficiencyScore,
}

/// Result of team aggregation; an empty roster is reported explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TeamEfficiency {
    NoData,
    Summary(TeamEfficiencySummary),
}

impl TeamEfficiency {
    pub fn summary(&self) -> Option<&TeamEfficiencySummary> {
        match self {
            TeamEfficiency::NoData => None,
            TeamEfficiency::Summary(s) => Some(s),
        }
    }
}

fn team_score(developers: &[DeveloperEfficiency], facet: Facet) -> EfficiencyScore {
    let n = developers.len() as f64;
    let score = developers.iter().map(|d| d.facet(facet).score).sum::<f64>() / n;
    let percentile = developers.iter().map(|d| d.facet(facet).percentile).sum::<f64>() / n;

    let metric = facet.name();
    let band = bands::classify(bands::TEAM, score);

    EfficiencyScore::new(
        score,
        percentile,
        format!("Team {metric} is {}", band.interpretation),
        band.recommendation.replace("{metric}", metric),
    )
}

/// Average developers' headline sub-scores into a team summary
pub fn summarize_team(developers: &[DeveloperEfficiency]) -> TeamEfficiency {
    if developers.is_empty() {
        return TeamEfficiency::NoData;
    }
    let [velocity, quality, collaboration, consistency] =
        TEAM_FACETS.map(|facet| team_score(developers, facet));
    TeamEfficiency::Summary(TeamEfficiencySummary {
        developer_count: developers.len(),
        velocity,
        quality,
        collaboration,
        consistency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn efficiency(author: &str, velocity: f64, quality: f64) -> DeveloperEfficiency {
        let s = |score: f64| EfficiencyScore::new(score, score, "", "");
        DeveloperEfficiency {
            author: author.into(),
            repository_owner: "acme".into(),
            repository_name: "api".into(),
            velocity: s(velocity),
            quality: s(quality),
            collaboration: s(70.0),
            consistency: s(30.0),
            throughput: s(50.0),
            merge_speed: s(50.0),
            review_responsiveness: s(50.0),
            pr_size_discipline: s(50.0),
            merge_success: s(50.0),
            overall_score: 50,
        }
    }

    #[test]
    fn test_empty_roster_is_no_data() {
        assert_eq!(summarize_team(&[]), TeamEfficiency::NoData);
        assert!(summarize_team(&[]).summary().is_none());
    }

    #[test]
    fn test_team_means_and_wording() {
        let team = summarize_team(&[efficiency("a", 90.0, 50.0), efficiency("b", 80.0, 40.0)]);
        let summary = team.summary().expect("summary");
        assert_eq!(summary.developer_count, 2);
        assert_eq!(summary.velocity.score, 85.0);
        assert_eq!(summary.velocity.percentile, 85.0);
        assert_eq!(summary.velocity.interpretation, "Team velocity is excellent");
        assert_eq!(summary.quality.score, 45.0);
        assert_eq!(summary.quality.interpretation, "Team quality is trending the wrong way");
        assert_eq!(summary.collaboration.interpretation, "Team collaboration is solid");
        assert_eq!(summary.consistency.interpretation, "Team consistency is at risk");
        assert_eq!(
            summary.consistency.recommendation,
            "Make consistency a team priority this cycle"
        );
    }

    #[test]
    fn test_team_band_boundaries() {
        let at = |v: f64| summarize_team(&[efficiency("a", v, v)]);
        let wording = |v: f64| at(v).summary().map(|s| s.velocity.interpretation.clone());
        assert_eq!(wording(80.0).as_deref(), Some("Team velocity is excellent"));
        assert_eq!(wording(79.9).as_deref(), Some("Team velocity is solid"));
        assert_eq!(wording(40.0).as_deref(), Some("Team velocity is trending the wrong way"));
        assert_eq!(wording(0.0).as_deref(), Some("Team velocity is at risk"));
    }

    #[test]
    fn test_no_data_serializes_with_status_tag() {
        let json = serde_json::to_value(TeamEfficiency::NoData).expect("serialize");
        assert_eq!(json["status"], "no_data");
    }
}
