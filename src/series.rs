//! Chart series derived from pull requests and repository metrics

use crate::models::{PullRequest, RepositoryMetrics};
use serde::{Deserialize, Serialize};

/// One point on a PR scatter chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub author: String,
    pub pr_number: u64,
    pub title: String,
}

impl ScatterPoint {
    fn for_pr(pr: &PullRequest, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            author: pr.author.clone(),
            pr_number: pr.pr_number,
            title: pr.title.clone(),
        }
    }
}

/// A zero duration is treated as unmeasured
fn measured(hours: Option<f64>) -> Option<f64> {
    hours.filter(|h| *h > 0.0)
}

/// Size (additions + deletions) against hours to merge, merged PRs only
pub fn size_vs_merge_time(prs: &[PullRequest]) -> Vec<ScatterPoint> {
    prs.iter()
        .filter(|pr| pr.is_merged)
        .filter_map(|pr| {
            let hours = measured(pr.time_to_merge_hours)?;
            let (additions, deletions) = (pr.additions?, pr.deletions?);
            let size = f64::from(additions) + f64::from(deletions);
            Some(ScatterPoint::for_pr(pr, size, hours))
        })
        .collect()
}

/// Additions against deletions for PRs where both are known
pub fn additions_vs_deletions(prs: &[PullRequest]) -> Vec<ScatterPoint> {
    prs.iter()
        .filter_map(|pr| {
            let (additions, deletions) = (pr.additions?, pr.deletions?);
            Some(ScatterPoint::for_pr(pr, f64::from(additions), f64::from(deletions)))
        })
        .collect()
}

/// Hours to first review against hours to merge, merged PRs only
pub fn first_review_vs_merge_time(prs: &[PullRequest]) -> Vec<ScatterPoint> {
    prs.iter()
        .filter(|pr| pr.is_merged)
        .filter_map(|pr| {
            let review = measured(pr.time_to_first_review_hours)?;
            let merge = measured(pr.time_to_merge_hours)?;
            Some(ScatterPoint::for_pr(pr, review, merge))
        })
        .collect()
}

/// One bar of the PR size distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeShare {
    pub category: String,
    pub count: u32,
}

/// Small, medium and large PR counts for a repository
pub fn size_distribution(metrics: &RepositoryMetrics) -> [SizeShare; 3] {
    [
        ("Small (≤200)", metrics.small_prs),
        ("Medium (201-1000)", metrics.medium_prs),
        ("Large (>1000)", metrics.large_prs),
    ]
    .map(|(category, count)| SizeShare {
        category: category.to_string(),
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(
        n: u64,
        additions: Option<u32>,
        deletions: Option<u32>,
        merge_h: Option<f64>,
    ) -> PullRequest {
        PullRequest {
            pr_number: n,
            author: "ada".into(),
            title: format!("PR {n}"),
            is_merged: true,
            additions,
            deletions,
            time_to_merge_hours: merge_h,
            ..Default::default()
        }
    }

    #[test]
    fn test_size_vs_merge_time() {
        let prs = vec![
            merged(1, Some(100), Some(20), Some(5.0)),
            merged(2, None, Some(20), Some(5.0)),
            merged(3, Some(10), Some(0), Some(0.0)),
            PullRequest {
                is_merged: false,
                ..merged(4, Some(1), Some(1), Some(1.0))
            },
        ];
        let points = size_vs_merge_time(&prs);
        assert_eq!(points.len(), 1);
        assert_eq!((points[0].x, points[0].y), (120.0, 5.0));
        assert_eq!(points[0].pr_number, 1);
        assert_eq!(points[0].title, "PR 1");
    }

    #[test]
    fn test_additions_vs_deletions_includes_open_prs() {
        let prs = vec![
            PullRequest {
                is_merged: false,
                ..merged(1, Some(3), Some(4), None)
            },
            merged(2, Some(3), None, None),
        ];
        let points = additions_vs_deletions(&prs);
        assert_eq!(points.len(), 1);
        assert_eq!((points[0].x, points[0].y), (3.0, 4.0));
    }

    #[test]
    fn test_first_review_vs_merge_time() {
        let prs = vec![
            PullRequest {
                time_to_first_review_hours: Some(2.0),
                ..merged(1, None, None, Some(10.0))
            },
            merged(2, None, None, Some(10.0)),
        ];
        let points = first_review_vs_merge_time(&prs);
        assert_eq!(points.len(), 1);
        assert_eq!((points[0].x, points[0].y), (2.0, 10.0));
    }

    #[test]
    fn test_size_distribution() {
        let metrics = RepositoryMetrics {
            small_prs: 7,
            medium_prs: 2,
            large_prs: 1,
            ..Default::default()
        };
        let dist = size_distribution(&metrics);
        assert_eq!(dist[0].category, "Small (≤200)");
        assert_eq!(dist.iter().map(|s| s.count).collect::<Vec<_>>(), vec![7, 2, 1]);
    }
}
