//! Repository delivery health from raw pull requests
//!
//! Everything here takes `now` explicitly so results are reproducible.

mod action_queue;
pub mod age;
mod backlog;
mod health;

use crate::models::PullRequest;
use chrono::{DateTime, Utc};

pub use action_queue::{
    build_action_groups, ActionGroup, ActionGroupKey, LARGE_PR_CHANGES, MAX_PRS_PER_GROUP,
};
pub use age::{hours_since, is_stale};
pub use backlog::{backlog_histogram, BacklogBucket, BacklogCount};
pub use health::{
    compute_team_health, health_components, throughput_per_week, HealthComponents, HealthSummary,
};

/// Most recent `synced_at` across the PRs, if any has one
pub fn latest_sync(prs: &[PullRequest]) -> Option<DateTime<Utc>> {
    prs.iter().filter_map(|pr| pr.synced_at).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_latest_sync() {
        let at = |d: u32| Some(Utc.with_ymd_and_hms(2026, 10, d, 0, 0, 0).unwrap());
        let synced = |synced_at| PullRequest {
            synced_at,
            ..Default::default()
        };
        let prs = vec![synced(at(3)), synced(None), synced(at(9))];
        assert_eq!(latest_sync(&prs), at(9));
        assert_eq!(latest_sync(&prs[1..2]), None);
        assert_eq!(latest_sync(&[]), None);
    }
}
