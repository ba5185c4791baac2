//! Action queue: open PRs that need someone's attention
//!
//! Groups are independent filters over the open PRs, so one PR can show
//! up in several groups.

use crate::delivery::age::{hours_since, is_stale, REVIEW_WAIT_HOURS};
use crate::models::PullRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// PRs listed per group
pub const MAX_PRS_PER_GROUP: usize = 5;

/// Additions plus deletions above which a PR counts as high risk
pub const LARGE_PR_CHANGES: u64 = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionGroupKey {
    Stale,
    Review,
    Large,
}

impl ActionGroupKey {
    pub fn all() -> [ActionGroupKey; 3] {
        [ActionGroupKey::Stale, ActionGroupKey::Review, ActionGroupKey::Large]
    }

    pub fn title(&self) -> &'static str {
        match self {
            ActionGroupKey::Stale => "Stuck > 3 days",
            ActionGroupKey::Review => "Waiting for first review",
            ActionGroupKey::Large => "High-risk large PRs",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActionGroupKey::Stale => "These PRs haven't seen movement in 72h+.",
            ActionGroupKey::Review => "No review engagement yet. Rally reviewers.",
            ActionGroupKey::Large => "Break down or swarm review to reduce risk.",
        }
    }

    fn select<'a>(&self, open: &[&'a PullRequest], now: DateTime<Utc>) -> Vec<&'a PullRequest> {
        let mut picked: Vec<&PullRequest> = match self {
            ActionGroupKey::Stale => {
                let mut stale: Vec<&PullRequest> = open
                    .iter()
                    .copied()
                    .filter(|pr| is_stale(pr.updated_at, now))
                    .collect();
                // unknown update time sorts as the oldest
                stale.sort_by_key(|pr| pr.updated_at);
                stale
            }
            ActionGroupKey::Review => open
                .iter()
                .copied()
                .filter(|pr| {
                    pr.has_no_review_activity()
                        && hours_since(pr.created_at, now) > REVIEW_WAIT_HOURS
                })
                .collect(),
            ActionGroupKey::Large => {
                let mut large: Vec<&PullRequest> = open
                    .iter()
                    .copied()
                    .filter(|pr| pr.total_changes() > LARGE_PR_CHANGES)
                    .collect();
                large.sort_by(|a, b| b.total_changes().cmp(&a.total_changes()));
                large
            }
        };
        picked.truncate(MAX_PRS_PER_GROUP);
        picked
    }
}

/// A titled list of PRs borrowed from the caller's slice
#[derive(Debug, Clone, Serialize)]
pub struct ActionGroup<'a> {
    pub key: ActionGroupKey,
    pub title: &'static str,
    pub description: &'static str,
    pub prs: Vec<&'a PullRequest>,
}

/// Build the stale, review and large groups, skipping empty ones
pub fn build_action_groups(prs: &[PullRequest], now: DateTime<Utc>) -> Vec<ActionGroup<'_>> {
    let open: Vec<&PullRequest> = prs.iter().filter(|pr| pr.is_open()).collect();

    let groups: Vec<ActionGroup<'_>> = ActionGroupKey::all()
        .into_iter()
        .filter_map(|key| {
            let selected = key.select(&open, now);
            (!selected.is_empty()).then(|| ActionGroup {
                key,
                title: key.title(),
                description: key.description(),
                prs: selected,
            })
        })
        .collect();

    debug!(
        "Action queue: {} open PRs, {} groups",
        open.len(),
        groups.len()
    );
    groups
}
