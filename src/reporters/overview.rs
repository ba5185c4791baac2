//! Executive overview: the projection handed to a summarizer and the
//! deterministic fallback used when no summary comes back.
//!
//! Field names follow the summarizer's camelCase contract.

use crate::config::OverviewConfig;
use crate::delivery::{ActionGroup, HealthSummary};
use crate::models::RepositoryRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Action groups forwarded to the summarizer
pub const MAX_QUEUE_GROUPS: usize = 4;

/// Sample PRs forwarded per action group
pub const MAX_SAMPLE_PRS: usize = 2;

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePr {
    pub title: String,
    pub author: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewQueueItem {
    pub title: String,
    pub description: String,
    pub pr_count: usize,
    #[serde(rename = "samplePRs")]
    pub sample_prs: Vec<SamplePr>,
}

/// What the summarizer sees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewRequest {
    pub repository: RepositoryRef,
    pub wins: Vec<String>,
    pub focus_areas: Vec<String>,
    pub action_queue: Vec<OverviewQueueItem>,
}

impl OverviewRequest {
    pub fn new(
        repository: RepositoryRef,
        health: &HealthSummary,
        groups: &[ActionGroup<'_>],
    ) -> Self {
        let action_queue = groups
            .iter()
            .take(MAX_QUEUE_GROUPS)
            .map(|group| OverviewQueueItem {
                title: group.title.to_string(),
                description: group.description.to_string(),
                pr_count: group.prs.len(),
                sample_prs: group
                    .prs
                    .iter()
                    .take(MAX_SAMPLE_PRS)
                    .map(|pr| SamplePr {
                        title: pr.title.clone(),
                        author: (!pr.author.is_empty()).then(|| pr.author.clone()),
                        updated_at: pr.updated_at,
                    })
                    .collect(),
            })
            .collect();

        Self {
            repository,
            wins: health.wins.clone(),
            focus_areas: health.focus_areas.clone(),
            action_queue,
        }
    }

    /// Nothing worth sending to a summarizer
    pub fn is_empty(&self) -> bool {
        self.wins.is_empty() && self.focus_areas.is_empty() && self.action_queue.is_empty()
    }
}

/// Two short bullet lists for the dashboard header
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub working: Vec<String>,
    pub to_work_on: Vec<String>,
}

/// Raw summarizer output; either list may be missing
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct OverviewDraft {
    #[serde(default)]
    pub working: Option<Vec<String>>,
    #[serde(default)]
    pub to_work_on: Option<Vec<String>>,
}

fn truncate(item: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if item.chars().count() <= max_len {
        return item.to_string();
    }
    let mut cut: String = item.chars().take(max_len.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Drop blank items, keep the first `max_items`, trim and truncate each
pub fn sanitize_items<S: AsRef<str>>(items: &[S], config: &OverviewConfig) -> Vec<String> {
    items
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty())
        .take(config.max_items)
        .map(|item| truncate(item, config.max_item_length))
        .collect()
}

/// Overview built from wins and focus areas alone
///
/// When there are fewer focus areas than `max_items`, action groups top up
/// the list as "title: description".
pub fn fallback_overview(request: &OverviewRequest, config: &OverviewConfig) -> Overview {
    let mut to_work_on: Vec<String> = request
        .focus_areas
        .iter()
        .filter(|f| !f.trim().is_empty())
        .take(config.max_items)
        .cloned()
        .collect();
    for group in &request.action_queue {
        if to_work_on.len() >= config.max_items {
            break;
        }
        to_work_on.push(format!("{}: {}", group.title, group.description));
    }

    Overview {
        working: sanitize_items(&request.wins, config),
        to_work_on: sanitize_items(&to_work_on, config),
    }
}

/// Final overview from an optional summarizer draft
///
/// A missing draft, or a missing list within it, falls back to the
/// deterministic version of that list. Summarizer text is sanitized the
/// same way as the fallback.
pub fn resolve_overview(
    draft: Option<OverviewDraft>,
    request: &OverviewRequest,
    config: &OverviewConfig,
) -> Overview {
    let fallback = fallback_overview(request, config);
    let Some(draft) = draft else {
        debug!("No summarizer draft for {}, using fallback", request.repository);
        return fallback;
    };
    Overview {
        working: draft
            .working
            .map_or(fallback.working, |items| sanitize_items(&items, config)),
        to_work_on: draft
            .to_work_on
            .map_or(fallback.to_work_on, |items| sanitize_items(&items, config)),
    }
}
