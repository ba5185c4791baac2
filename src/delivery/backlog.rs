//! Open-PR backlog age histogram

use crate::delivery::age::hours_since;
use crate::models::PullRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed open-PR age ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklogBucket {
    UpToOneDay,
    OneToThreeDays,
    ThreeToSevenDays,
    OverSevenDays,
}

impl BacklogBucket {
    pub fn all() -> [BacklogBucket; 4] {
        [
            BacklogBucket::UpToOneDay,
            BacklogBucket::OneToThreeDays,
            BacklogBucket::ThreeToSevenDays,
            BacklogBucket::OverSevenDays,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            BacklogBucket::UpToOneDay => "≤24h",
            BacklogBucket::OneToThreeDays => "1-3d",
            BacklogBucket::ThreeToSevenDays => "3-7d",
            BacklogBucket::OverSevenDays => ">7d",
        }
    }

    /// Bucket for a creation time; unknown times count as brand new
    pub fn for_created_at(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        if created_at.is_none() {
            return BacklogBucket::UpToOneDay;
        }
        let hours = hours_since(created_at, now);
        if hours <= 24.0 {
            BacklogBucket::UpToOneDay
        } else if hours <= 72.0 {
            BacklogBucket::OneToThreeDays
        } else if hours <= 168.0 {
            BacklogBucket::ThreeToSevenDays
        } else {
            BacklogBucket::OverSevenDays
        }
    }

    fn index(&self) -> usize {
        match self {
            BacklogBucket::UpToOneDay => 0,
            BacklogBucket::OneToThreeDays => 1,
            BacklogBucket::ThreeToSevenDays => 2,
            BacklogBucket::OverSevenDays => 3,
        }
    }
}

/// One histogram bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogCount {
    pub bucket: BacklogBucket,
    pub label: String,
    pub count: usize,
}

/// Count PRs per age bucket, youngest first
pub fn backlog_histogram<'a>(
    open_prs: impl IntoIterator<Item = &'a PullRequest>,
    now: DateTime<Utc>,
) -> [BacklogCount; 4] {
    let mut counts = [0usize; 4];
    for pr in open_prs {
        counts[BacklogBucket::for_created_at(pr.created_at, now).index()] += 1;
    }
    BacklogBucket::all().map(|bucket| BacklogCount {
        bucket,
        label: bucket.label().to_string(),
        count: counts[bucket.index()],
    })
}
