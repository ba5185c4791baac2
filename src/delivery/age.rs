//! Pull request age helpers

use chrono::{DateTime, Utc};

/// Updated-at age beyond which an open PR counts as stale
pub const STALE_AFTER_HOURS: f64 = 72.0;

/// Created-at age beyond which an unreviewed PR needs a reviewer
pub const REVIEW_WAIT_HOURS: f64 = 24.0;

/// Hours elapsed between `ts` and `now`.
///
/// An unknown timestamp is treated as infinitely old, so triage surfaces
/// the PR instead of hiding it. Backlog bucketing handles unknown creation
/// times separately.
pub fn hours_since(ts: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match ts {
        Some(ts) => (now - ts).num_milliseconds() as f64 / 3_600_000.0,
        None => f64::INFINITY,
    }
}

/// Open PR with no movement for more than [`STALE_AFTER_HOURS`]
pub fn is_stale(updated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    hours_since(updated_at, now) > STALE_AFTER_HOURS
}
