//! Banded classification tables
//!
//! Each facet maps its score to text through an ordered table of
//! `(min_score_inclusive, interpretation, recommendation)` rows, evaluated
//! top-down. The last row of every table starts at 0 and catches the rest.

/// One row of a banding table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min_score: f64,
    pub interpretation: &'static str,
    pub recommendation: &'static str,
}

const fn band(min_score: f64, interpretation: &'static str, recommendation: &'static str) -> Band {
    Band {
        min_score,
        interpretation,
        recommendation,
    }
}

/// First row whose threshold the score meets (last row if none do)
pub fn classify(bands: &'static [Band], score: f64) -> &'static Band {
    bands
        .iter()
        .find(|b| score >= b.min_score)
        .unwrap_or(&bands[bands.len() - 1])
}

/// Look up a value in a `(min_score_inclusive, value)` step table
pub fn step(table: &[(f64, f64)], score: f64) -> f64 {
    table
        .iter()
        .find(|(min, _)| score >= *min)
        .or(table.last())
        .map_or(0.0, |(_, v)| *v)
}

/// Score to percentile for facets without a benchmark population
pub const STEP_PERCENTILES: &[(f64, f64)] = &[
    (90.0, 95.0),
    (75.0, 80.0),
    (60.0, 65.0),
    (40.0, 45.0),
    (20.0, 25.0),
    (0.0, 10.0),
];

/// Percentile by collaboration band
pub const COLLABORATION_PERCENTILES: &[(f64, f64)] =
    &[(80.0, 90.0), (60.0, 70.0), (40.0, 40.0), (0.0, 20.0)];

/// Percentile by consistency band
pub const CONSISTENCY_PERCENTILES: &[(f64, f64)] =
    &[(80.0, 85.0), (60.0, 65.0), (40.0, 35.0), (0.0, 15.0)];

pub const VELOCITY: &[Band] = &[
    band(
        80.0,
        "Excellent velocity - fast cycle times and high throughput",
        "Maintain current practices and share knowledge with team",
    ),
    band(
        60.0,
        "Good velocity with room for improvement",
        "Consider smaller PRs and more focused changes",
    ),
    band(
        40.0,
        "Moderate velocity - cycle times could be faster",
        "Break down work into smaller chunks, automate testing",
    ),
    band(
        0.0,
        "Low velocity - significant delays in PR cycle",
        "Focus on smaller PRs, pair programming, and removing blockers",
    ),
];

pub const QUALITY: &[Band] = &[
    band(
        80.0,
        "High quality work - well-scoped PRs with good review engagement",
        "Excellent practices - consider mentoring others",
    ),
    band(
        60.0,
        "Good quality with some large or under-reviewed PRs",
        "Aim for smaller, more focused changes",
    ),
    band(
        40.0,
        "Moderate quality - PRs may be too large or lack review",
        "Break work into smaller units, engage reviewers earlier",
    ),
    band(
        0.0,
        "Quality needs improvement - large PRs or low merge rate",
        "Focus on incremental changes, seek early feedback",
    ),
];

pub const COLLABORATION: &[Band] = &[
    band(
        80.0,
        "Highly collaborative - active in reviews and discussions",
        "Great teamwork - continue fostering collaboration",
    ),
    band(
        60.0,
        "Good collaboration with regular engagement",
        "Consider proactive code reviews for teammates",
    ),
    band(
        40.0,
        "Moderate collaboration - could engage more in reviews",
        "Increase participation in PR reviews and discussions",
    ),
    band(
        0.0,
        "Limited collaboration - minimal review engagement",
        "Actively review teammates' PRs and provide feedback",
    ),
];

pub const CONSISTENCY: &[Band] = &[
    band(80.0, "Consistent contribution pattern - steady delivery", "Maintain consistent cadence"),
    band(60.0, "Fairly consistent with some variation", "Aim for more regular PR submissions"),
    band(40.0, "Inconsistent contribution pattern", "Establish a more regular development rhythm"),
    band(
        0.0,
        "Very inconsistent - either too sparse or too intense",
        "Balance workload and break into manageable chunks",
    ),
];

pub const THROUGHPUT: &[Band] = &[
    band(
        85.0,
        "High throughput - shipping several PRs every week",
        "Keep batches small so the pace stays sustainable",
    ),
    band(
        60.0,
        "Solid throughput with a regular weekly cadence",
        "Split larger tasks to ship more often",
    ),
    band(
        40.0,
        "Moderate throughput - PRs land less than twice a week",
        "Look for work that can ship in smaller increments",
    ),
    band(
        0.0,
        "Low throughput - few PRs reach review each week",
        "Unblock in-progress work and open PRs earlier",
    ),
];

pub const MERGE_SPEED: &[Band] = &[
    band(
        80.0,
        "Fast merges - PRs land within hours",
        "Keep review queues short to preserve merge speed",
    ),
    band(
        60.0,
        "Reasonable merge times with occasional delays",
        "Follow up on PRs that sit approved but unmerged",
    ),
    band(
        40.0,
        "Slow merges - PRs often wait more than a day",
        "Agree on review turnaround targets with the team",
    ),
    band(0.0, "Very slow merges - PRs linger for days", "Escalate blocked PRs and reduce PR scope"),
];

pub const REVIEW_RESPONSIVENESS: &[Band] = &[
    band(80.0, "Reviews arrive quickly after PRs open", "Keep the review rotation healthy"),
    band(
        60.0,
        "First reviews usually land the same day",
        "Request specific reviewers to shorten the wait",
    ),
    band(40.0, "First reviews take most of a day", "Set a review SLA and surface waiting PRs"),
    band(
        0.0,
        "PRs wait a long time for a first review",
        "Ping reviewers early and pair on urgent changes",
    ),
];

pub const PR_SIZE_DISCIPLINE: &[Band] = &[
    band(
        80.0,
        "Disciplined PR sizing - most changes are small",
        "Keep slicing work into reviewable chunks",
    ),
    band(
        60.0,
        "Mostly small PRs with some larger ones",
        "Split the larger changes behind feature flags",
    ),
    band(
        40.0,
        "Mixed PR sizes - many changes are hard to review",
        "Plan work in smaller vertical slices",
    ),
    band(0.0, "Large PRs dominate", "Break changes down before opening a PR"),
];

pub const MERGE_SUCCESS: &[Band] = &[
    band(90.0, "Nearly every PR lands", "Keep scoping PRs this well"),
    band(75.0, "Most PRs land successfully", "Review abandoned PRs for common causes"),
    band(
        55.0,
        "A noticeable share of PRs is abandoned",
        "Validate approach with reviewers before building",
    ),
    band(0.0, "Many PRs never merge", "Discuss design up front and close stale experiments"),
];

/// Team-level wording: the interpretation is the state word and
/// `{metric}` in the recommendation is replaced with the facet name
pub const TEAM: &[Band] = &[
    band(80.0, "excellent", "Protect the habits that keep {metric} high"),
    band(60.0, "solid", "Look for small wins to lift {metric} further"),
    band(40.0, "trending the wrong way", "Review the blockers dragging {metric} down"),
    band(0.0, "at risk", "Make {metric} a team priority this cycle"),
];
