//! Rank-based percentile estimation and scalar reducers

use crate::scoring::defaults::{EMPTY_REDUCTION, NEUTRAL_PERCENTILE};
use serde::{Deserialize, Serialize};

/// Which direction counts as "better" for a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Merge time, PR size: smaller values win
    LowerIsBetter,
    /// Merge rate, review engagement: larger values win
    HigherIsBetter,
}

impl Polarity {
    /// Whether `other` performs worse than `value` under this polarity
    fn is_worse(self, other: f64, value: f64) -> bool {
        match self {
            Polarity::LowerIsBetter => other > value,
            Polarity::HigherIsBetter => other < value,
        }
    }
}

/// Share of the population (0-100, rounded) that performs worse than `value`.
///
/// Ties are not counted as worse. An empty population has no opinion and
/// yields [`NEUTRAL_PERCENTILE`].
pub fn percentile_rank(value: f64, population: &[f64], polarity: Polarity) -> f64 {
    if population.is_empty() {
        return NEUTRAL_PERCENTILE;
    }
    let worse = population
        .iter()
        .filter(|&&other| polarity.is_worse(other, value))
        .count();
    (worse as f64 / population.len() as f64 * 100.0).round()
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Standard median; 0 for an empty slice
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return EMPTY_REDUCTION;
    }
    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Nearest-rank value at percentile `p` (index `floor(p/100 * n)`, clamped); 0 for an empty slice
pub fn percentile_value(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return EMPTY_REDUCTION;
    }
    let sorted = sorted(values);
    let idx = ((p / 100.0) * sorted.len() as f64).floor().max(0.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}
