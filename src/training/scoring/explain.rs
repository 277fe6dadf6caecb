//! Ranking and aggregation over an evaluation's explanation list.
//!
//! These views are recomputable from any [`ScoreResult`](super::ScoreResult)
//! without re-running the engine, so panels and exports can slice the same
//! audit trail independently. Sign convention throughout: negative total
//! delta is a risk reduction, positive is a risk increase; nothing here
//! flips polarity.

use std::cmp::Ordering;

use super::engine::BASELINE_RULE_ID;
use super::score::ScoreDelta;
use super::Explanation;

/// Default length of the "top drivers" view.
pub const TOP_DRIVER_COUNT: usize = 3;
/// Default length of the full ranked list.
pub const RANKED_LIST_LEN: usize = 8;

/// How the ranked explanation list is ordered. All orders are stable: ties
/// keep the original evaluation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Largest absolute impact first, regardless of direction.
    #[default]
    LargestAbsoluteImpactFirst,
    /// Risk-increasing entries first (descending signed total).
    LargestIncreaseFirst,
    /// Risk-reducing entries first (ascending signed total).
    LargestReductionFirst,
}

/// Net effect per subscore across the whole explanation list, baseline
/// included.
pub fn subscore_totals(explanations: &[Explanation]) -> ScoreDelta {
    let mut totals = ScoreDelta::new();
    for entry in explanations {
        for (key, value) in entry.delta.iter() {
            totals.add(*key, *value);
        }
    }
    totals
}

/// Rank explanations by the requested order, dropping the baseline anchor
/// and any entry whose total delta is exactly zero, then truncate to
/// `limit`.
pub fn ranked(
    explanations: &[Explanation],
    order: SortOrder,
    limit: usize,
) -> Vec<&Explanation> {
    let mut entries: Vec<&Explanation> = explanations
        .iter()
        .filter(|entry| entry.rule_id != BASELINE_RULE_ID && entry.total_delta() != 0.0)
        .collect();

    // Vec::sort_by is stable, which keeps tied entries in evaluation order.
    match order {
        SortOrder::LargestAbsoluteImpactFirst => entries.sort_by(|a, b| {
            compare(b.total_delta().abs(), a.total_delta().abs())
        }),
        SortOrder::LargestIncreaseFirst => {
            entries.sort_by(|a, b| compare(b.total_delta(), a.total_delta()))
        }
        SortOrder::LargestReductionFirst => {
            entries.sort_by(|a, b| compare(a.total_delta(), b.total_delta()))
        }
    }

    entries.truncate(limit);
    entries
}

/// The strongest contributors by absolute impact.
pub fn top_drivers(explanations: &[Explanation], count: usize) -> Vec<&Explanation> {
    ranked(explanations, SortOrder::LargestAbsoluteImpactFirst, count)
}

fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
