//! Ranking module - move-count performance tiers
//!
//! Tiers are ordered best first with strictly increasing thresholds. The
//! last tier is open-ended, so every move count lands somewhere.

use crate::types::{Ranking, DAILY_15_RANKINGS};

/// Tier for `moves` against the sliding puzzle table
pub fn rank(moves: u32) -> &'static Ranking {
    rank_in(&DAILY_15_RANKINGS, moves)
}

/// First tier whose `max_moves` is at least `moves`, else the last tier
///
/// `tiers` must not be empty.
pub fn rank_in(tiers: &[Ranking], moves: u32) -> &Ranking {
    tiers
        .iter()
        .find(|tier| moves <= tier.max_moves)
        .unwrap_or(&tiers[tiers.len() - 1])
}

/// The next better tier above `current`, or None at the top
pub fn next_tier(current: &Ranking) -> Option<&'static Ranking> {
    let position = DAILY_15_RANKINGS.iter().position(|tier| tier.title == current.title)?;
    position.checked_sub(1).map(|better| &DAILY_15_RANKINGS[better])
}

/// Format a duration in milliseconds as `m:ss`
pub fn format_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
