//! Root parallel search: the four root branches run on the rayon pool and
//! everything below a branch is the ordinary sequential recursion.
use rayon::prelude::*;

use crate::types::{Move, N_MOVES};
use crate::world::WorldState;

use super::{into_branch_array, score_branch, BranchScore, SearchStats};

/// Scores every root move on the rayon pool. The results come back in
/// [`Move::all`] order no matter which branch finishes first, so the caller
/// breaks ties exactly as the sequential search does.
pub(super) fn score_root_branches(
    state: &WorldState,
    depth: u8,
) -> ([BranchScore; N_MOVES], SearchStats) {
    let scored: Vec<(BranchScore, SearchStats)> = Move::ALL
        .par_iter()
        .map(|mv| {
            let mut stats = SearchStats::default();
            let branch = score_branch(state, *mv, depth, &mut stats);
            (branch, stats)
        })
        .collect();

    let mut stats = SearchStats::default();
    for (_, branch_stats) in scored.iter() {
        stats.merge(branch_stats);
    }
    (
        into_branch_array(scored.into_iter().map(|(b, _)| b).collect()),
        stats,
    )
}
