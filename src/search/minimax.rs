use crate::types::{Move, Role};
use crate::world::{Score, WorldState};

use super::SearchStats;

/// Plain two player minimax over `state`, no pruning.
///
/// The player maximizes and the enemy minimizes, alternating one ply at a
/// time. At every node all four moves are tried in [`Move::all`] order on a
/// fresh clone of the world, moves that kill a snake are not filtered out
/// and simply score as a [`Score::Loss`] one ply later.
///
/// Returns the backed up score and the move that achieves it. The move is
/// `None` only when no branching happened at this node: `depth` is zero or
/// `state` is already won or lost.
pub fn minimax(state: &WorldState, depth: u8, maximizing: bool) -> (Score, Option<Move>) {
    minimax_counted(state, depth, maximizing, &mut SearchStats::default())
}

pub(crate) fn minimax_counted(
    state: &WorldState,
    depth: u8,
    maximizing: bool,
    stats: &mut SearchStats,
) -> (Score, Option<Move>) {
    stats.nodes += 1;
    let score = state.evaluate();
    if depth == 0 {
        return (score, None);
    }
    if score.is_terminal() {
        stats.cutoffs += 1;
        return (score, None);
    }

    let role = if maximizing { Role::Player } else { Role::Enemy };
    let mut best: Option<(Score, Move)> = None;
    for mv in Move::all() {
        let child = state.with_move(role, mv);
        let (child_score, _) = minimax_counted(&child, depth - 1, !maximizing, stats);
        if improves(best.map(|(s, _)| s), child_score, maximizing) {
            best = Some((child_score, mv));
        }
    }

    match best {
        Some((score, mv)) => (score, Some(mv)),
        None => unreachable!("every node that branches sees four children"),
    }
}

/// Strict comparison, so on equal scores the move seen first is kept. The
/// first child always improves on nothing.
pub(crate) fn improves(best: Option<Score>, candidate: Score, maximizing: bool) -> bool {
    match best {
        None => true,
        Some(best) if maximizing => candidate > best,
        Some(best) => candidate < best,
    }
}
