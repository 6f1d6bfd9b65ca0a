//! Depth bounded minimax move selection.
//!
//! [`minimax`] is the bare recursion. [`choose_move`] is what a move handler
//! should call. It rejects a zero depth and scores the four root branches,
//! optionally in parallel, breaking ties the same way the recursion does.
//! Each search is reported through `tracing` and a [`SearchInstruments`].
use std::time::Instant;

use itertools::Itertools;
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::SearchError;
use crate::types::{Move, Role, SearchInstruments, N_MOVES};
use crate::world::{Score, WorldState};

mod minimax;
mod parallel;

pub use minimax::minimax;

/// default number of plies to search, counting both snakes' moves
pub const DEFAULT_DEPTH: u8 = 3;

/// Knobs for a top level search, usually loaded once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// plies to look ahead, must be at least 1
    pub depth: u8,
    /// score the four root branches on the rayon pool
    pub parallel_root: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            parallel_root: false,
        }
    }
}

impl SearchConfig {
    /// a sequential config with the given depth
    pub fn new(depth: u8) -> Result<Self, SearchError> {
        let config = SearchConfig {
            depth,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// the same config with the root branches searched in parallel
    pub fn parallel(self) -> Self {
        SearchConfig {
            parallel_root: true,
            ..self
        }
    }

    /// a search needs at least one ply to have a move to return
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.depth == 0 {
            return Err(SearchError::InvalidDepth(self.depth));
        }
        Ok(())
    }
}

/// Counters for a single search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// worlds visited, the root included
    pub nodes: u64,
    /// worlds that were already won or lost with plies still to go, the
    /// subtree below them is never searched
    pub cutoffs: u64,
}

impl SearchStats {
    fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
    }
}

/// The backed up score of one of the player's moves at the root
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchScore {
    #[allow(missing_docs)]
    pub mv: Move,
    #[allow(missing_docs)]
    pub score: Score,
}

/// What a top level search decided
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// the move to send back to the game server
    pub chosen: Move,
    /// the backed up score of `chosen`
    pub score: Score,
    /// every root move with its score, in [`Move::all`] order
    pub branches: [BranchScore; N_MOVES],
    #[allow(missing_docs)]
    pub stats: SearchStats,
}

/// Picks the player's move for `state`.
///
/// This is `minimax(state, config.depth, true)` with the root unrolled: the
/// root always branches, even if `state` itself would evaluate as lost (a
/// snapshot at the start of a game has a stacked body), so a move is always
/// returned. When every move loses, the first one in [`Move::all`] order is
/// returned.
#[instrument(level = "trace", skip_all, fields(depth = config.depth, parallel = config.parallel_root))]
pub fn choose_move<I: SearchInstruments>(
    state: &WorldState,
    config: &SearchConfig,
    instruments: &I,
) -> Result<SearchResult, SearchError> {
    config.validate()?;
    let start = Instant::now();

    let (branches, mut stats) = if config.parallel_root {
        parallel::score_root_branches(state, config.depth)
    } else {
        score_root_branches(state, config.depth)
    };
    // the root itself
    stats.nodes += 1;

    let mut best: Option<BranchScore> = None;
    for branch in branches.iter() {
        if minimax::improves(best.map(|b| b.score), branch.score, true) {
            best = Some(*branch);
        }
    }
    let best = best.unwrap_or(branches[0]);

    let duration = start.elapsed();
    instruments.observe_search(&stats, duration);

    let nodes = stats.nodes.to_formatted_string(&Locale::en);
    let cutoffs = stats.cutoffs.to_formatted_string(&Locale::en);
    let branch_scores = branches
        .iter()
        .map(|b| format!("{}={}", b.mv, b.score))
        .join(" ");
    debug!(
        chosen = %best.mv,
        score = %best.score,
        nodes = %nodes,
        cutoffs = %cutoffs,
        elapsed = ?duration,
        branches = %branch_scores,
        "chose move"
    );

    Ok(SearchResult {
        chosen: best.mv,
        score: best.score,
        branches,
        stats,
    })
}

/// shorthand for [`choose_move`] with a sequential search and no instruments
pub fn best_move(state: &WorldState, depth: u8) -> Result<Move, SearchError> {
    let config = SearchConfig::new(depth)?;
    choose_move(state, &config, &crate::types::NoopInstruments).map(|r| r.chosen)
}

fn score_root_branches(state: &WorldState, depth: u8) -> ([BranchScore; N_MOVES], SearchStats) {
    let mut stats = SearchStats::default();
    let scored = Move::all()
        .iter()
        .map(|mv| score_branch(state, *mv, depth, &mut stats))
        .collect_vec();
    (into_branch_array(scored), stats)
}

fn score_branch(state: &WorldState, mv: Move, depth: u8, stats: &mut SearchStats) -> BranchScore {
    let child = state.with_move(Role::Player, mv);
    let (score, _) = minimax::minimax_counted(&child, depth - 1, false, stats);
    BranchScore { mv, score }
}

fn into_branch_array(scored: Vec<BranchScore>) -> [BranchScore; N_MOVES] {
    let mut branches = [BranchScore {
        mv: Move::Up,
        score: Score::Loss,
    }; N_MOVES];
    for branch in scored {
        branches[branch.mv.as_index()] = branch;
    }
    branches
}
