#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Two player minimax move selection for [battlesnake](https://docs.battlesnake.com/).
//!
//! A move request is deserialized into the wire types, validated once into a
//! [`world::WorldState`] holding you and a single enemy, and then handed to
//! the search which walks every combination of moves for a fixed number of
//! plies, alternating you (maximizing) and the enemy (minimizing).
//!
//! ```
//! # use battlesnake_minimax::search::{choose_move, SearchConfig};
//! # use battlesnake_minimax::types::NoopInstruments;
//! # use battlesnake_minimax::wire_representation::Position;
//! # use battlesnake_minimax::world::{Actor, Board, WorldState};
//! let p = Position::new;
//! let board = Board::new(11, 11).unwrap().with_food(vec![p(5, 7)]);
//! let you = Actor::new("you", 50, vec![p(5, 5), p(5, 4), p(5, 3)]).unwrap();
//! let enemy = Actor::new("enemy", 90, vec![p(0, 10), p(0, 9), p(0, 8)]).unwrap();
//! let state = WorldState::new(board, you, enemy, 17);
//!
//! let result = choose_move(&state, &SearchConfig::new(1).unwrap(), &NoopInstruments).unwrap();
//! assert_eq!(result.chosen.to_string(), "up");
//! ```
//!
//! Every explored branch owns its own clone of the world, so the cost of a
//! search grows as `4^depth` clones. Depths of 3 to 5 are the practical
//! range inside a move timeout. For a lower latency at the same depth,
//! set [`search::SearchConfig::parallel_root`] to spread the four root
//! branches over a rayon pool; the answer is identical either way.

use wire_representation::Game;

pub mod error;
pub mod search;
pub mod types;
pub mod wire_representation;
pub mod world;

/// Loads a fixture from a given string
pub fn game_fixture(game_fixture: &str) -> Game {
    let g: Result<Game, _> = serde_json::from_str(game_fixture);
    g.expect("the json literal is valid")
}
