//! various types that are useful for searching a two snake battlesnake game
use crate::search::SearchStats;
use crate::wire_representation::Position;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// x position
    pub x: i64,
    /// y position
    pub y: i64,
}

/// Number of moves available to a snake on every turn
pub const N_MOVES: usize = 4;

/// Represents a move. The declaration order is the canonical enumeration
/// order, and ties during search are always broken in favour of the earlier
/// move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Left => write!(f, "left"),
            Move::Right => write!(f, "right"),
            Move::Up => write!(f, "up"),
            Move::Down => write!(f, "down"),
        }
    }
}

impl Move {
    /// all moves, in the order every search iterates them
    pub const ALL: [Move; N_MOVES] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// convert this move to a vector
    pub fn to_vector(self) -> Vector {
        match self {
            Move::Left => Vector { x: -1, y: 0 },
            Move::Right => Vector { x: 1, y: 0 },
            Move::Up => Vector { x: 0, y: 1 },
            Move::Down => Vector { x: 0, y: -1 },
        }
    }

    /// create a Move from the given vector, None if the vector is not a unit step
    pub fn from_vector(vector: Vector) -> Option<Self> {
        match vector {
            Vector { x: -1, y: 0 } => Some(Self::Left),
            Vector { x: 1, y: 0 } => Some(Self::Right),
            Vector { x: 0, y: 1 } => Some(Self::Up),
            Vector { x: 0, y: -1 } => Some(Self::Down),
            _ => None,
        }
    }

    /// returns all possible moves
    pub fn all() -> [Move; N_MOVES] {
        Self::ALL
    }

    /// converts this move to a usize index. indices are the same order as the `Move::all()` method
    pub fn as_index(&self) -> usize {
        match self {
            Move::Up => 0,
            Move::Down => 1,
            Move::Left => 2,
            Move::Right => 3,
        }
    }
}

/// Which of the two snakes in a world an operation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// the snake we are choosing a move for, the maximizing side
    Player,
    /// the single opponent, the minimizing side
    Enemy,
}

impl Role {
    /// the other side of the game
    pub fn opponent(self) -> Role {
        match self {
            Role::Player => Role::Enemy,
            Role::Enemy => Role::Player,
        }
    }
}

/// Instruments to be used with search
pub trait SearchInstruments: std::fmt::Debug {
    /// called once per top level search with the counters for that search
    /// and the wall clock time it took
    fn observe_search(&self, stats: &SearchStats, duration: Duration);
}

/// Instruments that discard every observation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstruments;

impl SearchInstruments for NoopInstruments {
    fn observe_search(&self, _stats: &SearchStats, _duration: Duration) {}
}

/// A game for which the head of either snake can be got.
pub trait HeadGettableGame {
    /// get the head position for a given role
    fn get_head(&self, role: Role) -> Position;
}

/// A game for which the health of either snake can be got.
pub trait HealthGettableGame {
    /// get the health for a given role
    fn get_health(&self, role: Role) -> i32;
}

/// A game for which the length of either snake can be got.
pub trait LengthGettableGame {
    /// get the length for a given role
    fn get_length(&self, role: Role) -> u32;
}

/// A game where an entire snake body is gettable
pub trait SnakeBodyGettableGame {
    /// the positions for a given snake body, in order from head to tail
    fn get_snake_body(&self, role: Role) -> &VecDeque<Position>;
}

/// A game for which the food on the board can be queried
pub trait FoodGettableGame {
    /// every food position currently on the board, in no particular order
    fn get_all_food(&self) -> Vec<Position>;

    /// is there food at this position?
    fn is_food(&self, pos: &Position) -> bool;
}

/// A game where positions can be checked for hazards
pub trait HazardQueryableGame {
    /// Is this position a hazard?
    fn is_hazard(&self, pos: &Position) -> bool;
}

/// a game for which the size of the game board can be determined
pub trait SizeDeterminableGame {
    #[allow(missing_docs)]
    fn get_width(&self) -> u32;
    #[allow(missing_docs)]
    fn get_height(&self) -> u32;
}

/// a game for which the current turn is determinable
pub trait TurnDeterminableGame {
    #[allow(missing_docs)]
    fn turn(&self) -> u64;
}
