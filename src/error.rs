//! errors raised at the edges of the crate. Evaluation and move application
//! never fail, a lost position is a score, not an error.
use crate::wire_representation::Position;

/// A move request that can't be turned into a two snake world
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// the board has a zero width or height
    #[error("board must not be empty, got {width}x{height}")]
    EmptyBoard {
        #[allow(missing_docs)]
        width: u32,
        #[allow(missing_docs)]
        height: u32,
    },
    /// no snake other than `you` is on the board
    #[error("no snake other than {you} on the board")]
    NoEnemy {
        /// the id of `you`
        you: String,
    },
    /// a snake without any body segments
    #[error("snake {id} has no body")]
    EmptyBody {
        /// id of the offending snake
        id: String,
    },
    /// a snake whose head does not match the first body segment
    #[error("snake {id} head {head:?} does not match body[0] {body_head:?}")]
    HeadMismatch {
        /// id of the offending snake
        id: String,
        /// the reported head
        head: Position,
        /// the first body segment
        body_head: Position,
    },
    /// a snake whose reported length does not match its body
    #[error("snake {id} has length {length} but {segments} body segments")]
    LengthMismatch {
        /// id of the offending snake
        id: String,
        /// the reported length
        length: i32,
        /// the number of body segments
        segments: usize,
    },
    /// a snake whose health is outside `0..=100`
    #[error("snake {id} has health {health}, expected 0 to 100")]
    HealthOutOfRange {
        /// id of the offending snake
        id: String,
        #[allow(missing_docs)]
        health: i32,
    },
    /// a negative number where only non negative values make sense
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// which field carried the value
        field: &'static str,
        #[allow(missing_docs)]
        value: i64,
    },
}

/// A search that can't be started
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// a top level search needs at least one ply to pick a move from
    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(u8),
}
