#![allow(missing_docs)]
//! types to match the battlesnake wire representation, and the single
//! validation step that turns a move request into a [`WorldState`]

use crate::error::SnapshotError;
use crate::types::Vector;
use crate::world::{Actor, Board as WorldBoard, WorldState};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Struct that matches the `battlesnake` object from the wire representation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BattleSnake {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub head: Position,
    pub body: VecDeque<Position>,
    pub health: i32,
    pub length: i32,
}

/// Struct that matches the `position` object from the wire representation
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn add_vec(&self, v: Vector) -> Position {
        Position {
            x: (self.x as i64 + v.x) as i32,
            y: (self.y as i64 + v.y) as i32,
        }
    }

    /// |dx| + |dy|
    pub fn manhattan(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub height: u32,
    pub width: u32,
    pub food: Vec<Position>,
    pub snakes: Vec<BattleSnake>,
    #[serde(default)]
    pub hazards: Vec<Position>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    #[serde(rename = "hazardDamagePerTurn", default)]
    pub hazard_damage_per_turn: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Ruleset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NestedGame {
    pub id: String,
    #[serde(default)]
    pub ruleset: Ruleset,
}

/// Root object from the battlesnake server in start, move, and end requests, you
/// probably want to do:
/// ```
/// # use battlesnake_minimax::wire_representation::Game;
/// # let body = br#"{"game":{"id":"g","ruleset":{"name":"standard","version":"v1","settings":{"hazardDamagePerTurn":14}}},"turn":3,"board":{"height":11,"width":11,"food":[{"x":5,"y":5}],"hazards":[],"snakes":[{"id":"a","name":"a","health":97,"length":3,"head":{"x":1,"y":3},"body":[{"x":1,"y":3},{"x":1,"y":2},{"x":1,"y":1}]},{"id":"b","name":"b","health":97,"length":3,"head":{"x":9,"y":3},"body":[{"x":9,"y":3},{"x":9,"y":2},{"x":9,"y":1}]}]},"you":{"id":"a","name":"a","health":97,"length":3,"head":{"x":1,"y":3},"body":[{"x":1,"y":3},{"x":1,"y":2},{"x":1,"y":1}]}}"#;
/// let g: Result<Game, _> = serde_json::from_slice(body);
/// # assert!(g.unwrap().as_world_state().is_ok());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub you: BattleSnake,
    pub board: Board,
    pub turn: i32,
    pub game: NestedGame,
}

impl Game {
    /// the first listed snake that isn't you. The listing order is not
    /// stable between requests, so this never relies on an index.
    pub fn enemy(&self) -> Option<&BattleSnake> {
        self.board.snakes.iter().find(|s| s.id != self.you.id)
    }

    /// validates this request and builds the world the search runs on
    pub fn as_world_state(&self) -> Result<WorldState, SnapshotError> {
        let enemy = self.enemy().ok_or_else(|| SnapshotError::NoEnemy {
            you: self.you.id.clone(),
        })?;
        let player = actor_from_wire(&self.you)?;
        let enemy = actor_from_wire(enemy)?;

        let hazard_damage = u32::try_from(self.game.ruleset.settings.hazard_damage_per_turn)
            .map_err(|_| SnapshotError::Negative {
                field: "hazardDamagePerTurn",
                value: self.game.ruleset.settings.hazard_damage_per_turn as i64,
            })?;
        let turn = u64::try_from(self.turn).map_err(|_| SnapshotError::Negative {
            field: "turn",
            value: self.turn as i64,
        })?;

        let board = WorldBoard::new(self.board.width, self.board.height)?
            .with_food(self.board.food.iter().copied())
            .with_hazards(self.board.hazards.iter().copied(), hazard_damage);

        Ok(WorldState::new(board, player, enemy, turn))
    }
}

fn actor_from_wire(snake: &BattleSnake) -> Result<Actor, SnapshotError> {
    let body_head = *snake.body.front().ok_or_else(|| SnapshotError::EmptyBody {
        id: snake.id.clone(),
    })?;
    if body_head != snake.head {
        return Err(SnapshotError::HeadMismatch {
            id: snake.id.clone(),
            head: snake.head,
            body_head,
        });
    }
    if usize::try_from(snake.length).ok() != Some(snake.body.len()) {
        return Err(SnapshotError::LengthMismatch {
            id: snake.id.clone(),
            length: snake.length,
            segments: snake.body.len(),
        });
    }
    Actor::new(snake.id.clone(), snake.health, snake.body.iter().copied())
}
