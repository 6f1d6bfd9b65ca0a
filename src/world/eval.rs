//! Static evaluation of a world from the player's point of view
use std::fmt;

use crate::types::{
    HeadGettableGame, HealthGettableGame, LengthGettableGame, Role, SizeDeterminableGame,
    SnakeBodyGettableGame,
};

use super::{WorldState, MAX_HEALTH};

/// numerator of the hazard term, the penalty for standing on a hazard
pub const HAZARD_PENALTY: f64 = 100.0;

/// numerator of the aggression term, the reward for being next to a shorter enemy
pub const AGGRESSION_REWARD: f64 = 10.0;

/// The value of a world for the player.
///
/// Variants are declared in ascending order so the derived ordering gives
/// `Loss < Heuristic(_) < Win`, heuristics compare numerically.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Score {
    /// the player is dead
    Loss,
    /// a position that is still being played, higher is better for the player
    Heuristic(f64),
    /// the player has won a head to head
    Win,
}

impl Score {
    /// Loss and Win end the search along a branch
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Score::Heuristic(_))
    }

    /// the score as a float, with the terminal markers mapped to infinities
    pub fn as_f64(&self) -> f64 {
        match self {
            Score::Loss => f64::NEG_INFINITY,
            Score::Heuristic(v) => *v,
            Score::Win => f64::INFINITY,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Loss => write!(f, "loss"),
            Score::Heuristic(v) => write!(f, "{:.3}", v),
            Score::Win => write!(f, "win"),
        }
    }
}

impl WorldState {
    /// Scores this world for the player. Only meaningful once a move has
    /// been applied, the collision rules assume the head just arrived.
    pub fn evaluate(&self) -> Score {
        match self.terminal() {
            Some(score) => score,
            None => Score::Heuristic(self.heuristic()),
        }
    }

    /// `Some` when the player has certainly lost or won. Checks run from
    /// cheapest to most expensive and the first one that matches decides.
    ///
    /// Running out of health is not checked here.
    pub fn terminal(&self) -> Option<Score> {
        let head = self.get_head(Role::Player);
        if !self.board().contains(&head) {
            return Some(Score::Loss);
        }

        // body[0] is the head itself
        if self.get_snake_body(Role::Player).iter().skip(1).any(|p| *p == head) {
            return Some(Score::Loss);
        }
        if self.get_snake_body(Role::Enemy).iter().skip(1).any(|p| *p == head) {
            return Some(Score::Loss);
        }

        if head == self.get_head(Role::Enemy) {
            // a tie is as bad as a loss
            if self.get_length(Role::Player) <= self.get_length(Role::Enemy) {
                return Some(Score::Loss);
            }
            return Some(Score::Win);
        }

        None
    }

    /// Finite score for a position that is still being played:
    ///
    /// * food, scaled up as health drops: `(height + width) / nearest_food * (1 - health / 100)`
    /// * hazards: `-100 / (1 + nearest_hazard)`
    /// * aggression, only while longer than the enemy: `10 / (1 + distance_to_enemy_head)`
    ///
    /// All distances are manhattan distances from the player's head, a
    /// missing food or hazard contributes nothing.
    pub fn heuristic(&self) -> f64 {
        let head = self.get_head(Role::Player);
        let board = self.board();

        let health_scaling = 1.0 - f64::from(self.get_health(Role::Player)) / f64::from(MAX_HEALTH);
        let board_span = f64::from(self.get_width() + self.get_height());
        let food_term = board
            .food()
            .iter()
            .map(|f| head.manhattan(f))
            .min()
            // food under the head is eaten before evaluation, the clamp only
            // matters for a world no move was applied to
            .map_or(0.0, |d| board_span / f64::from(d.max(1)) * health_scaling);

        let hazard_term = board
            .hazards()
            .iter()
            .map(|h| head.manhattan(h))
            .min()
            .map_or(0.0, |d| -HAZARD_PENALTY / (1.0 + f64::from(d)));

        let aggression_term = if self.get_length(Role::Player) > self.get_length(Role::Enemy) {
            let d = head.manhattan(&self.get_head(Role::Enemy));
            AGGRESSION_REWARD / (1.0 + f64::from(d))
        } else {
            0.0
        };

        food_term + hazard_term + aggression_term
    }
}
