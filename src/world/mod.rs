//! The two snake world the search runs on.
//!
//! A [`WorldState`] is built once per move request (see
//! [`crate::wire_representation::Game::as_world_state`]) and then cloned for
//! every branch the search explores. Every clone owns its own food set and
//! both bodies, so a move applied in one branch is never observed by a
//! sibling or a parent.
use crate::error::SnapshotError;
use crate::types::{
    FoodGettableGame, HazardQueryableGame, HeadGettableGame, HealthGettableGame,
    LengthGettableGame, Move, Role, SizeDeterminableGame, SnakeBodyGettableGame,
    TurnDeterminableGame,
};
use crate::wire_representation::Position;
use fxhash::FxHashSet;
use std::collections::VecDeque;
use std::fmt;

mod eval;

pub use eval::{Score, AGGRESSION_REWARD, HAZARD_PENALTY};

/// health a snake is reset to when it eats
pub const MAX_HEALTH: i32 = 100;

/// The static part of the world plus the food that gets eaten along the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    food: FxHashSet<Position>,
    hazards: FxHashSet<Position>,
    hazard_damage: u32,
}

impl Board {
    /// an empty board, both dimensions must be positive
    pub fn new(width: u32, height: u32) -> Result<Self, SnapshotError> {
        if width == 0 || height == 0 {
            return Err(SnapshotError::EmptyBoard { width, height });
        }
        Ok(Board {
            width,
            height,
            food: FxHashSet::default(),
            hazards: FxHashSet::default(),
            hazard_damage: 0,
        })
    }

    /// adds food, duplicate positions collapse in to one
    pub fn with_food(mut self, food: impl IntoIterator<Item = Position>) -> Self {
        self.food.extend(food);
        self
    }

    /// adds hazards and sets the damage they deal per turn. The damage is
    /// carried for callers but is not part of the evaluation.
    pub fn with_hazards(
        mut self,
        hazards: impl IntoIterator<Item = Position>,
        hazard_damage: u32,
    ) -> Self {
        self.hazards.extend(hazards);
        self.hazard_damage = hazard_damage;
        self
    }

    #[allow(missing_docs)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[allow(missing_docs)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[allow(missing_docs)]
    pub fn hazard_damage(&self) -> u32 {
        self.hazard_damage
    }

    #[allow(missing_docs)]
    pub fn food(&self) -> &FxHashSet<Position> {
        &self.food
    }

    #[allow(missing_docs)]
    pub fn hazards(&self) -> &FxHashSet<Position> {
        &self.hazards
    }

    /// is this position inside the board
    pub fn contains(&self, pos: &Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }
}

/// One snake. `head` is always `body[0]` and `length` is always the number
/// of body segments once a move has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    id: String,
    health: i32,
    length: u32,
    head: Position,
    body: VecDeque<Position>,
}

impl Actor {
    /// builds a snake from its body, head first. Health must be in
    /// `0..=MAX_HEALTH`.
    pub fn new(
        id: impl Into<String>,
        health: i32,
        body: impl IntoIterator<Item = Position>,
    ) -> Result<Self, SnapshotError> {
        let id = id.into();
        let body: VecDeque<Position> = body.into_iter().collect();
        let head = match body.front() {
            Some(head) => *head,
            None => return Err(SnapshotError::EmptyBody { id }),
        };
        if !(0..=MAX_HEALTH).contains(&health) {
            return Err(SnapshotError::HealthOutOfRange { id, health });
        }
        Ok(Actor {
            id,
            health,
            length: body.len() as u32,
            head,
            body,
        })
    }

    /// the identity token, only ever compared for equality
    pub fn id(&self) -> &str {
        &self.id
    }

    #[allow(missing_docs)]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[allow(missing_docs)]
    pub fn length(&self) -> u32 {
        self.length
    }

    #[allow(missing_docs)]
    pub fn head(&self) -> Position {
        self.head
    }

    /// body segments, head first
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    fn is_consistent(&self) -> bool {
        self.body.front() == Some(&self.head) && self.body.len() == self.length as usize
    }

    /// moves the head one step and resolves food. A snake that eats keeps its
    /// tail and is back at full health, any other move costs one health.
    fn advance(&mut self, mv: Move, board: &mut Board) {
        let new_head = self.head.add_vec(mv.to_vector());
        self.body.push_front(new_head);
        self.head = new_head;

        if board.food.remove(&new_head) {
            self.length += 1;
            self.health = MAX_HEALTH;
        } else {
            self.health = self.health.saturating_sub(1);
            self.body.pop_back();
        }
    }
}

/// The board and both snakes at one node of the search tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldState {
    board: Board,
    player: Actor,
    enemy: Actor,
    turn: u64,
}

impl WorldState {
    /// assembles a world, the enemy must be a different snake than the player
    pub fn new(board: Board, player: Actor, enemy: Actor, turn: u64) -> Self {
        debug_assert_ne!(player.id, enemy.id, "the enemy must not be the player");
        WorldState {
            board,
            player,
            enemy,
            turn,
        }
    }

    #[allow(missing_docs)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    pub fn player(&self) -> &Actor {
        &self.player
    }

    #[allow(missing_docs)]
    pub fn enemy(&self) -> &Actor {
        &self.enemy
    }

    /// the snake for a given role
    pub fn actor(&self, role: Role) -> &Actor {
        match role {
            Role::Player => &self.player,
            Role::Enemy => &self.enemy,
        }
    }

    /// Applies a single snake's move in place. Only the moving snake's
    /// health and length change. The turn counter advances once the enemy
    /// has replied, closing the round.
    pub fn apply_move(&mut self, role: Role, mv: Move) {
        let actor = match role {
            Role::Player => &mut self.player,
            Role::Enemy => &mut self.enemy,
        };
        actor.advance(mv, &mut self.board);
        if role == Role::Enemy {
            self.turn += 1;
        }
        debug_assert!(self.is_consistent(), "inconsistent world after {:?} {}", role, mv);
    }

    /// A copy of this world with one move applied. The copy shares nothing
    /// with `self`.
    pub fn with_move(&self, role: Role, mv: Move) -> Self {
        let mut next = self.clone();
        next.apply_move(role, mv);
        next
    }

    /// checks that both heads sit at the front of their bodies and that
    /// both lengths match their bodies
    pub fn is_consistent(&self) -> bool {
        self.player.is_consistent() && self.enemy.is_consistent()
    }
}

impl HeadGettableGame for WorldState {
    fn get_head(&self, role: Role) -> Position {
        self.actor(role).head
    }
}

impl HealthGettableGame for WorldState {
    fn get_health(&self, role: Role) -> i32 {
        self.actor(role).health
    }
}

impl LengthGettableGame for WorldState {
    fn get_length(&self, role: Role) -> u32 {
        self.actor(role).length
    }
}

impl SnakeBodyGettableGame for WorldState {
    fn get_snake_body(&self, role: Role) -> &VecDeque<Position> {
        &self.actor(role).body
    }
}

impl FoodGettableGame for WorldState {
    fn get_all_food(&self) -> Vec<Position> {
        self.board.food.iter().copied().collect()
    }

    fn is_food(&self, pos: &Position) -> bool {
        self.board.food.contains(pos)
    }
}

impl HazardQueryableGame for WorldState {
    fn is_hazard(&self, pos: &Position) -> bool {
        self.board.hazards.contains(pos)
    }
}

impl SizeDeterminableGame for WorldState {
    fn get_width(&self) -> u32 {
        self.board.width
    }

    fn get_height(&self) -> u32 {
        self.board.height
    }
}

impl TurnDeterminableGame for WorldState {
    fn turn(&self) -> u64 {
        self.turn
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for i in 0..self.get_height() {
            let y = (self.get_height() - i - 1) as i32;
            for x in 0..self.get_width() as i32 {
                let position = Position { x, y };
                if self.player.head == position {
                    write!(f, "H")?;
                } else if self.enemy.head == position {
                    write!(f, "E")?;
                } else if self.player.body.contains(&position)
                    || self.enemy.body.contains(&position)
                {
                    write!(f, "s")?;
                } else if self.is_food(&position) {
                    write!(f, "f")?;
                } else if self.is_hazard(&position) {
                    write!(f, "x")?;
                } else {
                    write!(f, ".")?;
                }
                write!(f, " ")?;
            }
            writeln!(f)?;
        }
        for (name, snake) in [("you", &self.player), ("enemy", &self.enemy)] {
            write!(
                f,
                "({} {} health: {} length: {} head: {:?}) ",
                name, snake.id, snake.health, snake.length, snake.head
            )?;
        }
        write!(f, "turn: {}", self.turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn world(food: &[Position]) -> WorldState {
        let board = Board::new(11, 11)
            .unwrap()
            .with_food(food.iter().copied());
        let player = Actor::new("you", 50, vec![pos(5, 5), pos(5, 4), pos(5, 3)]).unwrap();
        let enemy = Actor::new("enemy", 80, vec![pos(1, 9), pos(1, 8), pos(1, 7)]).unwrap();
        WorldState::new(board, player, enemy, 7)
    }

    #[test]
    fn test_empty_board_is_rejected() {
        assert_eq!(
            Board::new(0, 11).unwrap_err(),
            SnapshotError::EmptyBoard {
                width: 0,
                height: 11
            }
        );
    }

    #[test]
    fn test_empty_body_is_rejected() {
        assert_eq!(
            Actor::new("nobody", 100, Vec::<Position>::new()).unwrap_err(),
            SnapshotError::EmptyBody {
                id: "nobody".to_string()
            }
        );
    }

    #[test]
    fn test_health_out_of_range_is_rejected() {
        for health in [i32::MIN, -1, MAX_HEALTH + 1, i32::MAX] {
            assert_eq!(
                Actor::new("you", health, vec![pos(5, 5), pos(5, 4)]).unwrap_err(),
                SnapshotError::HealthOutOfRange {
                    id: "you".to_string(),
                    health
                }
            );
        }
        assert!(Actor::new("you", 0, vec![pos(5, 5)]).is_ok());
        assert!(Actor::new("you", MAX_HEALTH, vec![pos(5, 5)]).is_ok());
    }

    #[test]
    fn test_starving_snake_keeps_moving() {
        let player = Actor::new("you", 0, vec![pos(5, 5), pos(5, 4)]).unwrap();
        let enemy = Actor::new("enemy", 0, vec![pos(1, 1), pos(1, 0)]).unwrap();
        let mut w = WorldState::new(Board::new(11, 11).unwrap(), player, enemy, 0);
        for _ in 0..3 {
            w.apply_move(Role::Player, Move::Left);
            w.apply_move(Role::Enemy, Move::Up);
        }
        assert_eq!(w.get_health(Role::Player), -3);
        assert_eq!(w.get_health(Role::Enemy), -3);
    }

    #[test]
    fn test_board_contains() {
        let board = Board::new(11, 7).unwrap();
        assert!(board.contains(&pos(0, 0)));
        assert!(board.contains(&pos(10, 6)));
        assert!(!board.contains(&pos(-1, 0)));
        assert!(!board.contains(&pos(0, -1)));
        assert!(!board.contains(&pos(11, 0)));
        assert!(!board.contains(&pos(0, 7)));
    }

    #[test]
    fn test_duplicate_food_collapses() {
        let board = Board::new(3, 3)
            .unwrap()
            .with_food(vec![pos(1, 1), pos(1, 1), pos(2, 2)]);
        assert_eq!(board.food().len(), 2);
    }

    #[test]
    fn test_move_without_food() {
        let w = world(&[pos(0, 0)]);
        let next = w.with_move(Role::Player, Move::Left);

        assert_eq!(next.get_head(Role::Player), pos(4, 5));
        assert_eq!(
            next.get_snake_body(Role::Player),
            &VecDeque::from(vec![pos(4, 5), pos(5, 5), pos(5, 4)])
        );
        assert_eq!(next.get_health(Role::Player), 49);
        assert_eq!(next.get_length(Role::Player), 3);
        assert_eq!(next.get_all_food(), vec![pos(0, 0)]);
        assert!(next.is_consistent());
    }

    #[test]
    fn test_move_on_to_food() {
        let w = world(&[pos(5, 6), pos(0, 0)]);
        let next = w.with_move(Role::Player, Move::Up);

        assert_eq!(next.get_head(Role::Player), pos(5, 6));
        assert_eq!(
            next.get_snake_body(Role::Player),
            &VecDeque::from(vec![pos(5, 6), pos(5, 5), pos(5, 4), pos(5, 3)])
        );
        assert_eq!(next.get_health(Role::Player), MAX_HEALTH);
        assert_eq!(next.get_length(Role::Player), 4);
        assert!(!next.is_food(&pos(5, 6)));
        assert!(next.is_food(&pos(0, 0)));
        assert!(next.is_consistent());
    }

    #[test]
    fn test_enemy_moves_head_first_too() {
        let w = world(&[pos(1, 10)]);
        let next = w.with_move(Role::Enemy, Move::Up);

        assert_eq!(next.get_head(Role::Enemy), pos(1, 10));
        assert_eq!(next.get_snake_body(Role::Enemy)[0], pos(1, 10));
        assert_eq!(next.get_length(Role::Enemy), 4);
        assert_eq!(next.get_health(Role::Enemy), MAX_HEALTH);
        assert!(next.get_all_food().is_empty());
        assert!(next.is_consistent());

        let after = next.with_move(Role::Enemy, Move::Right);
        assert_eq!(after.get_snake_body(Role::Enemy)[0], pos(2, 10));
        assert_eq!(after.get_health(Role::Enemy), MAX_HEALTH - 1);
        assert_eq!(after.get_length(Role::Enemy), 4);
        assert!(after.is_consistent());
    }

    #[test]
    fn test_only_mover_changes() {
        let w = world(&[]);
        let next = w.with_move(Role::Player, Move::Right);
        assert_eq!(next.enemy(), w.enemy());

        let next = w.with_move(Role::Enemy, Move::Right);
        assert_eq!(next.player(), w.player());
    }

    #[test]
    fn test_turn_advances_after_enemy() {
        let w = world(&[]);
        let after_player = w.with_move(Role::Player, Move::Up);
        assert_eq!(after_player.turn(), 7);
        let after_enemy = after_player.with_move(Role::Enemy, Move::Down);
        assert_eq!(after_enemy.turn(), 8);
    }

    #[test]
    fn test_with_move_leaves_original_untouched() {
        let w = world(&[pos(5, 6)]);
        let before = w.clone();
        let _ = w.with_move(Role::Player, Move::Up);
        let _ = w.with_move(Role::Enemy, Move::Down);
        assert_eq!(w, before);
        assert!(w.is_food(&pos(5, 6)));
    }

    #[test]
    fn test_moves_off_the_board_are_still_applied() {
        let board = Board::new(3, 3).unwrap();
        let player = Actor::new("you", 10, vec![pos(0, 0), pos(1, 0)]).unwrap();
        let enemy = Actor::new("enemy", 10, vec![pos(2, 2), pos(2, 1)]).unwrap();
        let w = WorldState::new(board, player, enemy, 0);

        let next = w.with_move(Role::Player, Move::Left);
        assert_eq!(next.get_head(Role::Player), pos(-1, 0));
        assert!(!next.board().contains(&next.get_head(Role::Player)));
        assert!(next.is_consistent());
    }

    #[test]
    fn test_display() {
        let board = Board::new(3, 2)
            .unwrap()
            .with_food(vec![pos(2, 1)])
            .with_hazards(vec![pos(0, 0)], 14);
        let player = Actor::new("you", 10, vec![pos(1, 1), pos(1, 0)]).unwrap();
        let enemy = Actor::new("enemy", 20, vec![pos(0, 1)]).unwrap();
        let w = WorldState::new(board, player, enemy, 3);
        let rendered = w.to_string();
        let rows = rendered.lines().skip(1).take(2).collect::<Vec<_>>();
        assert_eq!(rows, vec!["E H f ", "x s . "]);
        assert!(rendered.ends_with("turn: 3"));
    }
}
