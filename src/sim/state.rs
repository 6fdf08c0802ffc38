//! Mutable per-tick simulation data
//!
//! Pure data. All mutation goes through [`super::GameLogic`].

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::stage::{ActorStart, Stage};
use super::vector::{Direction, Vector};
use crate::consts::START_LENGTH;

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A snake ran into a block, another snake, or itself
    Collision { actor: usize },
    /// No free tile was left for an apple
    BoardFull,
}

/// One player-controlled snake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    /// Head position
    pub position: Vector,
    /// Target body length
    pub length: usize,
    /// Occupied tiles, oldest first
    pub tiles: VecDeque<Vector>,
    /// Direction committed by the last step
    pub dir: Direction,
    /// Queued turns, consumed one per step
    pub pending_dirs: VecDeque<Direction>,
}

impl Snake {
    pub fn new(start: &ActorStart) -> Self {
        Self {
            position: start.position,
            length: START_LENGTH,
            tiles: VecDeque::with_capacity(START_LENGTH),
            dir: start.direction,
            pending_dirs: VecDeque::with_capacity(2),
        }
    }

    /// Direction a newly queued turn would follow
    pub fn last_queued_dir(&self) -> Direction {
        self.pending_dirs.back().copied().unwrap_or(self.dir)
    }

    pub fn occupies(&self, pos: Vector) -> bool {
        self.tiles.contains(&pos)
    }
}

/// Complete mutable state of one simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Static obstacles, fixed at construction
    pub blocks: HashSet<Vector>,
    /// Steps per simulated second
    pub speed: u32,
    pub apple_pos: Option<Vector>,
    /// Snakes in stable processing order
    pub snakes: Vec<Snake>,
    /// Terminal flag, never reset
    pub game_over: bool,
    pub outcome: Option<Outcome>,
}

impl SimulationState {
    pub fn new(stage: &Stage) -> Self {
        Self {
            blocks: stage.static_blocks(),
            speed: stage.start_speed,
            apple_pos: None,
            snakes: stage.actors.iter().map(Snake::new).collect(),
            game_over: false,
            outcome: None,
        }
    }

    /// True if `pos` is a block or any snake tile
    pub fn is_occupied(&self, pos: Vector) -> bool {
        self.blocks.contains(&pos) || self.snakes.iter().any(|s| s.occupies(pos))
    }

    pub(crate) fn end(&mut self, outcome: Outcome) {
        self.game_over = true;
        self.outcome = Some(outcome);
    }
}
