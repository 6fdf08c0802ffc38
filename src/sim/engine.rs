//! Fixed-timestep simulation engine
//!
//! Owns one stage, one seeded PRNG and one [`SimulationState`]. Wall-clock
//! variance never reaches this module: callers hand in simulated
//! milliseconds and the engine converts them into a whole number of steps.

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{hits_other_snake, hits_other_tiles, hits_self};
use super::input::{GameEventInput, GameInput};
use super::stage::Stage;
use super::state::{Outcome, SimulationState};
use super::vector::{Vector, wrap};
use crate::consts::{APPLE_GROWTH, MAX_PENDING_DIRS, MAX_SPEED, MIN_SPEED};

/// Pending time is tracked in thousandths of a step (`ms * speed`)
pub const MILLI_STEPS_PER_STEP: u64 = 1000;

/// Rejection-sampling draws per tile before falling back to a scan
const APPLE_ATTEMPTS_PER_TILE: usize = 4;

/// Build the per-engine PRNG. The seed's decimal form plus a NUL terminator
/// is hashed so nearby seeds give unrelated streams.
pub fn seeded_rng(seed: u64) -> Pcg32 {
    let material = format!("{seed}\0");
    let digest = blake3::hash(material.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest.as_bytes()[..16]);
    Pcg32::from_seed(bytes)
}

/// The simulation engine
#[derive(Debug, Clone)]
pub struct GameLogic {
    stage: Stage,
    rng: Pcg32,
    state: SimulationState,
    /// Simulated ms since session start
    total_duration: u64,
    /// Time not yet turned into steps, in milli-steps
    pending: u64,
    /// Completed steps
    steps: u64,
}

impl GameLogic {
    pub fn new(stage: Stage) -> Self {
        let rng = seeded_rng(stage.seed);
        let state = SimulationState::new(&stage);
        Self {
            stage,
            rng,
            state,
            total_duration: 0,
            pending: 0,
            steps: 0,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn total_duration(&self) -> u64 {
        self.total_duration
    }

    pub fn pending_milli_steps(&self) -> u64 {
        self.pending
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Let `duration_ms` of simulated time pass, running every whole step it
    /// covers. Returns the number of steps budgeted.
    ///
    /// Chunking does not matter: any split of the same total at the same
    /// speed yields the same steps and the same remainder.
    pub fn advance_time(&mut self, duration_ms: u64) -> u64 {
        // A zero-length advance never flushes steps left over from a speed
        // change, so live and playback may issue them at different points.
        if duration_ms == 0 {
            return 0;
        }
        self.total_duration += duration_ms;
        self.pending += duration_ms * u64::from(self.state.speed);

        let whole_steps = self.pending / MILLI_STEPS_PER_STEP;
        for _ in 0..whole_steps {
            if !self.step() {
                break;
            }
        }
        self.pending -= whole_steps * MILLI_STEPS_PER_STEP;
        whole_steps
    }

    /// Advance every snake by one tile, in index order.
    ///
    /// Returns false if the game is (or just became) over.
    pub fn step(&mut self) -> bool {
        if self.state.game_over {
            return false;
        }
        let (width, height) = (self.stage.width, self.stage.height);
        // Other snakes are first checked as they stood before anyone moved
        let pre_move: Vec<VecDeque<Vector>> =
            self.state.snakes.iter().map(|s| s.tiles.clone()).collect();

        for actor in 0..self.state.snakes.len() {
            let state = &mut self.state;

            let snake = &mut state.snakes[actor];
            if let Some(dir) = snake.pending_dirs.pop_front() {
                snake.dir = dir;
            }
            let new_pos = snake.position + snake.dir.delta();

            // Checked before wrapping
            if hits_other_tiles(&pre_move, actor, new_pos)
                || state.blocks.contains(&new_pos)
                || hits_self(&state.snakes[actor], new_pos)
            {
                self.crash(actor);
                return false;
            }

            let new_pos = wrap(new_pos, width, height);
            let snake = &mut state.snakes[actor];
            snake.position = new_pos;
            snake.tiles.push_back(new_pos);

            if state.apple_pos == Some(new_pos) {
                state.apple_pos = None;
                snake.length += APPLE_GROWTH;
            }
            while snake.tiles.len() > snake.length {
                snake.tiles.pop_front();
            }

            // Re-check with the wrapped position against live tiles. Snakes
            // earlier in the order have already moved this step, so a head
            // they just claimed counts here.
            if hits_other_snake(&state.snakes, actor, new_pos) {
                self.crash(actor);
                return false;
            }
        }

        self.steps += 1;
        log::trace!("step {} complete", self.steps);

        if self.state.apple_pos.is_none() {
            self.place_apple();
        }
        !self.state.game_over
    }

    fn crash(&mut self, actor: usize) {
        log::info!(
            "snake {} crashed at {}ms after {} steps",
            actor,
            self.total_duration,
            self.steps
        );
        self.state.end(Outcome::Collision { actor });
    }

    fn random_tile(&mut self) -> Vector {
        let x = self.rng.random_range(0..self.stage.width);
        let y = self.rng.random_range(0..self.stage.height);
        IVec2::new(x, y)
    }

    /// Drop a new apple on a free tile, or end the game if there is none
    fn place_apple(&mut self) {
        let attempts = APPLE_ATTEMPTS_PER_TILE * self.stage.tile_count();
        for _ in 0..attempts {
            let pos = self.random_tile();
            if !self.state.is_occupied(pos) {
                self.state.apple_pos = Some(pos);
                return;
            }
        }

        // Sampling kept missing; scan for whatever is left
        let (width, height) = (self.stage.width, self.stage.height);
        let free: Vec<Vector> = (0..height)
            .flat_map(|y| (0..width).map(move |x| IVec2::new(x, y)))
            .filter(|&pos| !self.state.is_occupied(pos))
            .collect();

        if free.is_empty() {
            log::info!("board full after {} steps", self.steps);
            self.state.end(Outcome::BoardFull);
            return;
        }
        let pick = self.rng.random_range(0..free.len());
        self.state.apple_pos = Some(free[pick]);
    }

    /// Apply a player input.
    ///
    /// Returns the timestamped event when the input was accepted; rejected
    /// inputs leave no trace.
    pub fn input(&mut self, input: GameInput) -> Option<GameEventInput> {
        match input {
            GameInput::Direction {
                actor_index,
                new_direction,
            } => {
                let Some(snake) = self.state.snakes.get_mut(actor_index) else {
                    log::warn!("ignoring turn for unknown snake {}", actor_index);
                    return None;
                };
                if snake.pending_dirs.len() >= MAX_PENDING_DIRS {
                    return None;
                }
                let follows = snake.last_queued_dir();
                if new_direction == follows || new_direction.is_opposite(follows) {
                    return None;
                }
                snake.pending_dirs.push_back(new_direction);
            }
            GameInput::SpeedChange { increment } => {
                let old = self.state.speed;
                let new = (i64::from(old) + i64::from(increment))
                    .clamp(i64::from(MIN_SPEED), i64::from(MAX_SPEED)) as u32;
                // Keep the pending wall-time fraction across the unit change
                self.pending = self.pending * u64::from(new) / u64::from(old);
                self.state.speed = new;
            }
        }

        let event = GameEventInput {
            event_time: self.total_duration,
            game_input: input,
        };
        log::debug!("accepted {:?} at {}ms", input, self.total_duration);
        Some(event)
    }
}
