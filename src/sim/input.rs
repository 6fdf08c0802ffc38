//! Player inputs and the timestamped replay log entry

use serde::{Deserialize, Serialize};

use super::vector::Direction;

/// A command delivered to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameInput {
    /// Queue a turn for one snake
    Direction {
        actor_index: usize,
        new_direction: Direction,
    },
    /// Adjust steps per second (clamped)
    SpeedChange { increment: i32 },
}

impl GameInput {
    pub fn turn(actor_index: usize, new_direction: Direction) -> Self {
        GameInput::Direction {
            actor_index,
            new_direction,
        }
    }

    pub fn speed(increment: i32) -> Self {
        GameInput::SpeedChange { increment }
    }
}

/// An accepted input stamped with the simulated time it was applied at.
/// The ordered sequence of these is the replay log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEventInput {
    /// Simulated milliseconds since session start
    pub event_time: u64,
    pub game_input: GameInput,
}
