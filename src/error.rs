//! Error types for configuration and session files
//!
//! The simulation itself never fails: rejected inputs are simply not
//! recorded, and a crash is a game state rather than an error.

use thiserror::Error;

use crate::sim::Vector;

/// An invalid stage configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: i32, height: i32 },
    #[error("stage has no actors")]
    NoActors,
    #[error("actor {index} starts outside the grid at {position}")]
    StartOutOfBounds { index: usize, position: Vector },
    #[error("actor {index} starts on a block at {position}")]
    StartOnBlock { index: usize, position: Vector },
    #[error("actors {first} and {second} share a start position")]
    SharedStart { first: usize, second: usize },
    #[error("start speed {0} is outside [{min}, {max}]", min = crate::consts::MIN_SPEED, max = crate::consts::MAX_SPEED)]
    SpeedOutOfRange(u32),
}

/// A session file that could not be loaded
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("malformed session JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported session version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("session digest mismatch")]
    Digest,
    #[error("event {index} at {time}ms precedes the previous event at {previous}ms")]
    NonMonotonic { index: usize, time: u64, previous: u64 },
    #[error(transparent)]
    Stage(#[from] StageError),
}
