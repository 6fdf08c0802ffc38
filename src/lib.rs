//! Snake Replay - a deterministic multi-snake grid game with event-sourced replay
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stepping, collisions, apples, input queueing)
//! - `handler`: Live play and playback drivers around the simulation
//! - `engine_loop`: Wall-clock timing and mode switching
//! - `renderer`: Read-only frame interface plus a text renderer
//! - `persistence`: Save/load sessions with integrity verification
//! - `settings`: Data-driven stage configuration

pub mod autopilot;
pub mod engine_loop;
pub mod error;
pub mod handler;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine_loop::EngineLoop;
pub use error::{PersistenceError, StageError};
pub use handler::{Handler, LiveHandler, PlaybackHandler};
pub use persistence::SessionRecord;
pub use settings::{Settings, StageSettings};

/// Game configuration constants
pub mod consts {
    /// Body length every snake starts with
    pub const START_LENGTH: usize = 4;
    /// Growth per apple eaten
    pub const APPLE_GROWTH: usize = 2;
    /// Turns that may be queued ahead of the current direction
    pub const MAX_PENDING_DIRS: usize = 2;

    /// Speed bounds (steps per simulated second)
    pub const MIN_SPEED: u32 = 1;
    pub const MAX_SPEED: u32 = 1000;
    /// Speed a default stage starts at
    pub const DEFAULT_SPEED: u32 = 10;
}
