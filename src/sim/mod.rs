//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulated milliseconds only, never wall-clock time
//! - One seeded RNG per engine, never a global one
//! - Stable iteration order (by snake index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod input;
pub mod stage;
pub mod state;
pub mod vector;

pub use engine::{GameLogic, MILLI_STEPS_PER_STEP, seeded_rng};
pub use input::{GameEventInput, GameInput};
pub use stage::{ActorStart, Stage};
pub use state::{Outcome, SimulationState, Snake};
pub use vector::{Direction, Vector, wrap};
