//! Game settings and stage defaults
//!
//! Loaded from JSON; every field falls back to its default when missing.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SPEED;
use crate::error::StageError;
use crate::sim::{ActorStart, Direction, Stage, Vector};

/// Everything about a stage except its seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSettings {
    /// Grid width in tiles
    pub width: i32,
    /// Grid height in tiles
    pub height: i32,
    /// Steps per second at session start
    pub start_speed: u32,
    /// Border tiles left open for wraparound
    pub wall_holes: Vec<Vector>,
    /// Interior obstacles
    pub blocks: Vec<Vector>,
    /// One entry per snake
    pub actors: Vec<ActorStart>,
}

impl Default for StageSettings {
    fn default() -> Self {
        let (width, height) = (40, 40);
        Self {
            width,
            height,
            start_speed: DEFAULT_SPEED,
            // Paired tunnels at the middle of each side
            wall_holes: vec![
                IVec2::new(width / 2, 0),
                IVec2::new(width / 2, height - 1),
                IVec2::new(0, height / 2),
                IVec2::new(width - 1, height / 2),
            ],
            blocks: Vec::new(),
            actors: vec![
                ActorStart::new(4, 4, Direction::Right),
                ActorStart::new(36, 36, Direction::Left),
            ],
        }
    }
}

impl StageSettings {
    /// Fix a seed and validate
    pub fn build(&self, seed: u64) -> Result<Stage, StageError> {
        let stage = Stage {
            width: self.width,
            height: self.height,
            seed,
            start_speed: self.start_speed,
            wall_holes: self.wall_holes.clone(),
            blocks: self.blocks.clone(),
            actors: self.actors.clone(),
        };
        stage.validate()?;
        Ok(stage)
    }
}

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena used for every new session
    pub stage: StageSettings,
    /// Longest wall-clock slice drained in one frame (ms). `None` drains
    /// everything, however long the frame took.
    pub max_frame_ms: Option<u64>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
