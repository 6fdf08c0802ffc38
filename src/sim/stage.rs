//! Static per-session configuration

use std::collections::HashSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::vector::{Direction, Vector};
use crate::consts::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use crate::error::StageError;

/// Where and how one snake starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorStart {
    pub position: Vector,
    pub direction: Direction,
}

impl ActorStart {
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self {
            position: IVec2::new(x, y),
            direction,
        }
    }
}

fn default_start_speed() -> u32 {
    DEFAULT_SPEED
}

/// Immutable session configuration. Together with the input log this fully
/// determines a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Grid width in tiles
    pub width: i32,
    /// Grid height in tiles
    pub height: i32,
    /// PRNG seed
    pub seed: u64,
    /// Steps per simulated second at session start
    #[serde(default = "default_start_speed")]
    pub start_speed: u32,
    /// Border tiles left open
    #[serde(default)]
    pub wall_holes: Vec<Vector>,
    /// Extra interior obstacles
    #[serde(default)]
    pub blocks: Vec<Vector>,
    pub actors: Vec<ActorStart>,
}

impl Stage {
    pub fn contains(&self, pos: Vector) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn tile_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Full obstacle set: the border minus wall holes, plus interior blocks
    pub fn static_blocks(&self) -> HashSet<Vector> {
        let holes: HashSet<Vector> = self.wall_holes.iter().copied().collect();
        let mut blocks = HashSet::new();

        for x in 0..self.width {
            blocks.insert(IVec2::new(x, 0));
            blocks.insert(IVec2::new(x, self.height - 1));
        }
        for y in 0..self.height {
            blocks.insert(IVec2::new(0, y));
            blocks.insert(IVec2::new(self.width - 1, y));
        }
        blocks.retain(|b| !holes.contains(b));
        blocks.extend(self.blocks.iter().copied());
        blocks
    }

    /// Reject configurations the simulation cannot start from
    pub fn validate(&self) -> Result<(), StageError> {
        if self.width < 1 || self.height < 1 {
            return Err(StageError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.start_speed) {
            return Err(StageError::SpeedOutOfRange(self.start_speed));
        }
        if self.actors.is_empty() {
            return Err(StageError::NoActors);
        }

        let blocks = self.static_blocks();
        for (index, actor) in self.actors.iter().enumerate() {
            if !self.contains(actor.position) {
                return Err(StageError::StartOutOfBounds {
                    index,
                    position: actor.position,
                });
            }
            if blocks.contains(&actor.position) {
                return Err(StageError::StartOnBlock {
                    index,
                    position: actor.position,
                });
            }
            if let Some(first) = self.actors[..index]
                .iter()
                .position(|a| a.position == actor.position)
            {
                return Err(StageError::SharedStart {
                    first,
                    second: index,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_stage() -> Stage {
        Stage {
            width: 5,
            height: 4,
            seed: 1,
            start_speed: DEFAULT_SPEED,
            wall_holes: vec![IVec2::new(2, 0)],
            blocks: vec![IVec2::new(2, 2)],
            actors: vec![ActorStart::new(1, 1, Direction::Right)],
        }
    }

    #[test]
    fn test_static_blocks_perimeter() {
        let stage = small_stage();
        let blocks = stage.static_blocks();
        // 5x4 border has 14 tiles, one hole, one interior block
        assert_eq!(blocks.len(), 14 - 1 + 1);
        assert!(!blocks.contains(&IVec2::new(2, 0)));
        assert!(blocks.contains(&IVec2::new(2, 3)));
        assert!(blocks.contains(&IVec2::new(2, 2)));
        assert!(blocks.contains(&IVec2::new(0, 0)));
        assert!(!blocks.contains(&IVec2::new(1, 1)));
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(small_stage().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_stages() {
        let mut stage = small_stage();
        stage.width = 0;
        assert!(matches!(stage.validate(), Err(StageError::EmptyGrid { .. })));

        let mut stage = small_stage();
        stage.actors.clear();
        assert_eq!(stage.validate(), Err(StageError::NoActors));

        let mut stage = small_stage();
        stage.actors.push(ActorStart::new(9, 1, Direction::Up));
        assert!(matches!(
            stage.validate(),
            Err(StageError::StartOutOfBounds { index: 1, .. })
        ));

        let mut stage = small_stage();
        stage.actors[0].position = IVec2::new(0, 0);
        assert!(matches!(
            stage.validate(),
            Err(StageError::StartOnBlock { index: 0, .. })
        ));

        let mut stage = small_stage();
        stage.actors.push(ActorStart::new(1, 1, Direction::Left));
        assert_eq!(
            stage.validate(),
            Err(StageError::SharedStart {
                first: 0,
                second: 1
            })
        );

        let mut stage = small_stage();
        stage.start_speed = 0;
        assert_eq!(stage.validate(), Err(StageError::SpeedOutOfRange(0)));
    }

    #[test]
    fn test_start_speed_defaults_when_missing() {
        let json = r#"{"width":5,"height":4,"seed":3,"actors":[{"position":[1,1],"direction":"Up"}]}"#;
        let stage: Stage = serde_json::from_str(json).unwrap();
        assert_eq!(stage.start_speed, DEFAULT_SPEED);
        assert!(stage.wall_holes.is_empty());
    }
}
