//! Grid coordinates and movement directions

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Integer tile coordinate. Copy value type; arithmetic always yields a new value.
pub type Vector = IVec2;

/// Movement direction.
///
/// The discriminants are chosen so that opposite directions sum to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Direction {
    Up = 1,
    Down = -1,
    Left = 2,
    Right = -2,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit movement for one step. Y grows downward.
    pub fn delta(self) -> Vector {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self as i8 + other as i8 == 0
    }
}

/// Toroidal wrap of a single coordinate into `[0, extent)`.
///
/// Only one grid-width of overshoot is expected: below zero goes to the far
/// edge, at or beyond the extent goes to zero.
#[inline]
pub fn wrap_axis(value: i32, extent: i32) -> i32 {
    if value < 0 {
        extent - 1
    } else if value >= extent {
        0
    } else {
        value
    }
}

/// Wrap both axes independently.
#[inline]
pub fn wrap(pos: Vector, width: i32, height: i32) -> Vector {
    IVec2::new(wrap_axis(pos.x, width), wrap_axis(pos.y, height))
}
