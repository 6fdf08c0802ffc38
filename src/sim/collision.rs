//! Tile collision checks
//!
//! Each check answers one question about a single candidate tile. The
//! ordering of checks within a step lives in the engine.

use std::collections::VecDeque;

use super::state::Snake;
use super::vector::Vector;

/// Does `pos` land on any snake other than `actor`?
pub fn hits_other_snake(snakes: &[Snake], actor: usize, pos: Vector) -> bool {
    snakes
        .iter()
        .enumerate()
        .any(|(i, s)| i != actor && s.occupies(pos))
}

/// Like [`hits_other_snake`], but against tile sets captured earlier
pub fn hits_other_tiles(tile_sets: &[VecDeque<Vector>], actor: usize, pos: Vector) -> bool {
    tile_sets
        .iter()
        .enumerate()
        .any(|(i, tiles)| i != actor && tiles.contains(&pos))
}

/// Does `pos` land on the snake's own body?
pub fn hits_self(snake: &Snake, pos: Vector) -> bool {
    snake.occupies(pos)
}
