//! Idle/demo mode AI
//!
//! Steers a snake toward the apple while avoiding tiles that would end the
//! game on the next step. Produces ordinary inputs, so autopilot sessions
//! record and replay like any other.

use crate::sim::{Direction, GameInput, SimulationState, Stage, wrap};

/// Suggest a turn for `actor`, or `None` to keep going straight
pub fn suggest(state: &SimulationState, stage: &Stage, actor: usize) -> Option<GameInput> {
    let snake = state.snakes.get(actor)?;
    if state.game_over || !snake.pending_dirs.is_empty() {
        return None;
    }

    let is_safe = |dir: Direction| {
        let next = snake.position + dir.delta();
        !state.blocks.contains(&next) && !state.is_occupied(wrap(next, stage.width, stage.height))
    };

    // Manhattan distance to the apple after one move in `dir`
    let distance = |dir: Direction| {
        state
            .apple_pos
            .map(|apple| {
                let next = snake.position + dir.delta();
                (apple - next).abs().element_sum()
            })
            .unwrap_or(0)
    };

    let best = Direction::ALL
        .into_iter()
        .filter(|&dir| !dir.is_opposite(snake.dir) && is_safe(dir))
        .min_by_key(|&dir| (distance(dir), dir != snake.dir))?;

    (best != snake.dir).then(|| GameInput::turn(actor, best))
}
