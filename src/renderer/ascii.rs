//! Plain-text renderer for terminals and tests

use glam::IVec2;

use super::{Frame, Renderer};

pub const BLOCK: char = '#';
pub const APPLE: char = '*';
pub const EMPTY: char = '.';

/// Head glyph per snake; bodies use the lowercase letter
const HEADS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Renders frames into a text grid, one line per row
#[derive(Debug, Default, Clone)]
pub struct AsciiRenderer {
    /// Most recent frame
    pub last_frame: String,
    /// Frames drawn so far
    pub frames: u64,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `frame` to a string without touching renderer state
    pub fn draw(frame: Frame<'_>) -> String {
        let stage = frame.stage;
        let state = frame.state;
        let width = stage.width.max(0) as usize;
        let height = stage.height.max(0) as usize;
        let mut grid = vec![vec![EMPTY; width]; height];

        let mut put = |pos: IVec2, glyph: char| {
            if stage.contains(pos) {
                grid[pos.y as usize][pos.x as usize] = glyph;
            }
        };

        for &block in &state.blocks {
            put(block, BLOCK);
        }
        if let Some(apple) = state.apple_pos {
            put(apple, APPLE);
        }
        for (i, snake) in state.snakes.iter().enumerate() {
            let head = HEADS[i % HEADS.len()];
            for &tile in &snake.tiles {
                put(tile, head.to_ascii_lowercase());
            }
            put(snake.position, head);
        }

        let mut out = String::with_capacity((width + 1) * (height + 1));
        for row in grid {
            out.extend(row);
            out.push('\n');
        }

        let mode = if frame.playback { "REPLAY" } else { "LIVE" };
        let status = if state.game_over { " GAME OVER" } else { "" };
        out.push_str(&format!("[{mode}] speed {}{status}\n", state.speed));
        out
    }
}

impl Renderer for AsciiRenderer {
    fn render(&mut self, frame: Frame<'_>) {
        self.last_frame = Self::draw(frame);
        self.frames += 1;
    }
}
