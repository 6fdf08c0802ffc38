//! Rendering interface
//!
//! The simulation hands out a read-only [`Frame`]; how it becomes pixels (or
//! characters) is up to the implementation.

pub mod ascii;

pub use ascii::AsciiRenderer;

use crate::sim::{SimulationState, Stage};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub state: &'a SimulationState,
    pub stage: &'a Stage,
    /// True while a recorded session is being replayed
    pub playback: bool,
}

/// Consumer of frames. Side effects only.
pub trait Renderer {
    fn render(&mut self, frame: Frame<'_>);
}

/// Discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: Frame<'_>) {}
}
