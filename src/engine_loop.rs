//! Wall-clock driver
//!
//! Converts real elapsed time into simulated time for the active handler and
//! switches between live play and playback. Single-threaded: every call runs
//! to completion inside one callback from the host's tick source.

use crate::error::StageError;
use crate::handler::Handler;
use crate::renderer::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEventInput, GameInput, SimulationState, Stage};

/// Owns the active handler and the clock that feeds it
#[derive(Debug, Clone)]
pub struct EngineLoop {
    handler: Handler,
    settings: Settings,
    /// Host timestamp (ms) of the last drained tick
    last_time: u64,
    playback: bool,
}

impl EngineLoop {
    /// Start a live session on a fresh stage
    pub fn new(settings: Settings, seed: u64, now_ms: u64) -> Result<Self, StageError> {
        let stage = settings.stage.build(seed)?;
        log::info!("session started with seed {}", seed);
        Ok(Self {
            handler: Handler::live(stage, Vec::new()),
            settings,
            last_time: now_ms,
            playback: false,
        })
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn stage(&self) -> &Stage {
        self.handler.stage()
    }

    pub fn state(&self) -> &SimulationState {
        self.handler.state()
    }

    pub fn saved_inputs(&self) -> &[GameEventInput] {
        self.handler.saved_inputs()
    }

    pub fn is_playback(&self) -> bool {
        self.playback
    }

    /// Feed the time elapsed since the last tick to the handler
    fn catch_up(&mut self, now_ms: u64) {
        let mut elapsed = now_ms.saturating_sub(self.last_time);
        if let Some(max) = self.settings.max_frame_ms {
            elapsed = elapsed.min(max);
        }
        self.last_time = now_ms;
        self.handler.advance_time(elapsed);
    }

    /// One host tick: advance, hand control back to live play if a replay
    /// just finished, then draw.
    pub fn frame<R: Renderer>(&mut self, now_ms: u64, renderer: &mut R) {
        self.catch_up(now_ms);
        if self.playback && self.handler.is_done() {
            log::info!("playback finished");
            self.resume_live(now_ms);
        }
        renderer.render(Frame {
            state: self.handler.state(),
            stage: self.handler.stage(),
            playback: self.playback,
        });
    }

    /// Timestamp and apply player input.
    ///
    /// The handler is brought up to `now_ms` first so the input lands at the
    /// right simulated moment.
    pub fn dispatch_input(&mut self, now_ms: u64, input: GameInput) -> Option<GameEventInput> {
        self.catch_up(now_ms);
        self.handler.perform_input(input)
    }

    /// New stage with a new seed, empty log
    pub fn restart(&mut self, now_ms: u64, seed: u64) -> Result<(), StageError> {
        let stage = self.settings.stage.build(seed)?;
        self.handler = Handler::live(stage, Vec::new());
        self.playback = false;
        self.last_time = now_ms;
        log::info!("restarted with seed {}", seed);
        Ok(())
    }

    /// Replay the current session from the beginning
    pub fn enter_playback(&mut self, now_ms: u64) {
        let stage = self.handler.stage().clone();
        let inputs = self.handler.saved_inputs().to_vec();
        log::info!("replaying {} inputs", inputs.len());
        self.handler = Handler::playback(stage, inputs);
        self.playback = true;
        self.last_time = now_ms;
    }

    /// Continue live play from the end of the current log
    pub fn resume_live(&mut self, now_ms: u64) {
        let stage = self.handler.stage().clone();
        let inputs = self.handler.saved_inputs().to_vec();
        self.handler = Handler::live(stage, inputs);
        self.playback = false;
        self.last_time = now_ms;
        log::info!(
            "live play resumed at {}ms",
            self.handler.engine().total_duration()
        );
    }

    /// Install a previously recorded session and replay it
    pub fn load_session(&mut self, now_ms: u64, stage: Stage, inputs: Vec<GameEventInput>) {
        log::info!("loaded session with {} inputs", inputs.len());
        self.handler = Handler::playback(stage, inputs);
        self.playback = true;
        self.last_time = now_ms;
    }
}
