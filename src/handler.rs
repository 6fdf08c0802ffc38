//! Live and playback drivers around a [`GameLogic`]
//!
//! Both variants expose the same surface so the engine loop never needs to
//! know which one it holds. Live play records accepted inputs into the log;
//! playback feeds a finished log back in and ignores new input.

use crate::sim::{GameEventInput, GameInput, GameLogic, SimulationState, Stage};

/// Drives the simulation from real player input
#[derive(Debug, Clone)]
pub struct LiveHandler {
    engine: GameLogic,
    saved_inputs: Vec<GameEventInput>,
}

impl LiveHandler {
    /// Start live play on `stage`.
    ///
    /// A non-empty `saved_inputs` is replayed first, so play continues from
    /// exactly where that log ends.
    pub fn new(stage: Stage, saved_inputs: Vec<GameEventInput>) -> Self {
        let mut engine = GameLogic::new(stage);
        if !saved_inputs.is_empty() {
            log::debug!("catching up on {} logged inputs", saved_inputs.len());
        }
        for event in &saved_inputs {
            engine.advance_time(event.event_time.saturating_sub(engine.total_duration()));
            if engine.input(event.game_input).is_none() {
                log::warn!(
                    "logged input {:?} at {}ms was rejected during catch-up",
                    event.game_input,
                    event.event_time
                );
            }
        }
        Self {
            engine,
            saved_inputs,
        }
    }

    pub fn engine(&self) -> &GameLogic {
        &self.engine
    }

    pub fn advance_time(&mut self, duration_ms: u64) {
        self.engine.advance_time(duration_ms);
    }

    /// Forward input to the engine, logging it if accepted
    pub fn perform_input(&mut self, input: GameInput) -> Option<GameEventInput> {
        let event = self.engine.input(input)?;
        self.saved_inputs.push(event);
        Some(event)
    }
}

/// Re-runs a finished log against a fresh engine
#[derive(Debug, Clone)]
pub struct PlaybackHandler {
    engine: GameLogic,
    saved_inputs: Vec<GameEventInput>,
    /// Index of the next log entry to apply
    cursor: usize,
}

impl PlaybackHandler {
    pub fn new(stage: Stage, saved_inputs: Vec<GameEventInput>) -> Self {
        Self {
            engine: GameLogic::new(stage),
            saved_inputs,
            cursor: 0,
        }
    }

    pub fn engine(&self) -> &GameLogic {
        &self.engine
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.saved_inputs.len()
    }

    /// Advance without ever stepping past a pending event's timestamp.
    ///
    /// Time is fed in slices that end exactly on event times, and each event
    /// is applied as soon as the clock reaches it, however the caller chunks
    /// `duration_ms`.
    pub fn advance_time(&mut self, duration_ms: u64) {
        let mut remaining = duration_ms;
        loop {
            let Some(event) = self.saved_inputs.get(self.cursor).copied() else {
                self.engine.advance_time(remaining);
                return;
            };

            let until_event = event.event_time.saturating_sub(self.engine.total_duration());
            let slice = remaining.min(until_event);
            self.engine.advance_time(slice);
            remaining -= slice;

            if self.engine.total_duration() < event.event_time {
                return;
            }
            if self.engine.input(event.game_input).is_none() {
                log::warn!(
                    "logged input {:?} at {}ms was rejected during playback",
                    event.game_input,
                    event.event_time
                );
            }
            self.cursor += 1;
        }
    }
}

/// The active driver, live or playback
#[derive(Debug, Clone)]
pub enum Handler {
    Live(LiveHandler),
    Playback(PlaybackHandler),
}

impl Handler {
    pub fn live(stage: Stage, saved_inputs: Vec<GameEventInput>) -> Self {
        Handler::Live(LiveHandler::new(stage, saved_inputs))
    }

    pub fn playback(stage: Stage, saved_inputs: Vec<GameEventInput>) -> Self {
        Handler::Playback(PlaybackHandler::new(stage, saved_inputs))
    }

    pub fn engine(&self) -> &GameLogic {
        match self {
            Handler::Live(h) => h.engine(),
            Handler::Playback(h) => h.engine(),
        }
    }

    pub fn stage(&self) -> &Stage {
        self.engine().stage()
    }

    pub fn state(&self) -> &SimulationState {
        self.engine().state()
    }

    /// The session's input log
    pub fn saved_inputs(&self) -> &[GameEventInput] {
        match self {
            Handler::Live(h) => &h.saved_inputs,
            Handler::Playback(h) => &h.saved_inputs,
        }
    }

    /// Live play is never done; playback is done once every event is applied
    pub fn is_done(&self) -> bool {
        match self {
            Handler::Live(_) => false,
            Handler::Playback(h) => h.is_done(),
        }
    }

    pub fn advance_time(&mut self, duration_ms: u64) {
        match self {
            Handler::Live(h) => h.advance_time(duration_ms),
            Handler::Playback(h) => h.advance_time(duration_ms),
        }
    }

    /// Returns the logged event if the input was accepted
    pub fn perform_input(&mut self, input: GameInput) -> Option<GameEventInput> {
        match self {
            Handler::Live(h) => h.perform_input(input),
            Handler::Playback(_) => None,
        }
    }

    /// Give up the stage and log so another handler can take over
    pub fn into_parts(self) -> (Stage, Vec<GameEventInput>) {
        match self {
            Handler::Live(h) => (h.engine.stage().clone(), h.saved_inputs),
            Handler::Playback(h) => (h.engine.stage().clone(), h.saved_inputs),
        }
    }
}
