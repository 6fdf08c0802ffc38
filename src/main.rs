//! Snake Replay entry point
//!
//! Plays a headless autopilot session on a virtual clock, checks that the
//! recorded log replays to the same state, then prints the final frame and
//! the saved session.

use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

use snake_replay::renderer::{AsciiRenderer, NullRenderer};
use snake_replay::{EngineLoop, Handler, SessionRecord, Settings, autopilot};

/// Virtual frame length (~60 fps)
const FRAME_MS: u64 = 16;
/// Give up on a session after this much simulated time
const SESSION_LIMIT_MS: u64 = 120_000;
/// Chunk sizes used to prove replay does not depend on frame timing
const REPLAY_CHUNKS_MS: [u64; 4] = [7, 33, 101, 2];

fn load_settings() -> Result<Settings, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("settings loaded from {}", path);
            Ok(Settings::from_json(&json)?)
        }
        None => Ok(Settings::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Snake Replay (native) starting...");

    let settings = load_settings()?;
    log::debug!("effective settings:\n{}", settings.to_json()?);
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    let mut now = 0;
    let mut game = EngineLoop::new(settings, seed, now)?;
    let mut renderer = AsciiRenderer::new();

    // Live session driven by the autopilot
    while !game.state().game_over && now < SESSION_LIMIT_MS {
        now += FRAME_MS;
        for actor in 0..game.state().snakes.len() {
            if let Some(input) = autopilot::suggest(game.state(), game.stage(), actor) {
                game.dispatch_input(now, input);
            }
        }
        game.frame(now, &mut renderer);
    }
    let live_state = game.state().clone();
    let live_duration = game.handler().engine().total_duration();
    log::info!(
        "live session ended at {}ms with {} inputs",
        live_duration,
        game.saved_inputs().len()
    );

    // Replay the log in uneven chunks and compare
    let mut replay = Handler::playback(game.stage().clone(), game.saved_inputs().to_vec());
    let mut replayed = 0;
    for &chunk in REPLAY_CHUNKS_MS.iter().cycle() {
        if replayed >= live_duration {
            break;
        }
        let chunk = chunk.min(live_duration - replayed);
        replay.advance_time(chunk);
        replayed += chunk;
    }
    if replay.state() == &live_state {
        log::info!("replay reproduced the live session exactly");
    } else {
        log::error!("replay diverged from the live session");
    }

    // Same thing through the loop: playback, then automatic hand-back to live
    game.enter_playback(now);
    while game.is_playback() {
        now += FRAME_MS;
        game.frame(now, &mut NullRenderer);
    }

    game.frame(now, &mut renderer);
    print!("{}", renderer.last_frame);

    let (stage, inputs) = replay.into_parts();
    let record = SessionRecord::new(stage, inputs);
    println!("{}", record.to_json()?);
    Ok(())
}
