//! Property tests for the simulation invariants

use proptest::prelude::*;
use snake_replay::StageSettings;
use snake_replay::handler::Handler;
use snake_replay::sim::{Direction, GameInput, GameLogic, Stage};

fn stage(seed: u64) -> Stage {
    StageSettings::default().build(seed).unwrap()
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn game_input() -> impl Strategy<Value = GameInput> {
    prop_oneof![
        4 => (0usize..3, direction()).prop_map(|(actor, dir)| GameInput::turn(actor, dir)),
        1 => (-20i32..20).prop_map(GameInput::speed),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Input(GameInput),
    Step,
    Advance(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => game_input().prop_map(Op::Input),
        3 => Just(Op::Step),
        1 => (0u64..400).prop_map(Op::Advance),
    ]
}

proptest! {
    #[test]
    fn split_advance_matches_single_advance(
        seed in any::<u64>(),
        speed_delta in -20i32..990,
        d1 in 0u64..5_000,
        d2 in 0u64..5_000,
    ) {
        let mut whole = GameLogic::new(stage(seed));
        let mut split = GameLogic::new(stage(seed));
        whole.input(GameInput::speed(speed_delta));
        split.input(GameInput::speed(speed_delta));

        let budget = whole.advance_time(d1 + d2);
        let budget_split = split.advance_time(d1) + split.advance_time(d2);

        prop_assert_eq!(budget, budget_split);
        prop_assert_eq!(whole.steps(), split.steps());
        prop_assert_eq!(whole.pending_milli_steps(), split.pending_milli_steps());
        prop_assert_eq!(whole.state(), split.state());
    }

    #[test]
    fn invariants_hold_under_random_play(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..200)) {
        let mut engine = GameLogic::new(stage(seed));
        let mut game_over = false;
        for op in ops {
            let before: Vec<Direction> = engine.state().snakes.iter().map(|s| s.dir).collect();
            match op {
                Op::Input(input) => {
                    engine.input(input);
                }
                Op::Step => {
                    if engine.step() {
                        for (snake, prev) in engine.state().snakes.iter().zip(&before) {
                            prop_assert!(!snake.dir.is_opposite(*prev));
                        }
                    }
                }
                Op::Advance(ms) => {
                    engine.advance_time(ms);
                }
            }

            let state = engine.state();
            for snake in &state.snakes {
                prop_assert!(snake.pending_dirs.len() <= 2);
                prop_assert!(snake.tiles.len() <= snake.length);
            }
            if let Some(apple) = state.apple_pos {
                prop_assert!(!state.blocks.contains(&apple));
                prop_assert!(state.snakes.iter().all(|s| !s.tiles.contains(&apple)));
            }
            prop_assert!(state.speed >= 1 && state.speed <= 1000);
            // Once over, always over
            prop_assert!(!game_over || state.game_over);
            game_over = state.game_over;
        }
    }

    #[test]
    fn same_ops_same_states(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..120)) {
        let mut a = GameLogic::new(stage(seed));
        let mut b = GameLogic::new(stage(seed));
        for op in ops {
            match op {
                Op::Input(input) => prop_assert_eq!(a.input(input), b.input(input)),
                Op::Step => prop_assert_eq!(a.step(), b.step()),
                Op::Advance(ms) => prop_assert_eq!(a.advance_time(ms), b.advance_time(ms)),
            }
            prop_assert_eq!(a.state(), b.state());
        }
    }

    #[test]
    fn playback_is_independent_of_chunking(
        seed in any::<u64>(),
        script in prop::collection::vec((0u64..300, game_input()), 1..40),
        chunks in prop::collection::vec(1u64..250, 1..20),
    ) {
        let mut live = Handler::live(stage(seed), Vec::new());
        for (delay, input) in &script {
            live.advance_time(*delay);
            live.perform_input(*input);
        }
        let total = live.engine().total_duration();

        let mut playback = Handler::playback(stage(seed), live.saved_inputs().to_vec());
        let mut elapsed = 0;
        for &chunk in chunks.iter().cycle() {
            if elapsed >= total {
                break;
            }
            let chunk = chunk.min(total - elapsed);
            playback.advance_time(chunk);
            elapsed += chunk;
        }
        // Inputs logged at 0ms still need one call to be applied
        playback.advance_time(0);

        prop_assert!(playback.is_done());
        prop_assert_eq!(playback.engine().total_duration(), total);
        prop_assert_eq!(playback.state(), live.state());

        let mut resumed = Handler::live(stage(seed), live.saved_inputs().to_vec());
        resumed.advance_time(total - resumed.engine().total_duration());
        prop_assert_eq!(resumed.state(), live.state());
    }
}
