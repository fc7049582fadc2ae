//! Invariants over whole games driven by generated seeds and move sequences.
//!
//! Each case plays a rollout and checks after every tick that:
//! - segments stay distinct and on the board,
//! - food never sits under the snake while the game is live,
//! - length is always score + 1,
//! - the heading never flips to its reverse in one tick.

use auto_snake::game::{Direction, GameConfig, GameEngine, GameState, StepOutcome};
use auto_snake::session::GameSession;
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::HashSet;

fn any_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn assert_consistent(state: &GameState) {
    let segments: HashSet<_> = state.snake.body.iter().copied().collect();
    assert_eq!(segments.len(), state.snake.len(), "segments overlap");
    for segment in &state.snake.body {
        assert!(state.is_in_bounds(*segment), "segment {segment:?} off the board");
    }
    assert_eq!(state.snake.len(), state.score as usize + 1);
    if !state.game_over {
        assert!(state.is_in_bounds(state.food));
        assert!(!state.is_occupied_by_snake(state.food));
    }
}

proptest! {
    #[test]
    fn manual_rollouts_keep_invariants(
        seed in any::<u64>(),
        grid_size in 4usize..12,
        moves in prop::collection::vec(prop::option::of(any_direction()), 1..200),
    ) {
        let config = GameConfig::new(grid_size);
        let mut engine = GameEngine::with_rng(config, StdRng::seed_from_u64(seed)).unwrap();
        let mut state = engine.reset();

        for requested in moves {
            let before = state.direction();
            let result = engine.step(&mut state, requested);

            prop_assert_ne!(result.direction, before.opposite());
            assert_consistent(&state);
            if result.terminated {
                prop_assert!(matches!(
                    result.outcome,
                    StepOutcome::Collided | StepOutcome::BoardFilled
                ));
                break;
            }
        }
    }

    #[test]
    fn autopilot_rollouts_keep_invariants(
        seed in any::<u64>(),
        grid_size in 4usize..10,
        ticks in 1usize..500,
    ) {
        let config = GameConfig {
            autopilot: true,
            ..GameConfig::new(grid_size).with_seed(seed)
        };
        let mut session = GameSession::new(config).unwrap();

        for _ in 0..ticks {
            let before = session.state().direction();
            let result = session.tick();

            prop_assert_ne!(result.direction, before.opposite());
            assert_consistent(session.state());
            if session.is_over() {
                break;
            }
        }
    }

    #[test]
    fn seeded_games_replay_identically(
        seed in any::<u64>(),
        moves in prop::collection::vec(prop::option::of(any_direction()), 1..100),
    ) {
        let play = |moves: &[Option<Direction>]| {
            let mut engine = GameEngine::new(GameConfig::small().with_seed(seed)).unwrap();
            let mut state = engine.reset();
            for &requested in moves {
                engine.step(&mut state, requested);
            }
            state
        };

        prop_assert_eq!(play(moves.as_slice()), play(moves.as_slice()));
    }
}
