//! Simulation step
//!
//! Advances the world by an explicit `dt`. Nothing here waits on the clock;
//! real-time pacing lives in [`crate::game::pacing`].

use serde::{Deserialize, Serialize};

use super::collision::{Collisions, resolve_collisions};
use super::state::{PaddleDirection, WorldState};
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Net direction from the held up/down keys
    pub paddle_direction: PaddleDirection,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub collisions: Collisions,
}

/// Convert an elapsed tick count to seconds, bounded by `max_delta`
#[inline]
pub fn clamp_delta(elapsed_ms: u64, max_delta: f32) -> f32 {
    (elapsed_ms as f32 / 1000.0).min(max_delta)
}

/// Advance the world state by `dt` seconds
pub fn tick(state: &mut WorldState, input: &TickInput, dt: f32, tuning: &Tuning) -> TickReport {
    state.paddle_direction = input.paddle_direction;
    state.paddle.move_by(input.paddle_direction, dt, tuning);

    state.ball.integrate(dt);

    let collisions = resolve_collisions(state, tuning);
    for rule in collisions.iter() {
        log::debug!("collision {:?} at {:?}", rule, state.ball.pos);
    }

    TickReport { collisions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CollisionRule;
    use glam::Vec2;
    use proptest::prelude::*;

    const DOWN: TickInput = TickInput {
        paddle_direction: PaddleDirection::Down,
    };

    fn fresh() -> (WorldState, Tuning) {
        let tuning = Tuning::default();
        (WorldState::new(&tuning), tuning)
    }

    #[test]
    fn test_clamp_delta() {
        assert_eq!(clamp_delta(16, 0.05), 0.016);
        assert_eq!(clamp_delta(50, 0.05), 0.05);
        assert_eq!(clamp_delta(5_000, 0.05), 0.05);
        assert_eq!(clamp_delta(0, 0.05), 0.0);
    }

    #[test]
    fn test_ball_bounces_off_paddle() {
        let (mut state, tuning) = fresh();
        state.ball.pos = Vec2::new(22.0, state.paddle.pos.y);
        state.ball.vel = Vec2::new(-200.0, 235.0);

        // Small step so the ball is still inside the hit zone after moving
        let report = tick(&mut state, &TickInput::default(), 0.005, &tuning);
        assert_eq!(report.collisions.x, Some(CollisionRule::PaddleHit));
        assert_eq!(state.ball.vel.x, 200.0);
        assert!(state.running);
    }

    #[test]
    fn test_ball_bounces_off_right_wall() {
        let (mut state, tuning) = fresh();
        state.ball.pos = Vec2::new(tuning.arena_width - tuning.wall_thickness, 400.0);
        state.ball.vel = Vec2::new(200.0, 235.0);

        tick(&mut state, &TickInput::default(), 0.016, &tuning);
        assert_eq!(state.ball.vel.x, -200.0);
    }

    #[test]
    fn test_ball_past_left_edge_ends_run() {
        let (mut state, tuning) = fresh();
        state.ball.pos = Vec2::new(0.0, 600.0);
        state.ball.vel = Vec2::new(-200.0, -235.0);

        let report = tick(&mut state, &TickInput::default(), 0.016, &tuning);
        assert_eq!(report.collisions.x, Some(CollisionRule::LeftExit));
        assert!(!state.running);
    }

    #[test]
    fn test_ball_at_left_edge_ends_run_for_any_velocity_without_motion() {
        for vel in [Vec2::new(200.0, 235.0), Vec2::new(-200.0, 235.0), Vec2::ZERO] {
            let (mut state, tuning) = fresh();
            state.ball.pos = Vec2::new(0.0, 300.0);
            state.ball.vel = vel;
            tick(&mut state, &TickInput::default(), 0.0, &tuning);
            assert!(!state.running, "velocity {vel:?}");
        }
    }

    #[test]
    fn test_ball_bounces_off_top_and_bottom() {
        let (mut state, tuning) = fresh();
        state.ball.pos = Vec2::new(500.0, tuning.wall_thickness);
        state.ball.vel = Vec2::new(200.0, -235.0);
        tick(&mut state, &TickInput::default(), 0.016, &tuning);
        assert_eq!(state.ball.vel.y, 235.0);

        let (mut state, tuning) = fresh();
        state.ball.pos = Vec2::new(500.0, tuning.arena_height - tuning.wall_thickness);
        state.ball.vel = Vec2::new(200.0, 235.0);
        tick(&mut state, &TickInput::default(), 0.016, &tuning);
        assert_eq!(state.ball.vel.y, -235.0);
    }

    #[test]
    fn test_holding_down_stops_exactly_at_bottom_limit() {
        let (mut state, tuning) = fresh();
        // Keep the ball out of the way so the run does not end
        for _ in 0..200 {
            state.ball.pos = tuning.arena_center();
            tick(&mut state, &DOWN, 0.016, &tuning);
            assert!(state.paddle.pos.y <= tuning.paddle_max_y());
        }
        assert_eq!(state.paddle.pos.y, 703.0);
        assert_eq!(state.paddle_direction, PaddleDirection::Down);
    }

    #[test]
    fn test_paddle_speed() {
        let (mut state, tuning) = fresh();
        let start = state.paddle.pos.y;
        let up = TickInput {
            paddle_direction: PaddleDirection::Up,
        };
        tick(&mut state, &up, 0.01, &tuning);
        assert!((state.paddle.pos.y - (start - 3.0)).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_band(
            steps in prop::collection::vec(
                (prop::sample::select(vec![
                    PaddleDirection::Up,
                    PaddleDirection::Still,
                    PaddleDirection::Down,
                ]), 0.0f32..0.05),
                1..400,
            )
        ) {
            let (mut state, tuning) = fresh();
            for (direction, dt) in steps {
                let input = TickInput { paddle_direction: direction };
                tick(&mut state, &input, dt, &tuning);
                prop_assert!(state.paddle.pos.y >= tuning.paddle_min_y());
                prop_assert!(state.paddle.pos.y <= tuning.paddle_max_y());
            }
        }

        #[test]
        fn prop_still_paddle_does_not_move(y in 65.0f32..703.0, dt in 0.0f32..10.0) {
            let (mut state, tuning) = fresh();
            state.paddle.pos.y = y;
            tick(&mut state, &TickInput::default(), dt, &tuning);
            prop_assert_eq!(state.paddle.pos.y, y);
        }

        #[test]
        fn prop_speed_constant_over_run(dts in prop::collection::vec(0.0f32..0.05, 1..600)) {
            let (mut state, tuning) = fresh();
            let start = state.ball.vel;
            for dt in dts {
                tick(&mut state, &TickInput::default(), dt, &tuning);
                prop_assert_eq!(state.ball.vel.x.abs(), start.x.abs());
                prop_assert_eq!(state.ball.vel.y.abs(), start.y.abs());
                if !state.running {
                    break;
                }
            }
        }

        #[test]
        fn prop_delta_never_exceeds_max(elapsed in any::<u64>()) {
            prop_assert!(clamp_delta(elapsed, 0.05) <= 0.05);
        }
    }
}
