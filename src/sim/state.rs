//! World state and core simulation types
//!
//! Everything the loop mutates between frames lives in [`WorldState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Net vertical movement command for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleDirection {
    /// Toward y = 0
    Up,
    #[default]
    Still,
    /// Toward y = arena height
    Down,
}

impl PaddleDirection {
    /// Combine held keys additively: both or neither cancel out
    pub fn from_keys(up: bool, down: bool) -> Self {
        match (up, down) {
            (true, false) => PaddleDirection::Up,
            (false, true) => PaddleDirection::Down,
            _ => PaddleDirection::Still,
        }
    }

    /// -1, 0 or +1
    pub fn signum(self) -> i8 {
        match self {
            PaddleDirection::Up => -1,
            PaddleDirection::Still => 0,
            PaddleDirection::Down => 1,
        }
    }
}

/// The player's paddle (position is its center)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
}

impl Paddle {
    /// Move along y and clamp into the legal band (no bounce at the ends)
    pub fn move_by(&mut self, direction: PaddleDirection, dt: f32, tuning: &Tuning) {
        if direction == PaddleDirection::Still {
            return;
        }
        self.pos.y += f32::from(direction.signum()) * tuning.paddle_speed * dt;
        self.pos.y = self.pos.y.clamp(tuning.paddle_min_y(), tuning.paddle_max_y());
    }
}

/// The ball (position is its center)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    /// Explicit Euler step, no sub-stepping
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// Complete world state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub paddle: Paddle,
    pub ball: Ball,
    /// Intent applied during the most recent tick
    pub paddle_direction: PaddleDirection,
    /// Cleared by quit, escape, or the ball leaving through the left edge
    pub running: bool,
    /// Platform tick (ms) at which the previous frame was measured
    pub last_tick_ms: u64,
}

impl WorldState {
    /// Starting layout: paddle centered on the left margin, ball in the middle
    pub fn new(tuning: &Tuning) -> Self {
        let center = tuning.arena_center();
        Self {
            paddle: Paddle {
                pos: Vec2::new(tuning.paddle_x, center.y),
            },
            ball: Ball {
                pos: center,
                vel: tuning.ball_start_vel,
            },
            paddle_direction: PaddleDirection::Still,
            running: true,
            last_tick_ms: 0,
        }
    }
}
