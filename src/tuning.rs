//! Layout and physics parameters
//!
//! Every value is fixed for the lifetime of a run. `Tuning::default()` is the
//! compiled-in layout from [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::{InputBindings, WindowConfig};
use crate::renderer::Color;

/// Inclusive x-range in which the ball counts as touching the paddle face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitZone {
    pub min_x: f32,
    pub max_x: f32,
}

impl HitZone {
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        x >= self.min_x && x <= self.max_x
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub window_title: String,
    pub window_pos: (i32, i32),

    pub arena_width: f32,
    pub arena_height: f32,
    pub wall_thickness: f32,

    pub paddle_x: f32,
    pub paddle_height: f32,
    /// Pixels per second while a direction key is held
    pub paddle_speed: f32,
    pub paddle_hit_zone: HitZone,

    pub ball_start_vel: Vec2,

    /// Frame floor in milliseconds
    pub frame_interval_ms: u64,
    /// Upper bound on a single step, in seconds
    pub max_delta: f32,

    pub background: Color,
    pub foreground: Color,

    pub bindings: InputBindings,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_title: WINDOW_TITLE.to_string(),
            window_pos: (WINDOW_X, WINDOW_Y),
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            paddle_x: PADDLE_X,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_hit_zone: HitZone {
                min_x: PADDLE_HIT_ZONE.0,
                max_x: PADDLE_HIT_ZONE.1,
            },
            ball_start_vel: Vec2::new(BALL_START_VEL.0, BALL_START_VEL.1),
            frame_interval_ms: FRAME_INTERVAL_MS,
            max_delta: MAX_DELTA,
            background: Color::from_rgba(BACKGROUND_RGBA),
            foreground: Color::from_rgba(FOREGROUND_RGBA),
            bindings: InputBindings::default(),
        }
    }
}

impl Tuning {
    /// Lowest legal paddle center
    #[inline]
    pub fn paddle_min_y(&self) -> f32 {
        self.paddle_height / 2.0 + self.wall_thickness
    }

    /// Highest legal paddle center
    #[inline]
    pub fn paddle_max_y(&self) -> f32 {
        self.arena_height - self.paddle_height / 2.0 - self.wall_thickness
    }

    /// Center of the arena
    pub fn arena_center(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    /// Window the platform should open for this layout
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            title: self.window_title.clone(),
            x: self.window_pos.0,
            y: self.window_pos.1,
            width: self.arena_width as u32,
            height: self.arena_height as u32,
            clear_color: self.background,
        }
    }
}
