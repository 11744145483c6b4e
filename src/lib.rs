//! Bounce Pong - a single-paddle bounce toy on a fixed-timestep loop
//!
//! Core modules:
//! - `sim`: Pure simulation (world state, paddle/ball motion, collision rules)
//! - `game`: The loop driver (input polling, frame pacing, rendering, shutdown)
//! - `platform`: Window/input/clock collaborator and its winit backend
//! - `renderer`: Draw-call surface (`Canvas`) and its wgpu backend
//! - `tuning`: Compiled-in layout and physics parameters

pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{Game, StopReason};
pub use platform::{InitError, Platform};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Window title
    pub const WINDOW_TITLE: &str = "Pong";
    /// Top-left corner of the window on the desktop
    pub const WINDOW_X: i32 = 100;
    pub const WINDOW_Y: i32 = 100;

    /// Arena dimensions (the window is exactly the arena)
    pub const ARENA_WIDTH: f32 = 1024.0;
    pub const ARENA_HEIGHT: f32 = 768.0;

    /// Thickness of walls, paddle width and ball size
    pub const WALL_THICKNESS: f32 = 15.0;

    /// Paddle defaults - sits at the open left edge
    pub const PADDLE_X: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Paddle speed (pixels/s)
    pub const PADDLE_SPEED: f32 = 300.0;
    /// Ball x-range in which the paddle face returns it
    pub const PADDLE_HIT_ZONE: (f32, f32) = (20.0, 25.0);

    /// Initial ball velocity (pixels/s), leftward and downward
    pub const BALL_START_VEL: (f32, f32) = (-200.0, 235.0);

    /// Minimum time between frames (~60 Hz)
    pub const FRAME_INTERVAL_MS: u64 = 16;
    /// Largest step the simulation will take in one frame
    pub const MAX_DELTA: f32 = 0.05;

    /// Background and foreground colors (RGBA)
    pub const BACKGROUND_RGBA: [u8; 4] = [39, 58, 93, 255];
    pub const FOREGROUND_RGBA: [u8; 4] = [255, 255, 255, 255];
}
