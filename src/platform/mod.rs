//! Platform abstraction layer
//!
//! The loop's only collaborator. It provides:
//! - Time/ticks
//! - Input events and keyboard snapshots
//! - A [`Canvas`] to draw into
//! - Teardown of the window and windowing subsystem

pub mod input;
pub mod native;

use std::time::Duration;

use crate::renderer::{Canvas, Color};

pub use input::{InputBindings, Key, KeyboardState};
pub use native::WinitPlatform;

/// Failure to bring up the window/renderer collaborator. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Unable to initialize windowing subsystem: {0}")]
    Subsystem(String),
    #[error("Failed to create window: {0}")]
    Window(String),
    #[error("Failed to create renderer: {0}")]
    Renderer(String),
}

/// Queued platform events the loop cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The window was closed
    Quit,
}

/// Parameters for the window the platform opens
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    /// Top-left corner on the desktop
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Shown until the first frame is drawn
    pub clear_color: Color,
}

/// Monotonic millisecond tick counter
pub trait Clock {
    /// Milliseconds since the platform was initialized
    fn ticks(&self) -> u64;

    /// Block for roughly `ms` milliseconds
    fn delay(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Window, input and rendering collaborator
pub trait Platform: Clock {
    type Canvas: Canvas;

    /// Next pending event, without blocking
    fn poll_event(&mut self) -> Option<Event>;

    /// Keys held right now (level-triggered)
    fn keyboard_state(&self) -> KeyboardState;

    fn canvas(&mut self) -> &mut Self::Canvas;

    /// Release the renderer, the window and the subsystem, in that order
    fn shutdown(self);
}
