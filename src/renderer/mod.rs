//! Rendering module
//!
//! The loop only talks to a [`Canvas`]: pick a color, clear, fill rectangles,
//! present. `WgpuCanvas` is the GPU-backed implementation used by the window.

pub mod pipeline;
pub mod scene;
pub mod vertex;

use serde::{Deserialize, Serialize};

pub use pipeline::WgpuCanvas;
pub use scene::draw_world;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_rgba([255, 255, 255, 255]);

    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self {
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: rgba[3],
        }
    }

    /// Normalized sRGB components
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Linear components for an sRGB render target (alpha stays linear)
    pub fn to_linear(self) -> [f32; 4] {
        let [r, g, b, a] = self.to_f32();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Axis-aligned rectangle in arena pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Immediate-mode draw target
pub trait Canvas {
    /// Color used by the following `clear` and `fill_rect` calls
    fn set_draw_color(&mut self, color: Color);
    /// Fill the whole frame with the current draw color
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect);
    /// Show the frame
    fn present(&mut self);
}
