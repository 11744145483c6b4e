//! Scene drawing: walls, paddle and ball as filled rectangles

use super::{Canvas, Rect};
use crate::sim::WorldState;
use crate::tuning::Tuning;

/// The three arena walls: top, bottom, right (the left edge is open)
pub fn wall_rects(tuning: &Tuning) -> [Rect; 3] {
    let w = tuning.arena_width as i32;
    let h = tuning.arena_height as i32;
    let t = tuning.wall_thickness as i32;
    [
        Rect::new(0, 0, w as u32, t as u32),
        Rect::new(0, h - t, w as u32, t as u32),
        Rect::new(w - t, 0, t as u32, h as u32),
    ]
}

/// Paddle rect: left edge at the paddle x, vertically centered on its y
pub fn paddle_rect(state: &WorldState, tuning: &Tuning) -> Rect {
    let pos = state.paddle.pos;
    Rect::new(
        pos.x as i32,
        (pos.y - tuning.paddle_height / 2.0) as i32,
        tuning.wall_thickness as u32,
        tuning.paddle_height as u32,
    )
}

/// Ball rect: a square one wall-thickness wide, centered on the ball
pub fn ball_rect(state: &WorldState, tuning: &Tuning) -> Rect {
    let t = tuning.wall_thickness as i32;
    // Integer half-thickness, so the square sits a half pixel up-left of center
    let half = (t / 2) as f32;
    let pos = state.ball.pos;
    Rect::new(
        (pos.x - half) as i32,
        (pos.y - half) as i32,
        t as u32,
        t as u32,
    )
}

/// Issue the full frame: clear to background, draw everything, present
pub fn draw_world(canvas: &mut impl Canvas, state: &WorldState, tuning: &Tuning) {
    canvas.set_draw_color(tuning.background);
    canvas.clear();

    canvas.set_draw_color(tuning.foreground);
    for wall in wall_rects(tuning) {
        canvas.fill_rect(wall);
    }
    canvas.fill_rect(paddle_rect(state, tuning));
    canvas.fill_rect(ball_rect(state, tuning));

    canvas.present();
}
