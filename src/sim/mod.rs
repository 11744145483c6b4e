//! Simulation module
//!
//! All gameplay logic lives here. It must stay pure:
//! - Time only enters as an explicit `dt`
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionRule, Collisions, X_AXIS_RULES, Y_AXIS_RULES, reflect_velocity, resolve_collisions,
};
pub use state::{Ball, Paddle, PaddleDirection, WorldState};
pub use tick::{TickInput, TickReport, clamp_delta, tick};
