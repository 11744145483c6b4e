//! Collision rules for the ball
//!
//! Rules are evaluated in priority order per axis. On the x-axis only the
//! first matching rule fires (paddle, then right wall, then the open left
//! edge). The y-axis is evaluated independently with the same first-match
//! policy (top, then bottom).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::WorldState;
use crate::tuning::Tuning;

/// A named collision rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionRule {
    /// Ball touches the paddle face while moving left
    PaddleHit,
    /// Ball reaches the right wall while moving right
    RightWall,
    /// Ball left the arena through the open left edge
    LeftExit,
    /// Ball reaches the top wall while moving up
    TopWall,
    /// Ball reaches the bottom wall while moving down
    BottomWall,
}

/// X-axis rules in priority order
pub const X_AXIS_RULES: [CollisionRule; 3] = [
    CollisionRule::PaddleHit,
    CollisionRule::RightWall,
    CollisionRule::LeftExit,
];

/// Y-axis rules in priority order
pub const Y_AXIS_RULES: [CollisionRule; 2] = [CollisionRule::TopWall, CollisionRule::BottomWall];

impl CollisionRule {
    /// Does this rule fire for the current state?
    pub fn applies(self, state: &WorldState, tuning: &Tuning) -> bool {
        let ball = &state.ball;
        match self {
            CollisionRule::PaddleHit => {
                let diff = (state.paddle.pos.y - ball.pos.y).abs();
                diff <= tuning.paddle_height / 2.0
                    && tuning.paddle_hit_zone.contains(ball.pos.x)
                    && ball.vel.x < 0.0
            }
            CollisionRule::RightWall => {
                ball.pos.x >= tuning.arena_width - tuning.wall_thickness && ball.vel.x > 0.0
            }
            CollisionRule::LeftExit => ball.pos.x <= 0.0,
            CollisionRule::TopWall => ball.pos.y <= tuning.wall_thickness && ball.vel.y < 0.0,
            CollisionRule::BottomWall => {
                ball.pos.y >= tuning.arena_height - tuning.wall_thickness && ball.vel.y > 0.0
            }
        }
    }

    /// Surface normal pointing back into the arena, if the rule reflects
    pub fn normal(self) -> Option<Vec2> {
        match self {
            CollisionRule::PaddleHit => Some(Vec2::X),
            CollisionRule::RightWall => Some(Vec2::NEG_X),
            CollisionRule::LeftExit => None,
            CollisionRule::TopWall => Some(Vec2::Y),
            CollisionRule::BottomWall => Some(Vec2::NEG_Y),
        }
    }

    /// Apply the rule's response
    pub fn resolve(self, state: &mut WorldState) {
        match self.normal() {
            Some(normal) => state.ball.vel = reflect_velocity(state.ball.vel, normal),
            None => state.running = false,
        }
    }
}

/// Rules that fired during one resolution pass (at most one per axis)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collisions {
    pub x: Option<CollisionRule>,
    pub y: Option<CollisionRule>,
}

impl Collisions {
    pub fn iter(&self) -> impl Iterator<Item = CollisionRule> {
        self.x.into_iter().chain(self.y)
    }
}

/// First rule in `rules` that applies
fn first_match(rules: &[CollisionRule], state: &WorldState, tuning: &Tuning) -> Option<CollisionRule> {
    rules.iter().copied().find(|rule| rule.applies(state, tuning))
}

/// Evaluate both axes and apply the winning rules
pub fn resolve_collisions(state: &mut WorldState, tuning: &Tuning) -> Collisions {
    let x = first_match(&X_AXIS_RULES, state, tuning);
    if let Some(rule) = x {
        rule.resolve(state);
    }

    let y = first_match(&Y_AXIS_RULES, state, tuning);
    if let Some(rule) = y {
        rule.resolve(state);
    }

    Collisions { x, y }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n. For the axis-aligned normals used
/// here this is an exact sign flip of one component.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
