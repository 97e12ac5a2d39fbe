//! Computer opponent
//!
//! Proportional tracking with a dead zone: aim the paddle center at the ball's
//! current height, step at a fixed speed, no prediction.

use super::state::{Ball, Field, Paddle};

/// Vertical step the opponent wants this tick (0, `speed` or `-speed`)
pub fn track_ball(paddle: &Paddle, ball: &Ball, dead_zone: f32) -> f32 {
    let target = ball.pos.y - paddle.height / 2.0;
    let delta = target - paddle.y;
    if delta.abs() > dead_zone {
        delta.signum() * paddle.speed
    } else {
        0.0
    }
}

/// Memoryless controller for the computer paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpponentController {
    pub dead_zone: f32,
}

impl OpponentController {
    pub fn new(dead_zone: f32) -> Self {
        Self { dead_zone }
    }

    /// Move `paddle` one tick toward the ball and clamp it
    pub fn update(&self, paddle: &mut Paddle, ball: &Ball, field: &Field) {
        let dy = track_ball(paddle, ball, self.dead_zone);
        paddle.move_by(dy, field);
    }
}
