//! Classic Pong - two paddles, one ball, a reactive computer opponent
//!
//! Core modules:
//! - `sim`: Per-tick simulation (input, paddles, ball, collisions, scoring)
//! - `renderer`: Draw-command generation and the Canvas 2D backend
//! - `score`: Score display sinks
//! - `game_loop`: Stoppable frame driver tying the pieces together
//! - `settings`: Data-driven tuning and palette

pub mod game_loop;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod sim;

pub use game_loop::{GameLoop, StopHandle};
pub use score::ScoreSink;
pub use settings::{Settings, SettingsError};

/// Classic tuning values (one tick = one animation frame)
pub mod consts {
    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 14.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    /// Gap between a paddle and its side wall
    pub const PADDLE_INSET: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Kept at or below `PLAYER_SPEED` so the computer can be beaten
    pub const OPPONENT_SPEED: f32 = 4.0;
    /// Tracking error the opponent ignores
    pub const OPPONENT_DEAD_ZONE: f32 = 4.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Horizontal speed of every serve
    pub const SERVE_SPEED: f32 = 5.0;
    /// Serve vertical speed is drawn from [-SERVE_SPREAD, SERVE_SPREAD]
    pub const SERVE_SPREAD: f32 = 3.0;
    /// Vertical speed after hitting a paddle's very edge
    pub const DEFLECTION: f32 = 5.0;

    /// Pending input events held between ticks
    pub const INPUT_MAILBOX_CAPACITY: usize = 64;
}

/// Clamp a paddle's top edge into `[0, field_height - paddle_height]`
#[inline]
pub fn clamp_paddle_y(y: f32, paddle_height: f32, field_height: f32) -> f32 {
    y.clamp(0.0, (field_height - paddle_height).max(0.0))
}
