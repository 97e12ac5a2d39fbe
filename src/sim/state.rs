//! Game state and entity records
//!
//! The simulation step is the only mutator of anything in here; renderers and
//! score sinks work from `&GameState` or a `Snapshot`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::PlayerIntent;
use crate::clamp_paddle_y;
use crate::consts::*;
use crate::settings::Settings;

/// Which end of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Human-controlled paddle on the left
    Player,
    /// Computer-controlled paddle on the right
    Computer,
}

impl Side {
    /// Sign of `dx` for a ball travelling toward this side
    pub fn direction(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Computer => 1.0,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }
}

/// The fixed play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A paddle; `x` never changes after construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Distance moved per tick
    pub speed: f32,
    /// Points won by this paddle's side
    pub score: u32,
}

impl Paddle {
    /// Create a paddle vertically centered in the field
    pub fn centered(x: f32, width: f32, height: f32, speed: f32, field: &Field) -> Self {
        Self {
            x,
            y: clamp_paddle_y(field.height / 2.0 - height / 2.0, height, field.height),
            width,
            height,
            speed,
            score: 0,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Shift vertically, then clamp into the field
    pub fn move_by(&mut self, dy: f32, field: &Field) {
        self.y = clamp_paddle_y(self.y + dy, self.height, field.height);
    }

    /// Center the paddle on `y` (pointer positioning), then clamp
    pub fn center_on(&mut self, y: f32, field: &Field) {
        self.y = clamp_paddle_y(y - self.height / 2.0, self.height, field.height);
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Euler step: one tick of travel
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Both scores, as pushed to the display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub computer: u32,
}

/// Per-session constants the simulation step reads every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub opponent_dead_zone: f32,
    pub deflection: f32,
    pub serve_speed: f32,
    pub serve_spread: f32,
}

/// Read-only copy of the game handed to observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub field: Field,
    pub player: Paddle,
    pub computer: Paddle,
    pub ball: Ball,
    pub score: Score,
    pub time_ticks: u64,
}

/// Complete game state
///
/// Reproducible from the seed passed to `new`/`with_settings`.
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: Field,
    pub tuning: Tuning,
    pub player: Paddle,
    pub computer: Paddle,
    pub ball: Ball,
    /// Held-key flags, updated when the input mailbox is drained
    pub intent: PlayerIntent,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a game with the classic tuning
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default())
    }

    /// Create a game from settings; the first serve goes to a random side
    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let field = settings.field();
        let player = Paddle::centered(
            settings.paddle_inset,
            settings.paddle_width,
            settings.paddle_height,
            settings.player_speed,
            &field,
        );
        let computer = Paddle::centered(
            field.width - settings.paddle_inset - settings.paddle_width,
            settings.paddle_width,
            settings.paddle_height,
            settings.opponent_speed,
            &field,
        );

        let mut state = Self {
            field,
            tuning: settings.tuning(),
            player,
            computer,
            ball: Ball::new(field.center(), Vec2::ZERO, settings.ball_radius),
            intent: PlayerIntent::default(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };

        state.reset_ball(None);
        state
    }

    /// Put the ball back on the center spot with a fresh serve
    ///
    /// `toward` is the side the serve travels to; `None` picks one at random.
    pub fn reset_ball(&mut self, toward: Option<Side>) {
        let direction = match toward {
            Some(side) => side.direction(),
            None if self.rng.random_bool(0.5) => 1.0,
            None => -1.0,
        };
        let spread: f32 = self.rng.random_range(-1.0..=1.0);

        self.ball.pos = self.field.center();
        self.ball.vel = Vec2::new(
            self.tuning.serve_speed * direction,
            self.tuning.serve_spread * spread,
        );

        log::debug!(
            "Serve toward {:?}: vel=({:.2}, {:.2})",
            toward,
            self.ball.vel.x,
            self.ball.vel.y
        );
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Player => &mut self.player,
            Side::Computer => &mut self.computer,
        }
    }

    pub fn score(&self) -> Score {
        Score {
            player: self.player.score,
            computer: self.computer.score,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            field: self.field,
            player: self.player.clone(),
            computer: self.computer.clone(),
            ball: self.ball.clone(),
            score: self.score(),
            time_ticks: self.time_ticks,
        }
    }
}
