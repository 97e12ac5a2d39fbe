//! Per-frame simulation tick
//!
//! Core game step. One call advances everything by one animation frame, in a
//! fixed order: player, opponent, ball, walls, paddles, scoring.

use super::collision::{hit_offset, overlaps};
use super::input::InputMailbox;
use super::opponent::OpponentController;
use super::state::{Ball, Field, GameState, Paddle, Side};

/// What happened during a tick (for sinks, sound, logging)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Side that won a point this tick
    pub scored: Option<Side>,
    /// Ball bounced off the top or bottom wall
    pub wall_bounce: bool,
    pub player_hit: bool,
    pub computer_hit: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, mailbox: &mut InputMailbox) -> TickEvents {
    let mut events = TickEvents::default();
    state.time_ticks += 1;

    // Pointer moves land first, then held keys nudge on top; one clamp each
    mailbox.drain_into(&mut state.player, &mut state.intent, &state.field);
    let key_dy = state.intent.key_delta(state.player.speed);
    state.player.move_by(key_dy, &state.field);

    OpponentController::new(state.tuning.opponent_dead_zone).update(
        &mut state.computer,
        &state.ball,
        &state.field,
    );

    state.ball.advance();
    events.wall_bounce = bounce_off_walls(&mut state.ball, &state.field);

    // Both paddles are tested every tick
    let k = state.tuning.deflection;
    events.player_hit = bounce_off_paddle(&mut state.ball, &state.player, Side::Player, k);
    events.computer_hit = bounce_off_paddle(&mut state.ball, &state.computer, Side::Computer, k);

    if state.ball.left() < 0.0 {
        events.scored = Some(award_point(state, Side::Computer));
    } else if state.ball.right() > state.field.width {
        events.scored = Some(award_point(state, Side::Player));
    }

    events
}

/// Reflect off the top/bottom walls, keeping the ball inside the field
fn bounce_off_walls(ball: &mut Ball, field: &Field) -> bool {
    if ball.top() < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y;
        true
    } else if ball.bottom() > field.height {
        ball.pos.y = field.height - ball.radius;
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// Bounce off `paddle` if touching it
///
/// The ball is placed flush against the paddle's face toward the center of the
/// field, `dx` keeps its magnitude but points away from the paddle, and `dy`
/// depends on where along the paddle the ball struck.
fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, side: Side, deflection: f32) -> bool {
    if !overlaps(paddle, ball) {
        return false;
    }

    ball.pos.x = match side {
        Side::Player => paddle.right() + ball.radius,
        Side::Computer => paddle.x - ball.radius,
    };
    ball.vel.x = ball.vel.x.abs() * side.other().direction();
    ball.vel.y = deflection * hit_offset(paddle, ball);
    true
}

/// Credit `scorer` and serve toward the side that lost the point
fn award_point(state: &mut GameState, scorer: Side) -> Side {
    let paddle = state.paddle_mut(scorer);
    paddle.score = paddle.score.saturating_add(1);

    let score = state.score();
    log::debug!(
        "{:?} scores: player {} - computer {}",
        scorer,
        score.player,
        score.computer
    );

    state.reset_ball(Some(scorer.other()));
    scorer
}
