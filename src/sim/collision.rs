//! Collision tests between the ball and paddles
//!
//! The ball is treated as its bounding box against the paddle's rectangle,
//! which is all the classic game ever needed.

use super::state::{Ball, Paddle};

/// Check whether the ball overlaps a paddle
///
/// Strict inequalities: touching edges do not count as a hit.
#[inline]
pub fn overlaps(paddle: &Paddle, ball: &Ball) -> bool {
    ball.right() > paddle.x
        && ball.left() < paddle.right()
        && ball.bottom() > paddle.y
        && ball.top() < paddle.bottom()
}

/// Where on the paddle the ball struck, in `[-1, 1]`
///
/// -1 is the top edge, 0 the center, 1 the bottom edge.
#[inline]
pub fn hit_offset(paddle: &Paddle, ball: &Ball) -> f32 {
    let half = paddle.height / 2.0;
    ((ball.pos.y - paddle.center_y()) / half).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn paddle() -> Paddle {
        Paddle {
            x: 20.0,
            y: 200.0,
            width: 14.0,
            height: 80.0,
            speed: 5.0,
            score: 0,
        }
    }

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball::new(Vec2::new(x, y), Vec2::ZERO, 10.0)
    }

    #[test]
    fn test_overlap_inside() {
        assert!(overlaps(&paddle(), &ball_at(30.0, 240.0)));
    }

    #[test]
    fn test_overlap_edges() {
        let p = paddle();

        // Grazing the right face by one unit
        assert!(overlaps(&p, &ball_at(43.0, 240.0)));
        // Exactly touching the right face
        assert!(!overlaps(&p, &ball_at(44.0, 240.0)));
        // Exactly touching the left face
        assert!(!overlaps(&p, &ball_at(10.0, 240.0)));
        // Exactly touching top and bottom
        assert!(!overlaps(&p, &ball_at(27.0, 190.0)));
        assert!(!overlaps(&p, &ball_at(27.0, 290.0)));
        // Clipping a corner of the bounding box
        assert!(overlaps(&p, &ball_at(43.0, 191.0)));
    }

    #[test]
    fn test_overlap_miss() {
        let p = paddle();
        assert!(!overlaps(&p, &ball_at(400.0, 240.0)));
        assert!(!overlaps(&p, &ball_at(27.0, 20.0)));
    }

    #[test]
    fn test_hit_offset() {
        let p = paddle();
        assert_eq!(hit_offset(&p, &ball_at(30.0, 240.0)), 0.0);
        assert_eq!(hit_offset(&p, &ball_at(30.0, 200.0)), -1.0);
        assert_eq!(hit_offset(&p, &ball_at(30.0, 280.0)), 1.0);
        assert_eq!(hit_offset(&p, &ball_at(30.0, 260.0)), 0.5);
        // Ball center beyond the paddle edge still reports the edge
        assert_eq!(hit_offset(&p, &ball_at(30.0, 195.0)), -1.0);
    }
}
