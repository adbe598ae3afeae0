//! Ball integration and wall reflection
//!
//! Per-tick explicit Euler: velocity picks up gravity first, then position
//! moves by the new velocity. Units are pixels and pixels/tick.

use super::state::Ball;
use crate::settings::SpeedBounds;

/// Advance the ball one tick under `gravity`
#[inline]
pub fn advance(ball: &mut Ball, gravity: f32) {
    ball.vel.y += gravity;
    ball.pos += ball.vel;
}

/// Keep |vx| inside `bounds` without changing its direction.
///
/// A ball with exactly zero horizontal speed is pushed rightward.
pub fn clamp_horizontal_speed(ball: &mut Ball, bounds: &SpeedBounds) {
    let vx = ball.vel.x;
    ball.vel.x = if vx < 0.0 {
        vx.min(-bounds.min).max(-bounds.max)
    } else {
        vx.max(bounds.min).min(bounds.max)
    };
}

/// Reflect off the side walls. Returns true if the ball bounced.
///
/// The ball is not pushed back inside; it can sit past a wall for a tick
/// and the next tick's motion carries it back.
pub fn reflect_walls(ball: &mut Ball, stage_width: f32) -> bool {
    let x = ball.pos.x;
    if x <= ball.size || x >= stage_width - ball.size {
        ball.vel.x = -ball.vel.x;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        Ball {
            pos,
            vel,
            size: 32.0,
        }
    }

    #[test]
    fn test_advance_applies_gravity_before_motion() {
        let mut ball = ball_at(Vec2::new(100.0, 100.0), Vec2::new(3.0, 5.0));
        advance(&mut ball, 0.5);
        assert_eq!(ball.vel, Vec2::new(3.0, 5.5));
        assert_eq!(ball.pos, Vec2::new(103.0, 105.5));
    }

    #[test]
    fn test_left_wall_reflects() {
        let mut ball = ball_at(Vec2::new(32.0, 100.0), Vec2::new(-4.0, 0.0));
        assert!(reflect_walls(&mut ball, 1280.0));
        assert_eq!(ball.vel.x, 4.0);
        // Position untouched
        assert_eq!(ball.pos.x, 32.0);
    }

    #[test]
    fn test_right_wall_reflects() {
        let mut ball = ball_at(Vec2::new(1250.0, 100.0), Vec2::new(4.0, 0.0));
        assert!(reflect_walls(&mut ball, 1280.0));
        assert_eq!(ball.vel.x, -4.0);
    }

    #[test]
    fn test_open_field_no_reflect() {
        let mut ball = ball_at(Vec2::new(640.0, 100.0), Vec2::new(4.0, 0.0));
        assert!(!reflect_walls(&mut ball, 1280.0));
        assert_eq!(ball.vel.x, 4.0);
    }

    #[test]
    fn test_clamp_keeps_sign() {
        let bounds = SpeedBounds { min: 2.0, max: 6.0 };

        let mut ball = ball_at(Vec2::ZERO, Vec2::new(-10.0, 0.0));
        clamp_horizontal_speed(&mut ball, &bounds);
        assert_eq!(ball.vel.x, -6.0);

        let mut ball = ball_at(Vec2::ZERO, Vec2::new(-0.5, 0.0));
        clamp_horizontal_speed(&mut ball, &bounds);
        assert_eq!(ball.vel.x, -2.0);

        let mut ball = ball_at(Vec2::ZERO, Vec2::new(9.0, 0.0));
        clamp_horizontal_speed(&mut ball, &bounds);
        assert_eq!(ball.vel.x, 6.0);

        let mut ball = ball_at(Vec2::ZERO, Vec2::new(0.0, 0.0));
        clamp_horizontal_speed(&mut ball, &bounds);
        assert_eq!(ball.vel.x, 2.0);
    }
}
