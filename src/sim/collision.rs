//! Collision detection and response for ball vs paddle
//!
//! The paddle is an axis-aligned box, the ball is tested by its bounding box.
//! Response is a Pong-style angled deflection: center hits go straight back,
//! edge hits leave at up to 45°.

use glam::Vec2;

use super::state::{Ball, Paddle};
use crate::consts::MAX_BOUNCE_ANGLE;

/// Check whether the ball overlaps the paddle (strict, touching edges miss)
pub fn ball_hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let (p_left, p_right) = (paddle.pos.x, paddle.pos.x + paddle.width);
    let (p_top, p_bottom) = (paddle.pos.y, paddle.pos.y + paddle.height);
    let (b_left, b_right) = (ball.pos.x - ball.radius, ball.pos.x + ball.radius);
    let (b_top, b_bottom) = (ball.pos.y - ball.radius, ball.pos.y + ball.radius);

    p_left < b_right && p_top < b_bottom && p_right > b_left && p_bottom > b_top
}

/// Where along the paddle the ball struck: 0 = center, -1/+1 = top/bottom edge.
///
/// The ball's radius lets its center sit slightly past either edge while still
/// overlapping, so the value is clamped.
pub fn hit_offset(ball_y: f32, paddle: &Paddle) -> f32 {
    let half = paddle.half_height();
    if half <= 0.0 {
        return 0.0;
    }
    ((ball_y - paddle.center_y()) / half).clamp(-1.0, 1.0)
}

/// New ball velocity after striking a paddle.
///
/// `direction` is +1 to send the ball right, -1 to send it left.
pub fn deflect(offset: f32, speed: f32, direction: f32) -> Vec2 {
    let angle = offset * MAX_BOUNCE_ANGLE;
    Vec2::new(direction * speed * angle.cos(), speed * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PADDLE_EDGE_MARGIN;

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            ..Default::default()
        }
    }

    fn paddle_at(y: f32) -> Paddle {
        let mut paddle = Paddle::new(PADDLE_EDGE_MARGIN);
        paddle.pos.y = y;
        paddle
    }

    #[test]
    fn test_overlap_detected() {
        // Paddle spans x 10..25, y 100..200
        let paddle = paddle_at(100.0);
        assert!(ball_hits_paddle(&ball_at(30.0, 150.0), &paddle));
        assert!(ball_hits_paddle(&ball_at(20.0, 95.0), &paddle));
    }

    #[test]
    fn test_touching_edges_miss() {
        let paddle = paddle_at(100.0);
        // Ball left edge exactly on paddle right edge
        assert!(!ball_hits_paddle(&ball_at(35.0, 150.0), &paddle));
        // Ball bottom edge exactly on paddle top edge
        assert!(!ball_hits_paddle(&ball_at(20.0, 90.0), &paddle));
    }

    #[test]
    fn test_clear_miss() {
        let paddle = paddle_at(100.0);
        assert!(!ball_hits_paddle(&ball_at(200.0, 150.0), &paddle));
        assert!(!ball_hits_paddle(&ball_at(20.0, 300.0), &paddle));
    }

    #[test]
    fn test_hit_offset_range() {
        let paddle = paddle_at(100.0);
        assert_eq!(hit_offset(150.0, &paddle), 0.0);
        assert_eq!(hit_offset(100.0, &paddle), -1.0);
        assert_eq!(hit_offset(200.0, &paddle), 1.0);
        assert_eq!(hit_offset(175.0, &paddle), 0.5);
        // Past the edge but still overlapping by radius
        assert_eq!(hit_offset(208.0, &paddle), 1.0);
    }

    #[test]
    fn test_center_hit_goes_straight() {
        let vel = deflect(0.0, 7.0, 1.0);
        assert_eq!(vel, Vec2::new(7.0, 0.0));
    }

    #[test]
    fn test_edge_hit_deflects_45_degrees() {
        let vel = deflect(1.0, 10.0, -1.0);
        let expected = 10.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!((vel.x + expected).abs() < 1e-4);
        assert!((vel.y - expected).abs() < 1e-4);
        assert!((vel.length() - 10.0).abs() < 1e-4);
    }
}
