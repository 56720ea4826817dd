//! Fixed-step simulation tick
//!
//! One call advances the playfield by exactly one logical step.

use super::collision::{ball_hits_paddle, deflect, hit_offset};
use super::state::{GameState, Side};
use crate::assets::PaddleModifier;
use crate::consts::*;

/// What happened during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Ball bounced off the top or bottom wall
    pub wall_bounce: bool,
    /// Side that scored this tick
    pub scored: Option<Side>,
    /// Paddle the ball was deflected by
    pub paddle_hit: Option<Side>,
    /// Side that reached the winning score; the state is now frozen
    pub winner: Option<Side>,
}

/// Advance the game state by one step.
///
/// The modifier is only consulted for the player's speed bonus; paddle
/// length and color are applied by the caller before stepping.
pub fn tick(state: &mut GameState, modifier: &PaddleModifier) -> TickReport {
    let mut report = TickReport::default();

    // Frozen until the next match resets the state
    if state.is_match_over() {
        return report;
    }

    state.time_ticks += 1;

    state.ball.pos += state.ball.vel;

    // Proportional follower, deliberately beatable
    let drift = state.ball.pos.y - state.computer.center_y();
    state.computer.pos.y += drift * COMPUTER_FOLLOW_RATE;

    let r = state.ball.radius;
    if state.ball.pos.y - r < 0.0 || state.ball.pos.y + r > state.height {
        state.ball.vel.y = -state.ball.vel.y;
        state.ball.pos.y = state.ball.pos.y.clamp(r, (state.height - r).max(r));
        report.wall_bounce = true;
    }

    let scorer = if state.ball.pos.x - r < 0.0 {
        Some(Side::Computer)
    } else if state.ball.pos.x + r > state.width {
        Some(Side::Player)
    } else {
        None
    };

    if let Some(side) = scorer {
        state.paddle_mut(side).score += 1;
        report.scored = Some(side);
        log::debug!(
            "Point to {} ({}-{})",
            side.as_str(),
            state.player.score,
            state.computer.score
        );

        if state.score(side) >= WINNING_SCORE {
            state.winner = Some(side);
            report.winner = Some(side);
            return report;
        }
        state.serve();
    }

    // Only the paddle the ball is heading toward can be struck
    let side = if state.ball.moving_left() {
        Side::Player
    } else {
        Side::Computer
    };

    if ball_hits_paddle(&state.ball, state.paddle(side)) {
        let offset = hit_offset(state.ball.pos.y, state.paddle(side));
        let (direction, bonus) = match side {
            Side::Player => (1.0, modifier.speed_bonus),
            Side::Computer => (-1.0, 0.0),
        };

        state.ball.vel = deflect(offset, state.ball.speed + bonus, direction);
        state.ball.speed += RALLY_SPEED_INCREMENT;
        state.rally_hits += 1;
        report.paddle_hit = Some(side);
    }

    report
}
