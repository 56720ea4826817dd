//! Game state and core simulation types
//!
//! One `GameState` lives for the whole page; matches reset it in place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::PaddleModifier;
use crate::consts::*;

/// Which side of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, driven by the pointer
    Player,
    /// Right paddle, driven by the follower AI
    Computer,
}

impl Side {
    /// Stable identifier handed to the outer layer
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Computer => "computer",
        }
    }

    /// Banner shown when this side wins the match
    pub fn result_message(&self) -> &'static str {
        match self {
            Side::Player => "YOU WIN!",
            Side::Computer => "COMPUTER WINS",
        }
    }
}

/// A paddle (position is its top-left corner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: String,
    pub score: u32,
}

impl Paddle {
    pub fn new(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, 0.0),
            width: PADDLE_WIDTH,
            height: PADDLE_BASE_HEIGHT,
            color: DEFAULT_PADDLE_COLOR.to_string(),
            score: 0,
        }
    }

    /// Vertical center of the paddle
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Scalar speed applied on the next paddle contact
    pub speed: f32,
    pub color: String,
}

impl Default for Ball {
    fn default() -> Self {
        let (vx, vy) = BALL_INITIAL_VELOCITY;
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::new(vx, vy),
            radius: BALL_RADIUS,
            speed: BALL_BASE_SPEED,
            color: DEFAULT_BALL_COLOR.to_string(),
        }
    }
}

impl Ball {
    #[inline]
    pub fn moving_left(&self) -> bool {
        self.vel.x < 0.0
    }
}

/// Complete playfield state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Canvas width
    pub width: f32,
    /// Canvas height
    pub height: f32,
    pub player: Paddle,
    pub computer: Paddle,
    pub ball: Ball,
    /// Set once a side reaches the winning score; freezes the simulation
    pub winner: Option<Side>,
    /// Paddle contacts since the last serve
    pub rally_hits: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create the idle board for a canvas of the given size
    pub fn new(width: f32, height: f32) -> Self {
        let mut state = Self {
            width,
            height,
            player: Paddle::new(PADDLE_EDGE_MARGIN),
            computer: Paddle::new(0.0),
            ball: Ball::default(),
            winner: None,
            rally_hits: 0,
            time_ticks: 0,
        };
        state.layout_idle();
        state
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Player => &self.player,
            Side::Computer => &self.computer,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Player => &mut self.player,
            Side::Computer => &mut self.computer,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        self.paddle(side).score
    }

    pub fn is_match_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Zero both scores and serve, reusing the existing objects
    pub fn reset_match(&mut self) {
        self.player.score = 0;
        self.computer.score = 0;
        self.winner = None;
        self.serve();
    }

    /// Put the ball back at center court at base speed.
    ///
    /// The horizontal direction flips from the last one. A ball with no
    /// horizontal velocity (e.g. zeroed between matches) is served left.
    pub fn serve(&mut self) {
        self.ball.pos = Vec2::new(self.width / 2.0, self.height / 2.0);
        self.ball.speed = BALL_BASE_SPEED;
        let flipped = -self.ball.vel.x;
        self.ball.vel.x = if flipped != 0.0 && !flipped.is_nan() {
            flipped
        } else {
            SERVE_FALLBACK_VX
        };
        self.rally_hits = 0;
    }

    /// Derive the player paddle's length and skin from the equipped modifier
    pub fn apply_modifier(&mut self, modifier: &PaddleModifier) {
        self.player.height = PADDLE_BASE_HEIGHT * modifier.length_multiplier;
        self.player.color = modifier.color.clone();
    }

    /// Center both paddles and the ball for the idle board
    pub fn layout_idle(&mut self) {
        self.player.pos.x = PADDLE_EDGE_MARGIN;
        self.player.pos.y = self.height / 2.0 - self.player.half_height();
        self.computer.height = PADDLE_BASE_HEIGHT;
        self.computer.pos.x = self.width - self.computer.width - PADDLE_EDGE_MARGIN;
        self.computer.pos.y = self.height / 2.0 - self.computer.half_height();
        self.ball.pos = Vec2::new(self.width / 2.0, self.height / 2.0);
    }

    /// Adopt new canvas dimensions
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}
