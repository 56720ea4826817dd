//! Demit Pong - browser Pong with asset-driven paddles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scoring)
//! - `lifecycle`: Match state machine and its pending timer
//! - `renderer`: Draw lists and the surfaces that paint them
//! - `viewport`: Resize and pointer adapters
//! - `assets`: Paddle modifier intake from the asset layer
//! - `game`: Controller tying the above together
//! - `platform`: Browser bindings (wasm32 only)

pub mod assets;
pub mod game;
pub mod lifecycle;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod viewport;

pub use assets::{ModifierSlot, PaddleModifier, Rarity};
pub use game::{Game, GameEvent};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_BASE_HEIGHT: f32 = 100.0;
    /// Gap between each paddle and its side wall
    pub const PADDLE_EDGE_MARGIN: f32 = 10.0;
    pub const DEFAULT_PADDLE_COLOR: &str = "white";

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Speed every serve starts from
    pub const BALL_BASE_SPEED: f32 = 7.0;
    /// Velocity before the first serve
    pub const BALL_INITIAL_VELOCITY: (f32, f32) = (5.0, 5.0);
    /// Horizontal serve velocity when the previous one was zero
    pub const SERVE_FALLBACK_VX: f32 = -5.0;
    /// Speed gained on every paddle contact
    pub const RALLY_SPEED_INCREMENT: f32 = 0.5;
    /// Deflection at the very edge of a paddle (45°)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
    pub const DEFAULT_BALL_COLOR: &str = "white";

    /// Fraction of the remaining distance the computer paddle covers per tick
    pub const COMPUTER_FOLLOW_RATE: f32 = 0.1;

    /// First side to reach this ends the match
    pub const WINNING_SCORE: u32 = 5;

    /// Canvas layout
    pub const ASPECT_RATIO: f32 = 4.0 / 3.0;
    pub const CANVAS_MIN_WIDTH: f32 = 300.0;
    pub const CANVAS_MAX_WIDTH: f32 = 800.0;
    pub const CANVAS_MARGIN: f32 = 20.0;
}
