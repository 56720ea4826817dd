//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed logical step per call, no delta-time scaling
//! - No randomness
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{ball_hits_paddle, deflect, hit_offset};
pub use state::{Ball, GameState, Paddle, Side};
pub use tick::{TickReport, tick};
