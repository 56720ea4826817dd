//! Paddle modifiers pushed in by the asset layer
//!
//! The wallet/inventory code lives outside this crate. All it hands us is the
//! equipped paddle's color, speed bonus and rarity, which we fold into a
//! `PaddleModifier` and drop into a `ModifierSlot` for the renderer to pick up.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_PADDLE_COLOR;

/// Paddle rarity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Rarity {
    #[default]
    Standard,
    Master,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Standard => "Standard",
            Rarity::Master => "Master",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Player paddle length relative to the base height
    pub fn length_multiplier(&self) -> f32 {
        match self {
            Rarity::Standard => 1.0,
            Rarity::Master => 1.4,
            Rarity::Epic => 1.9,
            Rarity::Legendary => 2.6,
        }
    }

    /// Inventory label for the length bonus (empty for standard paddles)
    pub fn length_bonus_label(&self) -> &'static str {
        match self {
            Rarity::Standard => "",
            Rarity::Master => "+40% length",
            Rarity::Epic => "+90% length",
            Rarity::Legendary => "+160% length",
        }
    }
}

/// Parses the tier name reported by the asset layer; unknown tiers are standard
impl FromStr for Rarity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "Master" => Rarity::Master,
            "Epic" => Rarity::Epic,
            "Legendary" => Rarity::Legendary,
            _ => Rarity::Standard,
        })
    }
}

/// Cosmetic and gameplay adjustments for the player paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleModifier {
    /// CSS color for the player paddle
    pub color: String,
    /// Added to the ball speed on player contacts
    pub speed_bonus: f32,
    /// Scales the player paddle height
    pub length_multiplier: f32,
}

impl Default for PaddleModifier {
    fn default() -> Self {
        Self {
            color: DEFAULT_PADDLE_COLOR.to_string(),
            speed_bonus: 0.0,
            length_multiplier: 1.0,
        }
    }
}

impl PaddleModifier {
    /// Build a modifier, replacing unusable values with the defaults
    pub fn new(color: impl Into<String>, speed_bonus: f32, length_multiplier: f32) -> Self {
        Self {
            color: color.into(),
            speed_bonus,
            length_multiplier,
        }
        .sanitized()
    }

    /// Build a modifier from the equipped paddle's fields as the asset layer
    /// reports them. The speed bonus arrives as text and is truncated to an integer.
    pub fn from_equipped(color_hex: &str, speed_bonus: &str, rarity: &str) -> Self {
        let bonus = speed_bonus
            .trim()
            .parse::<f32>()
            .map(f32::trunc)
            .unwrap_or_else(|_| {
                log::warn!("Unreadable speed bonus {:?}, using 0", speed_bonus);
                0.0
            });
        let rarity: Rarity = rarity.parse().unwrap_or_default();
        Self::new(color_hex, bonus, rarity.length_multiplier())
    }

    /// Degrade bad values to defaults instead of letting them reach the simulation
    pub fn sanitized(mut self) -> Self {
        if self.color.trim().is_empty() {
            self.color = DEFAULT_PADDLE_COLOR.to_string();
        }
        if !self.speed_bonus.is_finite() {
            self.speed_bonus = 0.0;
        }
        if !self.length_multiplier.is_finite() || self.length_multiplier <= 0.0 {
            self.length_multiplier = 1.0;
        }
        self
    }
}

/// Single-slot, last-write-wins mailbox for the equipped modifier.
///
/// Clones share the slot: the asset layer keeps one handle to publish into,
/// the game keeps another and reads it on render. Every publish bumps the
/// version so readers can tell the slot changed.
#[derive(Debug, Clone, Default)]
pub struct ModifierSlot {
    value: Rc<RefCell<PaddleModifier>>,
    version: Rc<Cell<u64>>,
}

impl ModifierSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current modifier
    pub fn publish(&self, modifier: PaddleModifier) {
        *self.value.borrow_mut() = modifier.sanitized();
        self.version.set(self.version.get().wrapping_add(1));
    }

    /// Go back to the unequipped default
    pub fn reset(&self) {
        self.publish(PaddleModifier::default());
    }

    /// Snapshot of the current modifier
    pub fn current(&self) -> PaddleModifier {
        self.value.borrow().clone()
    }

    pub fn version(&self) -> u64 {
        self.version.get()
    }
}
