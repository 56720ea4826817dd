//! Match lifecycle state machine
//!
//! Idle -> Countdown -> Running -> GameOver -> Idle.
//!
//! Every delayed action is a `Timer` stored inside the phase it belongs to.
//! Replacing the phase (e.g. starting a new match during the result banner)
//! drops the old timer, so a stale delayed action can never fire.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::Side;

/// A pending delayed action, due at a clock reading in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    pub due_at: f64,
}

impl Timer {
    pub fn after(now: f64, delay_ms: f64) -> Self {
        Self {
            due_at: now + delay_ms,
        }
    }

    #[inline]
    pub fn is_due(&self, now: f64) -> bool {
        now >= self.due_at
    }
}

/// What the game-over phase is waiting to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverStage {
    /// Draw the result banner over the final frame
    ShowResult,
    /// Hand control back to the menu
    RestoreMenu,
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu shown, nothing running
    Idle,
    /// Pre-match countdown; simulation frozen
    Countdown { remaining: i32, timer: Timer },
    /// Simulation and render every frame
    Running,
    /// Match decided; simulation frozen
    GameOver {
        winner: Side,
        stage: GameOverStage,
        timer: Timer,
    },
}

/// A timed transition performed by `GamePhase::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseChange {
    /// Countdown shows this number and keeps going
    CountdownTick(i32),
    /// Countdown showed its last number; now Running
    CountdownFinished,
    /// Result banner is due
    ShowResult(Side),
    /// Back to Idle
    MenuRestored,
}

impl GamePhase {
    /// Enter the countdown; the first number shows one interval from now
    pub fn countdown(now: f64, settings: &Settings) -> Self {
        GamePhase::Countdown {
            remaining: settings.countdown_from,
            timer: Timer::after(now, settings.countdown_interval_ms),
        }
    }

    /// Enter game over; the banner shows after the result delay
    pub fn game_over(winner: Side, now: f64, settings: &Settings) -> Self {
        GamePhase::GameOver {
            winner,
            stage: GameOverStage::ShowResult,
            timer: Timer::after(now, settings.result_delay_ms),
        }
    }

    /// True while a match is in progress (countdown or running)
    pub fn is_active(&self) -> bool {
        matches!(self, GamePhase::Countdown { .. } | GamePhase::Running)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }

    /// Fire the pending timer if it is due. At most one transition per call.
    pub fn advance(&mut self, now: f64, settings: &Settings) -> Option<PhaseChange> {
        match *self {
            GamePhase::Countdown { remaining, timer } if timer.is_due(now) => {
                let next = remaining - 1;
                if next < 0 {
                    *self = GamePhase::Running;
                    Some(PhaseChange::CountdownFinished)
                } else {
                    *self = GamePhase::Countdown {
                        remaining: next,
                        timer: Timer::after(timer.due_at, settings.countdown_interval_ms),
                    };
                    Some(PhaseChange::CountdownTick(remaining))
                }
            }
            GamePhase::GameOver {
                winner,
                stage: GameOverStage::ShowResult,
                timer,
            } if timer.is_due(now) => {
                *self = GamePhase::GameOver {
                    winner,
                    stage: GameOverStage::RestoreMenu,
                    timer: Timer::after(timer.due_at, settings.menu_delay_ms),
                };
                Some(PhaseChange::ShowResult(winner))
            }
            GamePhase::GameOver {
                stage: GameOverStage::RestoreMenu,
                timer,
                ..
            } if timer.is_due(now) => {
                *self = GamePhase::Idle;
                Some(PhaseChange::MenuRestored)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_runs_six_to_zero() {
        let settings = Settings::default();
        let mut phase = GamePhase::countdown(0.0, &settings);
        assert!(phase.is_active());
        assert!(!phase.is_running());

        // Nothing before the first interval
        assert_eq!(phase.advance(999.0, &settings), None);

        let mut shown = Vec::new();
        let mut now = 1000.0;
        loop {
            match phase.advance(now, &settings) {
                Some(PhaseChange::CountdownTick(n)) => shown.push(n),
                Some(PhaseChange::CountdownFinished) => break,
                other => panic!("unexpected change {:?}", other),
            }
            now += 1000.0;
        }

        assert_eq!(shown, vec![6, 5, 4, 3, 2, 1]);
        // The "0" tick is the one that starts the match
        assert_eq!(now, 7000.0);
        assert_eq!(phase, GamePhase::Running);
    }

    #[test]
    fn test_one_transition_per_advance() {
        let settings = Settings::default();
        let mut phase = GamePhase::countdown(0.0, &settings);
        // Way overdue: still only one step
        assert_eq!(
            phase.advance(60_000.0, &settings),
            Some(PhaseChange::CountdownTick(6))
        );
        assert!(matches!(phase, GamePhase::Countdown { remaining: 5, .. }));
    }

    #[test]
    fn test_game_over_sequence() {
        let settings = Settings::default();
        let mut phase = GamePhase::game_over(Side::Computer, 500.0, &settings);
        assert!(!phase.is_active());

        assert_eq!(phase.advance(505.0, &settings), None);
        assert_eq!(
            phase.advance(510.0, &settings),
            Some(PhaseChange::ShowResult(Side::Computer))
        );
        assert_eq!(phase.advance(2000.0, &settings), None);
        assert_eq!(
            phase.advance(2510.0, &settings),
            Some(PhaseChange::MenuRestored)
        );
        assert_eq!(phase, GamePhase::Idle);
        assert_eq!(phase.advance(1e9, &settings), None);
    }

    #[test]
    fn test_restart_drops_pending_timer() {
        let settings = Settings::default();
        let mut phase = GamePhase::game_over(Side::Player, 0.0, &settings);
        match phase {
            GamePhase::GameOver { timer, .. } => assert_eq!(timer, Timer { due_at: 10.0 }),
            other => panic!("expected game over, got {:?}", other),
        }

        phase = GamePhase::countdown(5.0, &settings);
        // The banner and menu timers are gone; only the countdown remains
        assert_eq!(
            phase,
            GamePhase::Countdown {
                remaining: 6,
                timer: Timer { due_at: 1005.0 }
            }
        );
        assert_eq!(phase.advance(2600.0, &settings), Some(PhaseChange::CountdownTick(6)));
    }

    #[test]
    fn test_idle_and_running_have_no_timer() {
        let settings = Settings::default();
        let mut idle = GamePhase::Idle;
        let mut running = GamePhase::Running;
        assert_eq!(idle.advance(1e6, &settings), None);
        assert_eq!(running.advance(1e6, &settings), None);
    }
}
