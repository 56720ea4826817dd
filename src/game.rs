//! Game controller
//!
//! `Game` is the single owner of the playfield, the lifecycle phase and the
//! drawing surface. Platform code forwards browser events into it and calls
//! `frame` once per display refresh; everything else is decided here.
//!
//! Every entry point quietly does nothing until a surface is bound.

use serde::{Deserialize, Serialize};

use crate::assets::{ModifierSlot, PaddleModifier};
use crate::lifecycle::{GameOverStage, GamePhase, PhaseChange};
use crate::renderer::{DrawCommand, Surface, scene};
use crate::settings::Settings;
use crate::sim::{GameState, Side, tick};
use crate::viewport::{canvas_size, pointer_to_paddle_y};

/// Notifications for the outer (menu / wallet) layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Countdown is showing this number
    CountdownTick(i32),
    /// Countdown finished, simulation running
    MatchStarted,
    /// A point was scored; totals after the point
    PointScored { scorer: Side, player: u32, computer: u32 },
    /// A side reached the winning score. Emitted once per match.
    GameOver { winner: Side },
    /// Result banner done, menu should be shown again
    MenuRestored,
}

/// Owns and drives one game instance
pub struct Game<S: Surface> {
    surface: Option<S>,
    state: GameState,
    phase: GamePhase,
    settings: Settings,
    slot: ModifierSlot,
    /// Cached copy of the slot contents as of `seen_version`
    equipped: PaddleModifier,
    seen_version: u64,
    events: Vec<GameEvent>,
}

impl<S: Surface> Game<S> {
    pub fn new(settings: Settings) -> Self {
        Self::with_modifier_slot(settings, ModifierSlot::new())
    }

    /// Share a modifier slot with the asset layer
    pub fn with_modifier_slot(settings: Settings, slot: ModifierSlot) -> Self {
        Self {
            surface: None,
            state: GameState::new(0.0, 0.0),
            phase: GamePhase::Idle,
            settings,
            equipped: slot.current(),
            seen_version: slot.version(),
            slot,
            events: Vec::new(),
        }
    }

    /// Bind the drawing surface, size it to the container and draw the idle board
    pub fn initialize(&mut self, surface: S, container_width: f32) {
        self.surface = Some(surface);
        self.on_resize(container_width);
        log::info!(
            "Game canvas initialized ({}x{})",
            self.state.width,
            self.state.height
        );
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the playfield (tooling and tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Another handle to the modifier slot, for the asset layer to publish into
    pub fn modifier_slot(&self) -> ModifierSlot {
        self.slot.clone()
    }

    /// True whenever no match is in progress (menu, result banner, unbound)
    pub fn is_game_over(&self) -> bool {
        !self.phase.is_active()
    }

    /// Drain pending notifications
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset scores, serve and begin the countdown.
    ///
    /// Ignored while a match is already in progress. Starting from the result
    /// banner replaces its pending timers.
    pub fn start_match(&mut self, now: f64) {
        if self.surface.is_none() {
            return;
        }
        if self.phase.is_active() {
            log::warn!("Match already in progress, ignoring start");
            return;
        }

        log::info!("Preparing to start match...");
        self.refresh_modifier();
        self.state.reset_match();
        self.phase = GamePhase::countdown(now, &self.settings);
        self.render();
    }

    /// Advance timers and, while running, simulate and draw one step
    pub fn frame(&mut self, now: f64) {
        if self.refresh_modifier() && !self.phase.is_running() {
            self.render_static();
        }

        match self.phase.advance(now, &self.settings) {
            Some(PhaseChange::CountdownTick(remaining)) => {
                self.render();
                let overlay = scene::countdown_overlay(
                    remaining,
                    self.state.width,
                    self.state.height,
                    &self.settings,
                );
                self.paint(&overlay);
                self.events.push(GameEvent::CountdownTick(remaining));
            }
            Some(PhaseChange::CountdownFinished) => {
                log::info!("GO! Starting game loop...");
                self.events.push(GameEvent::MatchStarted);
            }
            Some(PhaseChange::ShowResult(winner)) => {
                let overlay = scene::result_overlay(
                    winner.result_message(),
                    self.state.width,
                    self.state.height,
                    &self.settings,
                );
                self.paint(&overlay);
            }
            Some(PhaseChange::MenuRestored) => {
                log::info!("Returning to menu");
                self.events.push(GameEvent::MenuRestored);
            }
            None => {}
        }

        if self.phase.is_running() {
            self.step(now);
            self.render();
        }
    }

    /// Draw the live board. No-op outside a match or without a surface.
    pub fn render(&mut self) {
        if !self.phase.is_active() {
            return;
        }
        let commands = scene::board(&self.state, &self.settings);
        self.paint(&commands);
    }

    /// Draw the idle board with the current modifier, without touching
    /// scores or velocity. A countdown number or result banner already on
    /// screen is drawn again on top.
    pub fn render_static(&mut self) {
        if self.surface.is_none() {
            return;
        }
        self.refresh_modifier();
        self.state.layout_idle();
        let commands = scene::idle_board(&self.state, &self.settings);
        self.paint(&commands);
        if let Some(overlay) = self.visible_overlay() {
            self.paint(&overlay);
        }
    }

    /// Re-fit the canvas to its container and redraw the idle board
    pub fn on_resize(&mut self, container_width: f32) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let (width, height) = canvas_size(container_width);
        surface.resize(width, height);
        // Play on the canvas the browser actually allocated
        let (width, height) = surface.size();
        self.state.resize(width, height);
        self.render_static();
    }

    /// Center the player paddle on the pointer (vertical axis only)
    pub fn on_pointer_move(&mut self, client_y: f32, canvas_top: f32) {
        if self.surface.is_none() || self.is_game_over() {
            return;
        }
        self.state.player.pos.y =
            pointer_to_paddle_y(client_y, canvas_top, self.state.player.height);
    }

    /// Equip a new modifier; the idle board is redrawn unless a match is running
    pub fn set_paddle_modifier(&mut self, modifier: PaddleModifier) {
        self.slot.publish(modifier);
        if self.refresh_modifier() && !self.phase.is_running() {
            self.render_static();
        }
    }

    /// Back to the unequipped paddle
    pub fn clear_paddle_modifier(&mut self) {
        self.slot.reset();
        if self.refresh_modifier() && !self.phase.is_running() {
            self.render_static();
        }
    }

    fn step(&mut self, now: f64) {
        let report = tick(&mut self.state, &self.equipped);

        if let Some(scorer) = report.scored {
            self.events.push(GameEvent::PointScored {
                scorer,
                player: self.state.player.score,
                computer: self.state.computer.score,
            });
        }

        if let Some(winner) = report.winner {
            log::info!("Game Over: {}", winner.result_message());
            self.phase = GamePhase::game_over(winner, now, &self.settings);
            self.events.push(GameEvent::GameOver { winner });
        }
    }

    /// Pull the latest modifier from the slot. Returns true if it changed.
    fn refresh_modifier(&mut self) -> bool {
        let version = self.slot.version();
        let changed = version != self.seen_version;
        if changed {
            self.equipped = self.slot.current();
            self.seen_version = version;
            log::debug!("Equipped paddle modifier: {:?}", self.equipped);
        }
        self.state.apply_modifier(&self.equipped);
        changed
    }

    /// Overlay currently shown by the phase, if any
    fn visible_overlay(&self) -> Option<Vec<DrawCommand>> {
        let (width, height) = (self.state.width, self.state.height);
        match self.phase {
            // `remaining` is the next number due; the one on screen is above it
            GamePhase::Countdown { remaining, .. } if remaining < self.settings.countdown_from => {
                Some(scene::countdown_overlay(
                    remaining + 1,
                    width,
                    height,
                    &self.settings,
                ))
            }
            GamePhase::GameOver {
                winner,
                stage: GameOverStage::RestoreMenu,
                ..
            } => Some(scene::result_overlay(
                winner.result_message(),
                width,
                height,
                &self.settings,
            )),
            _ => None,
        }
    }

    fn paint(&mut self, commands: &[DrawCommand]) {
        if let Some(surface) = self.surface.as_mut() {
            surface.submit(commands);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use glam::Vec2;

    fn game() -> Game<RecordingSurface> {
        let mut game = Game::new(Settings::default());
        game.initialize(RecordingSurface::new(), 820.0);
        game
    }

    fn surface(game: &Game<RecordingSurface>) -> &RecordingSurface {
        game.surface().expect("surface bound")
    }

    /// Start at t=0 and run the countdown; returns the time the match went live
    fn start_running(game: &mut Game<RecordingSurface>) -> f64 {
        game.start_match(0.0);
        let mut now = 0.0;
        while !game.phase().is_running() {
            now += 1000.0;
            game.frame(now);
        }
        game.take_events();
        now
    }

    #[test]
    fn test_initialize_draws_idle_board() {
        let game = game();
        let surface = surface(&game);
        assert_eq!(surface.size(), (780.0, 585.0));
        assert_eq!(surface.batches().len(), 1);
        assert_eq!(surface.last_texts(), vec!["0", "0"]);
        assert_eq!(game.state().ball.pos, Vec2::new(390.0, 292.5));
        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(game.is_game_over());
    }

    #[test]
    fn test_entry_points_are_silent_without_surface() {
        let mut game: Game<RecordingSurface> = Game::new(Settings::default());
        let before = game.state().clone();

        game.on_resize(1024.0);
        game.render();
        game.render_static();
        game.on_pointer_move(100.0, 0.0);
        game.start_match(0.0);
        game.frame(5000.0);
        game.set_paddle_modifier(PaddleModifier::new("red", 1.0, 2.6));

        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(game.take_events().is_empty());
        assert_eq!(game.state().ball, before.ball);
        assert_eq!(game.state().width, 0.0);
    }

    #[test]
    fn test_countdown_then_running() {
        let mut game = game();
        game.state_mut().player.score = 3;
        game.start_match(0.0);

        assert!(matches!(game.phase(), GamePhase::Countdown { remaining: 6, .. }));
        assert_eq!(game.state().player.score, 0);
        // Board is drawn immediately under the countdown
        assert_eq!(surface(&game).batches().len(), 2);
        assert_eq!(surface(&game).last_texts(), vec!["0", "0"]);

        game.frame(500.0);
        assert_eq!(surface(&game).batches().len(), 2);

        game.frame(1000.0);
        assert_eq!(surface(&game).last_texts(), vec!["6"]);

        let served_from = game.state().ball.pos;
        for second in 2..=7 {
            game.frame(second as f64 * 1000.0);
        }

        assert_eq!(game.phase(), GamePhase::Running);
        let events = game.take_events();
        assert_eq!(
            events,
            vec![
                GameEvent::CountdownTick(6),
                GameEvent::CountdownTick(5),
                GameEvent::CountdownTick(4),
                GameEvent::CountdownTick(3),
                GameEvent::CountdownTick(2),
                GameEvent::CountdownTick(1),
                GameEvent::MatchStarted,
            ]
        );
        // The frame that ended the countdown also ran the first step
        assert_eq!(game.state().ball.pos, served_from + game.state().ball.vel);
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_simulation_frozen_during_countdown() {
        let mut game = game();
        game.start_match(0.0);
        let before = game.state().clone();
        game.frame(1000.0);
        game.frame(1500.0);
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_game_over_fires_once_and_freezes() {
        let mut game = game();
        let t = start_running(&mut game);
        {
            let state = game.state_mut();
            state.player.score = 4;
            state.computer.score = 4;
            state.ball.pos = Vec2::new(state.width - 12.0, 300.0);
            state.ball.vel = Vec2::new(5.0, 0.0);
        }

        game.frame(t + 16.0);
        assert_eq!(
            game.take_events(),
            vec![
                GameEvent::PointScored {
                    scorer: Side::Player,
                    player: 5,
                    computer: 4
                },
                GameEvent::GameOver {
                    winner: Side::Player
                },
            ]
        );
        assert!(game.is_game_over());
        let frozen = game.state().clone();
        let batches = surface(&game).batches().len();

        game.frame(t + 20.0);
        assert!(game.take_events().is_empty());
        assert_eq!(game.state(), &frozen);
        assert_eq!(surface(&game).batches().len(), batches);

        // Banner 10ms after the final point
        game.frame(t + 26.0);
        assert_eq!(surface(&game).last_texts(), vec!["YOU WIN!"]);
        assert_eq!(game.state(), &frozen);

        game.frame(t + 2026.0);
        assert_eq!(game.take_events(), vec![GameEvent::MenuRestored]);
        assert_eq!(game.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_restart_cancels_pending_menu_restore() {
        let mut game = game();
        let t = start_running(&mut game);
        {
            let state = game.state_mut();
            state.computer.score = 4;
            state.ball.pos = Vec2::new(12.0, 300.0);
            state.ball.vel = Vec2::new(-5.0, 0.0);
        }
        game.frame(t + 16.0);
        assert!(matches!(game.phase(), GamePhase::GameOver { .. }));
        game.take_events();

        // Player restarts straight away, before banner and menu timers fire
        game.start_match(t + 17.0);
        assert_eq!(game.state().computer.score, 0);

        game.frame(t + 2026.0);
        let events = game.take_events();
        assert!(!events.contains(&GameEvent::MenuRestored));
        assert!(matches!(game.phase(), GamePhase::Countdown { .. }));
    }

    #[test]
    fn test_start_ignored_while_active() {
        let mut game = game();
        let t = start_running(&mut game);
        game.state_mut().player.score = 2;
        game.start_match(t + 1.0);
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.state().player.score, 2);
    }

    #[test]
    fn test_pointer_only_moves_paddle_during_match() {
        let mut game = game();
        let idle_y = game.state().player.pos.y;
        game.on_pointer_move(300.0, 40.0);
        assert_eq!(game.state().player.pos.y, idle_y);

        game.start_match(0.0);
        game.on_pointer_move(300.0, 40.0);
        assert_eq!(game.state().player.pos.y, 210.0);
        assert_eq!(game.state().player.pos.x, PADDLE_EDGE_MARGIN);
    }

    #[test]
    fn test_modifier_redraws_idle_board() {
        let mut game = game();
        game.set_paddle_modifier(PaddleModifier::new("gold", 1.0, 2.6));

        let surface = surface(&game);
        assert_eq!(surface.batches().len(), 2);
        let paddle = &surface.last_batch().expect("batch")[3];
        assert_eq!(
            paddle,
            &DrawCommand::FillRect {
                x: 10.0,
                y: 292.5 - 130.0,
                width: PADDLE_WIDTH,
                height: 260.0,
                color: "gold".into(),
            }
        );
    }

    #[test]
    fn test_modifier_during_running_waits_for_next_frame() {
        let mut game = game();
        let t = start_running(&mut game);
        let batches = surface(&game).batches().len();
        let ball = game.state().ball.clone();

        game.set_paddle_modifier(PaddleModifier::new("#123456", 0.0, 1.4));
        assert_eq!(surface(&game).batches().len(), batches);
        assert_eq!(game.state().ball, ball);

        game.frame(t + 16.0);
        match &surface(&game).last_batch().expect("batch")[3] {
            DrawCommand::FillRect { height, color, .. } => {
                assert!((height - 140.0).abs() < 1e-4);
                assert_eq!(color, "#123456");
            }
            other => panic!("expected player paddle, got {:?}", other),
        }
    }

    #[test]
    fn test_slot_publish_is_picked_up_on_frame() {
        let mut game = game();
        let publisher = game.modifier_slot();
        publisher.publish(PaddleModifier::from_equipped("#00ffcc", "2", "Legendary"));

        game.frame(100.0);

        assert_eq!(surface(&game).batches().len(), 2);
        assert_eq!(game.state().player.height, 260.0);
        game.frame(200.0);
        assert_eq!(surface(&game).batches().len(), 2);

        game.clear_paddle_modifier();
        assert_eq!(game.state().player.height, PADDLE_BASE_HEIGHT);
        assert_eq!(game.state().player.color, DEFAULT_PADDLE_COLOR);
    }

    #[test]
    fn test_static_render_is_idempotent() {
        let mut game = game();
        game.render_static();
        let state = game.state().clone();
        game.render_static();

        let batches = surface(&game).batches();
        let n = batches.len();
        assert_eq!(batches[n - 1], batches[n - 2]);
        assert_eq!(game.state(), &state);
    }

    #[test]
    fn test_static_render_keeps_scores_and_velocity() {
        let mut game = game();
        {
            let state = game.state_mut();
            state.player.score = 3;
            state.ball.vel = Vec2::new(-9.0, 4.0);
            state.ball.speed = 12.0;
        }
        game.render_static();
        assert_eq!(surface(&game).last_texts(), vec!["0", "0"]);
        assert_eq!(game.state().player.score, 3);
        assert_eq!(game.state().ball.vel, Vec2::new(-9.0, 4.0));
        assert_eq!(game.state().ball.speed, 12.0);
    }

    #[test]
    fn test_resize_relayouts_board() {
        let mut game = game();
        game.on_resize(400.0);

        assert_eq!(surface(&game).size(), (380.0, 285.0));
        let state = game.state();
        assert_eq!(state.computer.pos.x, 380.0 - PADDLE_WIDTH - PADDLE_EDGE_MARGIN);
        assert_eq!(state.ball.pos, Vec2::new(190.0, 142.5));
        assert_eq!(state.player.center_y(), 142.5);

        let snapshot = state.clone();
        game.on_resize(400.0);
        assert_eq!(game.state(), &snapshot);
    }

    #[test]
    fn test_resize_follows_whole_pixel_canvas() {
        let mut game = game();
        game.on_resize(481.0);

        // 461 x 345.75 requested, the canvas keeps 461 x 345
        assert_eq!(surface(&game).size(), (461.0, 345.0));
        assert_eq!(game.state().width, 461.0);
        assert_eq!(game.state().height, 345.0);
        assert_eq!(game.state().ball.pos, Vec2::new(230.5, 172.5));
    }

    #[test]
    fn test_modifier_during_countdown_keeps_number_on_screen() {
        let mut game = game();
        game.start_match(0.0);
        game.frame(1000.0);
        assert_eq!(surface(&game).last_texts(), vec!["6"]);

        game.set_paddle_modifier(PaddleModifier::new("gold", 0.0, 1.9));
        assert_eq!(surface(&game).last_texts(), vec!["6"]);
        assert_eq!(game.state().player.height, 190.0);

        game.clear_paddle_modifier();
        assert_eq!(surface(&game).last_texts(), vec!["6"]);
        assert_eq!(game.state().player.height, PADDLE_BASE_HEIGHT);
    }

    #[test]
    fn test_modifier_before_first_countdown_number_draws_board_only() {
        let mut game = game();
        game.start_match(0.0);
        game.set_paddle_modifier(PaddleModifier::new("gold", 0.0, 1.0));
        assert_eq!(surface(&game).last_texts(), vec!["0", "0"]);
    }

    #[test]
    fn test_resize_keeps_result_banner() {
        let mut game = game();
        let t = start_running(&mut game);
        {
            let state = game.state_mut();
            state.player.score = WINNING_SCORE - 1;
            state.ball.pos = Vec2::new(state.width - 12.0, 200.0);
            state.ball.vel = Vec2::new(5.0, 0.0);
        }
        game.frame(t + 16.0);
        game.frame(t + 32.0);
        assert_eq!(surface(&game).last_texts(), vec!["YOU WIN!"]);

        game.on_resize(600.0);
        assert_eq!(surface(&game).last_texts(), vec!["YOU WIN!"]);
    }

    #[test]
    fn test_render_skipped_when_idle() {
        let mut game = game();
        game.render();
        assert_eq!(surface(&game).batches().len(), 1);
    }
}
