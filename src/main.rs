//! Demit Pong entry point
//!
//! The browser build is driven from `platform::web` through wasm-bindgen.
//! Natively this runs a headless self-play match on a recording surface:
//! the player paddle tracks the ball through the pointer path.
//!
//! Usage: `demit-pong [rarity] [speed_bonus] [color_hex]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use demit_pong::renderer::RecordingSurface;
    use demit_pong::{Game, GameEvent, PaddleModifier, Rarity, Settings};

    /// Simulated frame length in milliseconds
    const FRAME_MS: f64 = 16.0;
    /// Give up after this many frames (about an hour of play)
    const MAX_FRAMES: u64 = 225_000;

    env_logger::init();
    log::info!("Demit Pong (native) starting headless self-play...");

    let mut args = std::env::args().skip(1);
    let rarity = args.next().unwrap_or_else(|| "Standard".to_string());
    let speed_bonus = args.next().unwrap_or_else(|| "0".to_string());
    let color = args.next().unwrap_or_else(|| "#ffffff".to_string());
    let modifier = PaddleModifier::from_equipped(&color, &speed_bonus, &rarity);
    let tier: Rarity = rarity.parse().unwrap_or_default();
    log::info!(
        "Equipped {} paddle {}: color={} speed_bonus={} length_multiplier={}",
        tier.as_str(),
        tier.length_bonus_label(),
        modifier.color,
        modifier.speed_bonus,
        modifier.length_multiplier
    );

    let mut game = Game::new(Settings::load());
    game.initialize(RecordingSurface::default(), 820.0);
    game.set_paddle_modifier(modifier);

    let mut now = 0.0;
    game.start_match(now);

    let mut winner = None;
    let mut frames = 0u64;
    'frames: while frames < MAX_FRAMES {
        now += FRAME_MS;
        frames += 1;

        let ball_y = game.state().ball.pos.y;
        game.on_pointer_move(ball_y, 0.0);
        game.frame(now);

        // Only the newest frame is of interest
        if let Some(surface) = game.surface_mut() {
            surface.clear_history();
        }

        for event in game.take_events() {
            match event {
                GameEvent::CountdownTick(n) => log::debug!("Countdown {}", n),
                GameEvent::MatchStarted => log::info!("Match started"),
                GameEvent::PointScored {
                    scorer,
                    player,
                    computer,
                } => log::info!("{} scores: {} - {}", scorer.as_str(), player, computer),
                GameEvent::GameOver { winner: side } => {
                    log::info!("{}", side.result_message());
                    winner = Some(side);
                }
                GameEvent::MenuRestored => break 'frames,
            }
        }
    }

    let state = game.state();
    match winner {
        Some(side) => println!(
            "{} after {:.1}s ({} - {}, {} ticks, {} rally hits)",
            side.result_message(),
            now / 1000.0,
            state.player.score,
            state.computer.score,
            state.time_ticks,
            state.rally_hits
        ),
        None => println!(
            "No winner after {} frames ({} - {})",
            frames, state.player.score, state.computer.score
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
