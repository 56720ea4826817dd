//! Draw-list generation for the board and its overlays
//!
//! Everything here is a pure function of its inputs: the same state always
//! yields the same commands.

use super::draw::DrawCommand;
use crate::settings::Settings;
use crate::sim::{Ball, GameState, Paddle};

/// The live board: background, current scores, paddles, ball
pub fn board(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    court(
        state,
        settings,
        &state.player.score.to_string(),
        &state.computer.score.to_string(),
    )
}

/// The idle board: same layout with both scores shown as zero
pub fn idle_board(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    court(state, settings, "0", "0")
}

/// Dimmed layer with a large countdown number
pub fn countdown_overlay(
    remaining: i32,
    width: f32,
    height: f32,
    settings: &Settings,
) -> Vec<DrawCommand> {
    vec![
        dim(width, height, settings),
        DrawCommand::Text {
            text: remaining.to_string(),
            x: width / 2.0,
            y: height / 2.0 + width / 20.0,
            size: width / 5.0,
            color: settings.text_color.clone(),
        },
    ]
}

/// Dimmed layer with the match result
pub fn result_overlay(
    message: &str,
    width: f32,
    height: f32,
    settings: &Settings,
) -> Vec<DrawCommand> {
    vec![
        dim(width, height, settings),
        DrawCommand::Text {
            text: message.to_string(),
            x: width / 2.0,
            y: height / 2.0,
            size: width / 15.0,
            color: settings.text_color.clone(),
        },
    ]
}

fn court(state: &GameState, settings: &Settings, left: &str, right: &str) -> Vec<DrawCommand> {
    let (w, h) = (state.width, state.height);
    let score_size = w / 10.0;

    vec![
        DrawCommand::FillRect {
            x: 0.0,
            y: 0.0,
            width: w,
            height: h,
            color: settings.background.clone(),
        },
        DrawCommand::Text {
            text: left.to_string(),
            x: w / 4.0,
            y: h / 5.0,
            size: score_size,
            color: settings.text_color.clone(),
        },
        DrawCommand::Text {
            text: right.to_string(),
            x: 3.0 * w / 4.0,
            y: h / 5.0,
            size: score_size,
            color: settings.text_color.clone(),
        },
        paddle(&state.player, &state.player.color),
        paddle(&state.computer, &settings.computer_color),
        ball(&state.ball),
    ]
}

fn paddle(paddle: &Paddle, color: &str) -> DrawCommand {
    DrawCommand::FillRect {
        x: paddle.pos.x,
        y: paddle.pos.y,
        width: paddle.width,
        height: paddle.height,
        color: color.to_string(),
    }
}

fn ball(ball: &Ball) -> DrawCommand {
    DrawCommand::FillCircle {
        x: ball.pos.x,
        y: ball.pos.y,
        radius: ball.radius,
        color: ball.color.clone(),
    }
}

fn dim(width: f32, height: f32, settings: &Settings) -> DrawCommand {
    DrawCommand::FillRect {
        x: 0.0,
        y: 0.0,
        width,
        height,
        color: settings.overlay_color.clone(),
    }
}
