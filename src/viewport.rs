//! Resize and pointer adapters
//!
//! Pure conversions from browser measurements into playfield coordinates.

use crate::consts::{ASPECT_RATIO, CANVAS_MARGIN, CANVAS_MAX_WIDTH, CANVAS_MIN_WIDTH};

/// Canvas size for a container of the given width.
///
/// Width is capped at the max, minus the margin, and never drops below the
/// min; height follows the fixed 4:3 aspect ratio. An unmeasurable
/// container (NaN or infinite) gets the min width.
pub fn canvas_size(container_width: f32) -> (f32, f32) {
    if !container_width.is_finite() {
        return (CANVAS_MIN_WIDTH, CANVAS_MIN_WIDTH / ASPECT_RATIO);
    }
    let width = (container_width.min(CANVAS_MAX_WIDTH) - CANVAS_MARGIN).max(CANVAS_MIN_WIDTH);
    (width, width / ASPECT_RATIO)
}

/// Paddle top for a pointer at `client_y`, centering the paddle on the pointer
#[inline]
pub fn pointer_to_paddle_y(client_y: f32, canvas_top: f32, paddle_height: f32) -> f32 {
    client_y - canvas_top - paddle_height / 2.0
}
