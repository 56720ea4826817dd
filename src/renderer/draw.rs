//! Draw commands and the surfaces that consume them

use serde::{Deserialize, Serialize};

/// One 2D drawing primitive. Coordinates are canvas pixels, colors are CSS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
    FillCircle {
        x: f32,
        y: f32,
        radius: f32,
        color: String,
    },
    /// Horizontally centered text on `(x, y)` baseline
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: String,
    },
}

/// A 2D drawing target
pub trait Surface {
    /// Current drawable size (width, height)
    fn size(&self) -> (f32, f32);

    /// Change the drawable size; contents may be discarded. The surface may
    /// round the request, so read the result back through `size`.
    fn resize(&mut self, width: f32, height: f32);

    /// Paint commands in order, on top of whatever is already there
    fn submit(&mut self, commands: &[DrawCommand]);
}

/// Headless surface that keeps every submitted batch.
///
/// Used by the native binary and by tests to inspect what would be painted.
/// Sizes snap to whole pixels the way a canvas backing store does.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    batches: Vec<Vec<DrawCommand>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All batches submitted so far, oldest first
    pub fn batches(&self) -> &[Vec<DrawCommand>] {
        &self.batches
    }

    /// The most recent batch
    pub fn last_batch(&self) -> Option<&[DrawCommand]> {
        self.batches.last().map(Vec::as_slice)
    }

    /// Text of every `Text` command in the most recent batch
    pub fn last_texts(&self) -> Vec<&str> {
        self.last_batch()
            .unwrap_or_default()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_history(&mut self) {
        self.batches.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width.trunc();
        self.height = height.trunc();
    }

    fn submit(&mut self, commands: &[DrawCommand]) {
        self.batches.push(commands.to_vec());
    }
}
