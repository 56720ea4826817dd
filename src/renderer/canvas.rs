//! Canvas 2D surface.
//!
//! The only place that touches [`web_sys::CanvasRenderingContext2d`]. Fallible
//! canvas calls propagate as `Result<(), JsValue>` up to `submit`, which logs
//! and drops the rest of the batch.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::draw::{DrawCommand, Surface};

/// Paints draw commands onto an HTML canvas
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    font_family: String,
}

impl CanvasSurface {
    /// Bind to a canvas element and grab its 2D context
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context available.
    pub fn new(canvas: HtmlCanvasElement, font_family: &str) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            font_family: font_family.to_string(),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn paint(&self, cmd: &DrawCommand) -> Result<(), JsValue> {
        match cmd {
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                self.ctx.set_fill_style_str(color);
                self.ctx
                    .fill_rect(*x as f64, *y as f64, *width as f64, *height as f64);
            }
            DrawCommand::FillCircle {
                x,
                y,
                radius,
                color,
            } => {
                self.ctx.set_fill_style_str(color);
                self.ctx.begin_path();
                self.ctx
                    .arc(*x as f64, *y as f64, *radius as f64, 0.0, TAU)?;
                self.ctx.fill();
            }
            DrawCommand::Text {
                text,
                x,
                y,
                size,
                color,
            } => {
                self.ctx.set_fill_style_str(color);
                self.ctx.set_font(&format!("{}px {}", size, self.font_family));
                self.ctx.set_text_align("center");
                self.ctx.fill_text(text, *x as f64, *y as f64)?;
            }
        }
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn submit(&mut self, commands: &[DrawCommand]) {
        for cmd in commands {
            if let Err(e) = self.paint(cmd) {
                log::warn!("Canvas draw failed: {:?}", e);
                return;
            }
        }
    }
}
