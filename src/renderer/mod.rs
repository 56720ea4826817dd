//! Rendering module
//!
//! `scene` turns game state into a flat list of `DrawCommand`s; a `Surface`
//! paints them. The Canvas 2D surface is only built for wasm32.

pub mod draw;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use draw::{DrawCommand, RecordingSurface, Surface};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
