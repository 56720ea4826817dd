//! Platform abstraction layer
//!
//! Browser bindings live in `web` (wasm32 only): canvas lookup, DOM event
//! listeners, the animation-frame loop and the JS-facing API. Native builds
//! drive `Game` directly.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebGame;
