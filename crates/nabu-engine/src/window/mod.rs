//! Window + event loop.
//!
//! Owns the `winit` event loop and the single mockup window, and wires the
//! window to its GPU context.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
