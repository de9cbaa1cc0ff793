//! Nabu engine crate.
//!
//! Window, GPU and text plumbing shared by the mockup programs: a glyph cache
//! built once at startup, a y-up draw list of rectangles, rounded rectangles,
//! images and text runs, and the wgpu renderers that consume it.

pub mod device;
pub mod window;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod scene;
pub mod render;
pub mod text;
pub mod assets;
