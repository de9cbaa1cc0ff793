//! Fill colors shared between the draw list and the renderers.

pub mod color;

pub use color::Color;
