//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw lists and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers, textures) and
//! creates them once in `new`.
//!
//! Convention:
//! - CPU geometry is in logical pixels (bottom-left origin, +Y up).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod ctx;
mod scene;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene::{SceneRenderer, SceneReport};
