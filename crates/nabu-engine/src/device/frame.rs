/// A surface texture acquired for one frame, plus its encoder.
///
/// Hand it back to [`Gpu::submit`](super::Gpu::submit) promptly: the next
/// frame cannot be acquired while this one is alive.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
