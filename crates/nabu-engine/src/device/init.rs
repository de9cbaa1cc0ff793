/// Device and surface settings requested at startup.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when one is offered.
    ///
    /// The mockups turn this off so color literals are stored unconverted.
    pub prefer_srgb: bool,

    /// Swap behavior. FIFO is available everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Preferred alpha mode; ignored when the surface does not support it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Hint for the number of frames queued ahead of presentation.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Settings for drawing literal, unconverted colors.
    pub fn linear_passthrough() -> Self {
        Self { prefer_srgb: false, ..Self::default() }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
