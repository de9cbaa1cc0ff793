use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::render::RenderCtx;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Mockups are laid out at fixed pixel coordinates.
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "nabu".to_string(),
            initial_size: LogicalSize::new(1200.0, 768.0),
            resizable: false,
        }
    }
}

/// Entry point for the event loop.
pub struct Runtime;

impl Runtime {
    /// Opens one window and runs until it is closed.
    ///
    /// `setup` runs exactly once, after the window and its GPU context exist,
    /// and builds the app from a [`RenderCtx`]. Any error from window/GPU
    /// creation or from `setup` ends the loop and is returned here.
    pub fn run<A, S>(config: RuntimeConfig, gpu_init: GpuInit, setup: S) -> Result<()>
    where
        A: CoreApp + 'static,
        S: FnOnce(&RenderCtx<'_>) -> Result<A>,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, setup);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => {
                log::info!("window closed; shutting down");
                Ok(())
            }
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A, S> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    setup: Option<S>,

    // Declared before `window` so GPU resources owned by the app are released
    // before the device and surface.
    app: Option<A>,
    window: Option<WindowEntry>,
    window_id: Option<WindowId>,

    failure: Option<anyhow::Error>,
}

impl<A, S> AppState<A, S>
where
    A: CoreApp + 'static,
    S: FnOnce(&RenderCtx<'_>) -> Result<A>,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, setup: S) -> Self {
        Self {
            config,
            gpu_init,
            setup: Some(setup),
            app: None,
            window: None,
            window_id: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.record_failure(err);
        event_loop.exit();
    }

    /// Keeps the first fatal error for [`Runtime::run`] to return; its caller
    /// reports it.
    fn record_failure(&mut self, err: anyhow::Error) {
        match &self.failure {
            None => self.failure = Some(err),
            Some(first) => log::debug!("ignoring error after {first:#}: {err:#}"),
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.app = None;
        self.window = None;
        event_loop.exit();
    }

    /// Creates the window, its GPU context and, through `setup`, the app.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let setup = self
            .setup
            .take()
            .ok_or_else(|| anyhow!("setup already ran"))?;

        let app = entry.with(|fields| {
            let viewport = WindowCtx { window: fields.window }.viewport();
            let gpu = fields.gpu;
            let rctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), viewport);
            setup(&rctx)
        })?;

        entry.with_window(|w| w.request_redraw());

        self.app = Some(app);
        self.window = Some(entry);
        self.window_id = Some(id);
        Ok(())
    }

    fn redraw(&mut self) -> AppControl {
        let (Some(app), Some(entry)) = (self.app.as_mut(), self.window.as_mut()) else {
            return AppControl::Continue;
        };

        entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx { window: fields.window },
                gpu: fields.gpu,
            };
            app.on_frame(&mut ctx)
        })
    }
}

impl<A, S> ApplicationHandler for AppState<A, S>
where
    A: CoreApp + 'static,
    S: FnOnce(&RenderCtx<'_>) -> Result<A>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.failure.is_some() {
            return;
        }

        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the scene is static but the loop mirrors a
        // classic poll-and-draw program.
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window_id != Some(window_id) {
            return;
        }

        if let Some(app) = self.app.as_mut() {
            if app.on_window_event(&event) == AppControl::Exit {
                self.shutdown(event_loop);
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    self.fail(event_loop, anyhow!("fatal surface error"));
                    self.app = None;
                    self.window = None;
                }
            }

            _ => {}
        }
    }
}
