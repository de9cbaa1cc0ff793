use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Returned by app callbacks to keep running or stop the event loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// A program driven by [`Runtime`](crate::window::Runtime).
///
/// The app value is produced by the runtime's setup callback once the window
/// and GPU exist, so implementors own fully initialized GPU state.
pub trait App {
    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
