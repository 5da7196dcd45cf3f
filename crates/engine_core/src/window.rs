// crates/engine_core/src/window.rs

use tracing::warn;
use winit::window::{CursorGrabMode, Window};

/// Cursor ownership as seen by the mode arbiter.
pub trait CursorControl {
    /// Hide the cursor and keep it inside the window (mouse look).
    fn enable_cursor_capture(&mut self);
    /// Show the cursor and let it move freely (menu interaction).
    fn disable_cursor_capture(&mut self);
    fn is_cursor_captured(&self) -> bool;
}

/// Owns the platform window and tracks the cursor state we asked for.
pub struct WinitWindow {
    pub window: Window,
    captured: bool,
}

impl WinitWindow {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            captured: false,
        }
    }
}

impl CursorControl for WinitWindow {
    fn enable_cursor_capture(&mut self) {
        // Not every platform supports Locked; Confined is the closest fallback.
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(err) = grabbed {
            warn!("cursor grab unavailable: {err}");
        }
        self.window.set_cursor_visible(false);
        self.captured = true;
    }

    fn disable_cursor_capture(&mut self) {
        if let Err(err) = self.window.set_cursor_grab(CursorGrabMode::None) {
            warn!("failed to release cursor grab: {err}");
        }
        self.window.set_cursor_visible(true);
        self.captured = false;
    }

    fn is_cursor_captured(&self) -> bool {
        self.captured
    }
}
