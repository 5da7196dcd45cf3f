// crates/engine_core/src/input/poller.rs

use std::collections::HashSet;

use engine_shared::{InputSnapshot, Key};
use glam::Vec2;
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};

use super::winit_adapter;

/// Low-level input collector. Platform callbacks feed it between ticks and
/// the frame driver takes one `InputSnapshot` per tick.
///
/// Held keys persist across snapshots; the just-pressed set and the mouse
/// delta are cleared every time a snapshot is taken.
#[derive(Debug, Default)]
pub struct InputPoller {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    mouse_position: Vec2,
    mouse_delta: Vec2,
}

impl InputPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a single winit WindowEvent and update internal key state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.handle_keyboard_input(key_event);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(key) = winit_adapter::key_from_mouse_button(*button) {
                    self.set_key_state(key, *state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(Vec2::new(position.x as f32, position.y as f32));
            }
            // Releases are not delivered to an unfocused window.
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    /// Raw mouse motion drives mouse look; it keeps arriving while the cursor
    /// is locked, unlike `CursorMoved`.
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.add_mouse_motion(Vec2::new(delta.0 as f32, delta.1 as f32));
        }
    }

    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        if key_event.repeat {
            return;
        }
        if let Some(key) = winit_adapter::key_from_physical(key_event.physical_key) {
            self.set_key_state(key, key_event.state);
        }
    }

    fn set_key_state(&mut self, key: Key, state: ElementState) {
        match state {
            ElementState::Pressed => self.press(key),
            ElementState::Released => self.release(key),
        }
    }

    pub fn press(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn move_cursor(&mut self, position: Vec2) {
        self.mouse_position = position;
    }

    pub fn add_mouse_motion(&mut self, delta: Vec2) {
        self.mouse_delta += delta;
    }

    /// Returns true if a given key is currently held.
    pub fn is_key_active(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Freezes everything gathered since the previous call into a snapshot.
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            keys_pressed: self.held.clone(),
            keys_just_pressed: std::mem::take(&mut self.just_pressed),
            mouse_position: self.mouse_position,
            mouse_delta: std::mem::take(&mut self.mouse_delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_state_persists_and_edges_do_not() {
        let mut poller = InputPoller::new();
        poller.press(Key::W);

        let first = poller.snapshot();
        assert!(first.is_pressed(Key::W));
        assert!(first.is_just_pressed(Key::W));

        let second = poller.snapshot();
        assert!(second.is_pressed(Key::W));
        assert!(!second.is_just_pressed(Key::W));
    }

    #[test]
    fn tap_within_one_tick_still_counts_as_just_pressed() {
        let mut poller = InputPoller::new();
        poller.press(Key::Escape);
        poller.release(Key::Escape);

        let snapshot = poller.snapshot();
        assert!(snapshot.is_just_pressed(Key::Escape));
        assert!(!snapshot.is_pressed(Key::Escape));
    }

    #[test]
    fn holding_a_key_does_not_retrigger() {
        let mut poller = InputPoller::new();
        poller.press(Key::Enter);
        poller.snapshot();
        poller.press(Key::Enter);
        assert!(!poller.snapshot().is_just_pressed(Key::Enter));
    }

    #[test]
    fn mouse_delta_accumulates_and_resets() {
        let mut poller = InputPoller::new();
        poller.move_cursor(Vec2::new(10.0, 20.0));
        poller.add_mouse_motion(Vec2::new(1.0, 2.0));
        poller.add_mouse_motion(Vec2::new(3.0, -1.0));

        let snapshot = poller.snapshot();
        assert_eq!(snapshot.mouse_delta, Vec2::new(4.0, 1.0));
        assert_eq!(snapshot.mouse_position, Vec2::new(10.0, 20.0));

        let next = poller.snapshot();
        assert_eq!(next.mouse_delta, Vec2::ZERO);
        assert_eq!(next.mouse_position, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut poller = InputPoller::new();
        poller.press(Key::W);
        poller.press(Key::LeftMouseButton);
        poller.handle_event(&WindowEvent::Focused(false));
        assert!(!poller.is_key_active(Key::W));
        assert!(!poller.is_key_active(Key::LeftMouseButton));
    }
}
