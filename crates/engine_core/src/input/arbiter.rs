// crates/engine_core/src/input/arbiter.rs
use engine_shared::InteractionMode;
use tracing::debug;

use crate::camera::CameraRig;
use crate::window::CursorControl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    /// The toggle key was pressed; flips regardless of open surfaces.
    ToggleKey,
    /// Every menu surface closed while menus owned input.
    SurfacesClosed,
    /// A menu surface opened while the camera owned input.
    SurfaceOpened,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: InteractionMode,
    pub to: InteractionMode,
    pub cause: TransitionCause,
}

/// Decides whether the camera or the menus own mouse and keyboard.
///
/// The camera's frozen flag and the cursor capture always mirror the mode:
/// `CameraControl` means unfrozen and captured, `MenuInteraction` means
/// frozen and released.
#[derive(Debug, Default)]
pub struct Arbiter {
    mode: InteractionMode,
}

impl Arbiter {
    /// Starts in `MenuInteraction` so nobody is dropped straight into mouse look.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Re-applies the side effects of the current mode. Used once at startup
    /// so collaborators agree with the initial state.
    pub fn enforce(&self, camera: &mut dyn CameraRig, cursor: &mut dyn CursorControl) {
        Self::enter(self.mode, camera, cursor);
    }

    /// Runs once per tick, before anything reads the mode.
    pub fn update(
        &mut self,
        toggle_just_pressed: bool,
        any_surface_open: bool,
        camera: &mut dyn CameraRig,
        cursor: &mut dyn CursorControl,
    ) -> Option<Transition> {
        let cause = match (toggle_just_pressed, any_surface_open, self.mode) {
            (true, _, _) => TransitionCause::ToggleKey,
            (false, false, InteractionMode::MenuInteraction) => TransitionCause::SurfacesClosed,
            (false, true, InteractionMode::CameraControl) => TransitionCause::SurfaceOpened,
            _ => return None,
        };

        let transition = Transition {
            from: self.mode,
            to: self.mode.toggled(),
            cause,
        };
        self.mode = transition.to;
        Self::enter(self.mode, camera, cursor);
        debug!(from = ?transition.from, to = ?transition.to, cause = ?cause, "interaction mode changed");
        Some(transition)
    }

    // State is updated first, then camera, then cursor.
    fn enter(mode: InteractionMode, camera: &mut dyn CameraRig, cursor: &mut dyn CursorControl) {
        match mode {
            InteractionMode::CameraControl => {
                camera.unfreeze();
                cursor.enable_cursor_capture();
            }
            InteractionMode::MenuInteraction => {
                camera.freeze();
                cursor.disable_cursor_capture();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FpsCamera;

    #[derive(Default)]
    struct FakeCursor {
        captured: bool,
        calls: u32,
    }

    impl CursorControl for FakeCursor {
        fn enable_cursor_capture(&mut self) {
            self.captured = true;
            self.calls += 1;
        }
        fn disable_cursor_capture(&mut self) {
            self.captured = false;
            self.calls += 1;
        }
        fn is_cursor_captured(&self) -> bool {
            self.captured
        }
    }

    struct Rig {
        arbiter: Arbiter,
        camera: FpsCamera,
        cursor: FakeCursor,
    }

    impl Rig {
        fn new() -> Self {
            let arbiter = Arbiter::new();
            let mut camera = FpsCamera::new(1280, 720);
            let mut cursor = FakeCursor::default();
            arbiter.enforce(&mut camera, &mut cursor);
            Self {
                arbiter,
                camera,
                cursor,
            }
        }

        fn tick(&mut self, toggle: bool, open: bool) -> Option<Transition> {
            let transition = self
                .arbiter
                .update(toggle, open, &mut self.camera, &mut self.cursor);
            self.assert_coupled();
            transition
        }

        fn assert_coupled(&self) {
            let camera_mode = self.arbiter.mode() == InteractionMode::CameraControl;
            assert_eq!(self.cursor.is_cursor_captured(), camera_mode);
            assert_eq!(self.camera.is_frozen(), !camera_mode);
        }
    }

    #[test]
    fn starts_in_menu_interaction_with_cursor_released() {
        let rig = Rig::new();
        assert_eq!(rig.arbiter.mode(), InteractionMode::MenuInteraction);
        rig.assert_coupled();
    }

    #[test]
    fn closed_surfaces_hand_input_to_the_camera() {
        let mut rig = Rig::new();
        let transition = rig.tick(false, false).expect("should switch");
        assert_eq!(transition.cause, TransitionCause::SurfacesClosed);
        assert_eq!(rig.arbiter.mode(), InteractionMode::CameraControl);

        let transition = rig.tick(false, true).expect("should switch back");
        assert_eq!(transition.cause, TransitionCause::SurfaceOpened);
        assert_eq!(rig.arbiter.mode(), InteractionMode::MenuInteraction);
    }

    #[test]
    fn unchanged_inputs_are_idempotent() {
        let mut rig = Rig::new();
        assert!(rig.tick(false, true).is_none());
        assert!(rig.tick(false, true).is_none());
        assert_eq!(rig.arbiter.mode(), InteractionMode::MenuInteraction);

        rig.tick(false, false);
        let calls = rig.cursor.calls;
        assert!(rig.tick(false, false).is_none());
        assert!(rig.tick(false, false).is_none());
        assert_eq!(rig.cursor.calls, calls);
    }

    #[test]
    fn toggle_always_flips() {
        for open in [false, true] {
            for start_in_camera in [false, true] {
                let mut rig = Rig::new();
                if start_in_camera {
                    rig.tick(false, false);
                }
                let before = rig.arbiter.mode();
                let transition = rig.tick(true, open).expect("toggle flips");
                assert_eq!(transition.cause, TransitionCause::ToggleKey);
                assert_eq!(transition.from, before);
                assert_eq!(rig.arbiter.mode(), before.toggled());
            }
        }
    }
}
