// crates/engine_core/src/app.rs

use engine_shared::{Action, InputSnapshot, InteractionMode};
use tracing::{info, trace};

use crate::camera::{CameraRig, FpsCamera};
use crate::config_store::{ConfigError, Configuration, HandlerTargets};
use crate::engine_loop::EngineLoop;
use crate::input::{Arbiter, InputDefaults, InputMap, InputPoller, Transition};
use crate::menu::SettingsMenu;
use crate::settings::StartupSettings;
use crate::stats::DisplayStats;
use crate::window::CursorControl;

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub mode: InteractionMode,
    pub transition: Option<Transition>,
    pub config_errors: Vec<ConfigError>,
    /// This tick's input for menu surfaces outside the engine. Only set while
    /// `MenuInteraction` owns the input.
    pub menu_input: Option<InputSnapshot>,
}

/// Top-level owner of everything the input layer touches. Subsystems are
/// handed to each other per call; nothing is reached through globals.
pub struct App<W: CursorControl> {
    pub config: Configuration,
    pub input_map: InputMap,
    pub poller: InputPoller,
    pub arbiter: Arbiter,
    pub camera: FpsCamera,
    pub main_loop: EngineLoop,
    pub menu: SettingsMenu,
    pub stats: DisplayStats,
    pub settings: StartupSettings,
    pub window_title: String,
    window: W,
}

impl<W: CursorControl> App<W> {
    /// Registers the live handlers and applies the current configuration once,
    /// then brings camera and cursor in line with the initial mode.
    pub fn new(mut config: Configuration, mut window: W) -> Self {
        let settings = StartupSettings::from_config(&config);
        let mut camera = FpsCamera::new(settings.resolution.0, settings.resolution.1);
        let mut main_loop = EngineLoop::new(settings.max_fps);

        InputDefaults::register_handlers(&mut config);
        let startup_errors = config.apply_all(&mut HandlerTargets {
            camera: &mut camera,
            rate: &mut main_loop,
        });

        let arbiter = Arbiter::new();
        arbiter.enforce(&mut camera, &mut window);

        info!(
            width = settings.resolution.0,
            height = settings.resolution.1,
            fullscreen = settings.fullscreen,
            max_fps = main_loop.target_rate(),
            uncapped = !main_loop.rate_limiter_enabled(),
            rejected = startup_errors.len(),
            "engine configured"
        );

        Self {
            config,
            input_map: InputMap::default(),
            poller: InputPoller::new(),
            arbiter,
            camera,
            main_loop,
            menu: SettingsMenu::new(),
            stats: DisplayStats::default(),
            settings,
            window_title: "Rust Engine".to_string(),
            window,
        }
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn mode(&self) -> InteractionMode {
        self.arbiter.mode()
    }

    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        self.camera.resize(width_px, height_px);
    }

    /// One tick of the frame driver. `overlay_open` reports menu surfaces the
    /// engine does not own itself (e.g. an application's inventory screen).
    ///
    /// Stages never abort the tick: a rejected config value only shows up in
    /// the report.
    pub fn tick(&mut self, dt: f32, overlay_open: bool) -> TickReport {
        // (a) Input gathered since the previous tick.
        let snapshot = self.poller.snapshot();

        // (b) Mode arbitration, before anything reads the mode.
        let toggle_pressed = self
            .input_map
            .is_just_pressed(&self.config, &snapshot, Action::ToggleMenu);
        let any_surface_open = self.menu.is_open() || overlay_open;
        let transition = self.arbiter.update(
            toggle_pressed,
            any_surface_open,
            &mut self.camera,
            &mut self.window,
        );
        let mode = self.arbiter.mode();

        // (c) Camera movement.
        if mode == InteractionMode::CameraControl {
            let movement = self.input_map.resolve_movement(&self.config, &snapshot);
            self.camera.update(&movement, snapshot.mouse_delta, dt);
        }

        // (d) Menu bookkeeping: the toggle opens the settings menu when it
        // handed input to the menus and closes it otherwise.
        if toggle_pressed {
            self.menu.set_open(mode == InteractionMode::MenuInteraction);
        }

        // (e) Menu input, for the built-in menu and whoever drives overlays.
        let menu_input = (mode == InteractionMode::MenuInteraction).then(|| {
            self.menu.process(&snapshot, &mut self.config);
            snapshot
        });

        // (f) Config-apply point.
        let config_errors = self.apply_config_changes();

        // (g) Display stats.
        self.stats.refresh(&self.config, &self.main_loop, &self.camera);

        trace!(?mode, dt, "tick");
        TickReport {
            mode,
            transition,
            config_errors,
            menu_input,
        }
    }

    /// Runs handlers for every configuration value changed since the last
    /// apply. Also called by `tick`.
    pub fn apply_config_changes(&mut self) -> Vec<ConfigError> {
        if !self.config.has_pending_changes() {
            return Vec::new();
        }
        self.config.apply_pending(&mut HandlerTargets {
            camera: &mut self.camera,
            rate: &mut self.main_loop,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_shared::Key;

    #[derive(Default)]
    struct FakeCursor {
        captured: bool,
    }

    impl CursorControl for FakeCursor {
        fn enable_cursor_capture(&mut self) {
            self.captured = true;
        }
        fn disable_cursor_capture(&mut self) {
            self.captured = false;
        }
        fn is_cursor_captured(&self) -> bool {
            self.captured
        }
    }

    fn app(entries: &[(&str, &str, &str)]) -> App<FakeCursor> {
        App::new(
            Configuration::from_entries(entries.iter().copied()),
            FakeCursor::default(),
        )
    }

    #[test]
    fn starts_in_menu_mode_with_camera_frozen() {
        let app = app(&[]);
        assert_eq!(app.mode(), InteractionMode::MenuInteraction);
        assert!(app.camera.is_frozen());
        assert!(!app.window().is_cursor_captured());
    }

    #[test]
    fn startup_applies_live_settings() {
        let app = app(&[
            ("graphics", "mouse_sensitivity", "0.3"),
            ("graphics", "field_of_view", "70"),
            ("graphics", "max_fps", "inf"),
        ]);
        assert_eq!(app.camera.sensitivity(), 0.3);
        assert_eq!(app.camera.field_of_view(), 70.0);
        assert!(!app.main_loop.rate_limiter_enabled());
    }

    #[test]
    fn escape_in_camera_mode_opens_the_menu_and_it_stays_open() {
        let mut app = app(&[]);
        assert_eq!(app.tick(0.016, false).mode, InteractionMode::CameraControl);

        app.poller.press(Key::Escape);
        let report = app.tick(0.016, false);
        assert_eq!(report.mode, InteractionMode::MenuInteraction);
        assert!(app.menu.is_open());

        app.poller.release(Key::Escape);
        assert_eq!(app.tick(0.016, false).mode, InteractionMode::MenuInteraction);
        assert!(app.camera.is_frozen());
    }

    #[test]
    fn movement_only_happens_in_camera_mode() {
        let mut app = app(&[]);
        app.poller.press(Key::W);
        app.tick(0.5, true);
        assert_eq!(app.camera.position, glam::Vec3::ZERO);

        app.tick(0.5, false);
        assert_ne!(app.camera.position, glam::Vec3::ZERO);
    }

    #[test]
    fn overlay_reclaims_input_from_the_camera() {
        let mut app = app(&[]);
        app.tick(0.016, false);
        let report = app.tick(0.016, true);
        assert_eq!(report.mode, InteractionMode::MenuInteraction);
        assert!(!app.menu.is_open());
        assert!(!app.window().is_cursor_captured());
    }
}
