// crates/engine_core/src/input/config.rs

use engine_shared::{Action, Key};

use crate::config_store::{Configuration, HandlerError, HandlerTargets};

pub const INPUT_SECTION: &str = "input";
pub const GRAPHICS_SECTION: &str = "graphics";

/// Centralized defaults for input configuration.
pub struct InputDefaults;

impl InputDefaults {
    /// Compiled-in binding per action, in `Action::index` order.
    pub const BINDINGS: [(Action, Key); Action::COUNT] = [
        (Action::Forward, Key::W),
        (Action::Back, Key::S),
        (Action::Left, Key::A),
        (Action::Right, Key::D),
        (Action::Up, Key::Space),
        (Action::Down, Key::LeftShift),
        (Action::SlowMove, Key::LeftControl),
        (Action::FastMove, Key::Tab),
        (Action::ToggleMenu, Key::Escape),
    ];

    /// Registers the live handlers for graphics settings. Calling this again
    /// replaces the handlers instead of stacking them.
    pub fn register_handlers(config: &mut Configuration) {
        config.register_handler(GRAPHICS_SECTION, "mouse_sensitivity", on_mouse_sensitivity);
        config.register_handler(GRAPHICS_SECTION, "field_of_view", on_field_of_view);
        config.register_handler(GRAPHICS_SECTION, "max_fps", on_max_fps);
    }
}

// Every action must have a default, at its own index.
const _: () = {
    let mut i = 0;
    while i < Action::COUNT {
        assert!(InputDefaults::BINDINGS[i].0.index() == i);
        i += 1;
    }
};

fn parse_finite(value: &str) -> Result<f32, HandlerError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(HandlerError::NotAFloat)
}

fn on_mouse_sensitivity(value: &str, targets: &mut HandlerTargets<'_>) -> Result<(), HandlerError> {
    targets.camera.set_sensitivity(parse_finite(value)?);
    Ok(())
}

fn on_field_of_view(value: &str, targets: &mut HandlerTargets<'_>) -> Result<(), HandlerError> {
    targets.camera.set_field_of_view(parse_finite(value)?);
    Ok(())
}

/// `"inf"` uncaps the loop; a positive integer caps it at that rate.
fn on_max_fps(value: &str, targets: &mut HandlerTargets<'_>) -> Result<(), HandlerError> {
    let value = value.trim();
    if value == "inf" {
        targets.rate.set_rate_limiter_enabled(false);
        return Ok(());
    }

    let rate = value
        .parse::<u32>()
        .ok()
        .filter(|&rate| rate > 0)
        .ok_or(HandlerError::NotARate)?;
    targets.rate.set_target_rate(rate);
    targets.rate.set_rate_limiter_enabled(true);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FpsCamera;
    use crate::engine_loop::{EngineLoop, RateControl};

    fn apply(config: &mut Configuration, camera: &mut FpsCamera, engine_loop: &mut EngineLoop) -> usize {
        config
            .apply_pending(&mut HandlerTargets {
                camera,
                rate: engine_loop,
            })
            .len()
    }

    fn setup() -> (Configuration, FpsCamera, EngineLoop) {
        let mut config = Configuration::new();
        InputDefaults::register_handlers(&mut config);
        (config, FpsCamera::new(1280, 720), EngineLoop::new(60))
    }

    #[test]
    fn max_fps_number_caps_the_loop() {
        let (mut config, mut camera, mut engine_loop) = setup();
        engine_loop.set_rate_limiter_enabled(false);

        config.set(GRAPHICS_SECTION, "max_fps", "30");
        assert_eq!(apply(&mut config, &mut camera, &mut engine_loop), 0);
        assert!(engine_loop.rate_limiter_enabled());
        assert_eq!(engine_loop.target_rate(), 30);
    }

    #[test]
    fn max_fps_inf_uncaps_the_loop() {
        let (mut config, mut camera, mut engine_loop) = setup();
        config.set(GRAPHICS_SECTION, "max_fps", "inf");
        assert_eq!(apply(&mut config, &mut camera, &mut engine_loop), 0);
        assert!(!engine_loop.rate_limiter_enabled());
    }

    #[test]
    fn max_fps_garbage_leaves_limiter_untouched() {
        for (limited, rate) in [(true, 144), (false, 30)] {
            let (mut config, mut camera, mut engine_loop) = setup();
            engine_loop.set_target_rate(rate);
            engine_loop.set_rate_limiter_enabled(limited);

            for bad in ["abc", "", "0", "-5", "12.5"] {
                config.set(GRAPHICS_SECTION, "max_fps", bad);
                assert_eq!(apply(&mut config, &mut camera, &mut engine_loop), 1, "{bad:?}");
                assert_eq!(engine_loop.rate_limiter_enabled(), limited);
                assert_eq!(engine_loop.target_rate(), rate);
            }
        }
    }

    #[test]
    fn float_settings_apply_or_keep_previous() {
        let (mut config, mut camera, mut engine_loop) = setup();

        config.set(GRAPHICS_SECTION, "mouse_sensitivity", "0.25");
        config.set(GRAPHICS_SECTION, "field_of_view", " 75 ");
        assert_eq!(apply(&mut config, &mut camera, &mut engine_loop), 0);
        assert_eq!(camera.sensitivity(), 0.25);
        assert_eq!(camera.field_of_view(), 75.0);

        config.set(GRAPHICS_SECTION, "mouse_sensitivity", "very");
        config.set(GRAPHICS_SECTION, "field_of_view", "NaN");
        assert_eq!(apply(&mut config, &mut camera, &mut engine_loop), 2);
        assert_eq!(camera.sensitivity(), 0.25);
        assert_eq!(camera.field_of_view(), 75.0);
    }

    #[test]
    fn handlers_ignore_other_sections() {
        let (mut config, mut camera, mut engine_loop) = setup();
        config.set(INPUT_SECTION, "max_fps", "1");
        assert_eq!(apply(&mut config, &mut camera, &mut engine_loop), 0);
        assert_eq!(engine_loop.target_rate(), 60);
    }
}
