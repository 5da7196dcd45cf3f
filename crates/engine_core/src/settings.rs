// crates/engine_core/src/settings.rs
//! Settings read once at startup, before the window exists.

use crate::config_store::Configuration;
use crate::input::config::GRAPHICS_SECTION;

pub const DEFAULT_RESOLUTION: (u32, u32) = (1280, 720);
pub const DEFAULT_MAX_FPS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupSettings {
    pub resolution: (u32, u32),
    pub fullscreen: bool,
    /// Initial tick rate. `graphics.max_fps` is applied again by its live
    /// handler, which is what turns `"inf"` into an uncapped loop.
    pub max_fps: u32,
}

impl Default for StartupSettings {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            fullscreen: false,
            max_fps: DEFAULT_MAX_FPS,
        }
    }
}

impl StartupSettings {
    pub fn from_config(config: &Configuration) -> Self {
        let resolution = config
            .get(GRAPHICS_SECTION, "resolution")
            .and_then(extract_width_height_from_resolution)
            .unwrap_or(DEFAULT_RESOLUTION);

        let fullscreen = config
            .get(GRAPHICS_SECTION, "fullscreen")
            .is_some_and(parse_on_off_to_bool);

        let max_fps = config
            .get(GRAPHICS_SECTION, "max_fps")
            .map(|text| parse_int_or_default(text, DEFAULT_MAX_FPS as i64))
            .and_then(|rate| u32::try_from(rate).ok())
            .filter(|&rate| rate > 0)
            .unwrap_or(DEFAULT_MAX_FPS);

        Self {
            resolution,
            fullscreen,
            max_fps,
        }
    }
}

/// Parses `"<width>x<height>"`. Both sides must be positive integers.
pub fn extract_width_height_from_resolution(resolution: &str) -> Option<(u32, u32)> {
    let (width, height) = resolution.trim().split_once('x')?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    (width > 0 && height > 0).then_some((width, height))
}

/// Only `"on"` is true.
pub fn parse_on_off_to_bool(user_option: &str) -> bool {
    user_option.trim() == "on"
}

pub fn parse_int_or_default(text: &str, default_value: i64) -> i64 {
    text.trim().parse().unwrap_or(default_value)
}
