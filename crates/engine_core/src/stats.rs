// crates/engine_core/src/stats.rs

use glam::Vec3;

use crate::camera::FpsCamera;
use crate::config_store::Configuration;
use crate::engine_loop::EngineLoop;
use crate::input::config::GRAPHICS_SECTION;

/// Display-only engine stats. A field is `None` when its `graphics.show_*`
/// flag is off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayStats {
    pub fps: Option<String>,
    pub position: Option<String>,
    pub iteration_count: Option<String>,
}

impl DisplayStats {
    pub fn refresh(&mut self, config: &Configuration, engine_loop: &EngineLoop, camera: &FpsCamera) {
        self.fps = config
            .is_on(GRAPHICS_SECTION, "show_fps")
            .then(|| format!("{}", engine_loop.average_fps().round() as i64));
        self.position = config
            .is_on(GRAPHICS_SECTION, "show_pos")
            .then(|| vec3_to_string(camera.position, 2));
        self.iteration_count = config
            .is_on(GRAPHICS_SECTION, "show_main_loop_iteration_count")
            .then(|| engine_loop.iteration_count().to_string());
    }

    /// Enabled stats joined into one line, or `None` if all are hidden.
    pub fn summary(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.fps.as_ref().map(|fps| format!("{fps} fps")),
            self.position.clone(),
            self.iteration_count.as_ref().map(|n| format!("#{n}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        (!parts.is_empty()).then(|| parts.join("  "))
    }
}

pub fn vec3_to_string(v: Vec3, decimals: usize) -> String {
    format!("({:.*}, {:.*}, {:.*})", decimals, v.x, decimals, v.y, decimals, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_stats_stay_empty() {
        let mut stats = DisplayStats::default();
        stats.refresh(&Configuration::new(), &EngineLoop::new(60), &FpsCamera::new(1280, 720));
        assert_eq!(stats, DisplayStats::default());
        assert_eq!(stats.summary(), None);
    }

    #[test]
    fn enabled_stats_are_formatted() {
        let config = Configuration::from_entries([
            ("graphics", "show_pos", "on"),
            ("graphics", "show_main_loop_iteration_count", "on"),
            ("graphics", "show_fps", "off"),
        ]);
        let mut camera = FpsCamera::new(1280, 720);
        camera.position = Vec3::new(1.0, -2.5, 3.456);

        let mut stats = DisplayStats::default();
        stats.refresh(&config, &EngineLoop::new(60), &camera);

        assert_eq!(stats.fps, None);
        assert_eq!(stats.position.as_deref(), Some("(1.00, -2.50, 3.46)"));
        assert_eq!(stats.iteration_count.as_deref(), Some("0"));
        assert_eq!(stats.summary().as_deref(), Some("(1.00, -2.50, 3.46)  #0"));
    }
}
