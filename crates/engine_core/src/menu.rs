// crates/engine_core/src/menu.rs
//! Input/graphics settings menu model. Drawing it is up to the UI layer;
//! this only tracks selection and writes edits back into the configuration.

use engine_shared::{InputSnapshot, Key};
use tracing::debug;

use crate::camera::{DEFAULT_FIELD_OF_VIEW, DEFAULT_SENSITIVITY};
use crate::config_store::Configuration;
use crate::input::config::GRAPHICS_SECTION;

const MAX_FPS_PRESETS: [&str; 5] = ["30", "60", "120", "144", "inf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRow {
    MouseSensitivity,
    FieldOfView,
    MaxFps,
    ShowFps,
    ShowPos,
    ShowIterationCount,
}

impl MenuRow {
    pub const ALL: [MenuRow; 6] = [
        MenuRow::MouseSensitivity,
        MenuRow::FieldOfView,
        MenuRow::MaxFps,
        MenuRow::ShowFps,
        MenuRow::ShowPos,
        MenuRow::ShowIterationCount,
    ];

    pub fn config_key(self) -> &'static str {
        match self {
            MenuRow::MouseSensitivity => "mouse_sensitivity",
            MenuRow::FieldOfView => "field_of_view",
            MenuRow::MaxFps => "max_fps",
            MenuRow::ShowFps => "show_fps",
            MenuRow::ShowPos => "show_pos",
            MenuRow::ShowIterationCount => "show_main_loop_iteration_count",
        }
    }
}

#[derive(Debug, Default)]
pub struct SettingsMenu {
    open: bool,
    selected: usize,
}

impl SettingsMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        if self.open != open {
            debug!(open, "settings menu");
        }
        self.open = open;
    }

    pub fn selected_row(&self) -> MenuRow {
        MenuRow::ALL[self.selected]
    }

    /// Handles one tick of menu input. Edits only land in `config`; their
    /// effect on the camera or loop happens at the next config-apply point.
    pub fn process(&mut self, snapshot: &InputSnapshot, config: &mut Configuration) {
        if !self.open {
            return;
        }

        let rows = MenuRow::ALL.len();
        if snapshot.is_just_pressed(Key::ArrowDown) {
            self.selected = (self.selected + 1) % rows;
        }
        if snapshot.is_just_pressed(Key::ArrowUp) {
            self.selected = (self.selected + rows - 1) % rows;
        }

        let row = self.selected_row();
        if snapshot.is_just_pressed(Key::ArrowRight) {
            adjust(row, 1, config);
        }
        if snapshot.is_just_pressed(Key::ArrowLeft) {
            adjust(row, -1, config);
        }
        if snapshot.is_just_pressed(Key::Enter) && is_flag(row) {
            adjust(row, 1, config);
        }
    }
}

fn is_flag(row: MenuRow) -> bool {
    matches!(
        row,
        MenuRow::ShowFps | MenuRow::ShowPos | MenuRow::ShowIterationCount
    )
}

fn current_f32(config: &Configuration, key: &str, default: f32) -> f32 {
    config
        .get(GRAPHICS_SECTION, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn adjust(row: MenuRow, direction: i32, config: &mut Configuration) {
    let key = row.config_key();
    let value = match row {
        MenuRow::MouseSensitivity => {
            let current = current_f32(config, key, DEFAULT_SENSITIVITY);
            format!("{:.2}", (current + 0.01 * direction as f32).max(0.01))
        }
        MenuRow::FieldOfView => {
            let current = current_f32(config, key, DEFAULT_FIELD_OF_VIEW);
            format!("{:.0}", (current + 5.0 * direction as f32).clamp(30.0, 120.0))
        }
        MenuRow::MaxFps => {
            let current = config
                .get(GRAPHICS_SECTION, key)
                .and_then(|v| MAX_FPS_PRESETS.iter().position(|p| *p == v.trim()))
                .unwrap_or(1);
            let next = (current as i32 + direction).clamp(0, MAX_FPS_PRESETS.len() as i32 - 1);
            MAX_FPS_PRESETS[next as usize].to_string()
        }
        MenuRow::ShowFps | MenuRow::ShowPos | MenuRow::ShowIterationCount => {
            let flipped = if config.is_on(GRAPHICS_SECTION, key) { "off" } else { "on" };
            flipped.to_string()
        }
    };
    config.set(GRAPHICS_SECTION, key, value);
}
