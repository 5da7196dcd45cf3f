// crates/engine_shared/src/input_types.rs
//! Plain input types shared by the engine core and anything consuming resolved input.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use glam::Vec2;

/// Abstract hardware key. Mouse buttons live in the same space so they can be
/// bound to actions like any keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Space,
    Tab,
    Escape,
    Enter,
    Backspace,
    CapsLock,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    LeftMouseButton,
    RightMouseButton,
    MiddleMouseButton,
}

/// Canonical config names. The first entry for a key is the name it prints as.
const KEY_NAMES: &[(&str, Key)] = &[
    ("a", Key::A), ("b", Key::B), ("c", Key::C), ("d", Key::D),
    ("e", Key::E), ("f", Key::F), ("g", Key::G), ("h", Key::H),
    ("i", Key::I), ("j", Key::J), ("k", Key::K), ("l", Key::L),
    ("m", Key::M), ("n", Key::N), ("o", Key::O), ("p", Key::P),
    ("q", Key::Q), ("r", Key::R), ("s", Key::S), ("t", Key::T),
    ("u", Key::U), ("v", Key::V), ("w", Key::W), ("x", Key::X),
    ("y", Key::Y), ("z", Key::Z),
    ("0", Key::Digit0), ("1", Key::Digit1), ("2", Key::Digit2),
    ("3", Key::Digit3), ("4", Key::Digit4), ("5", Key::Digit5),
    ("6", Key::Digit6), ("7", Key::Digit7), ("8", Key::Digit8),
    ("9", Key::Digit9),
    ("f1", Key::F1), ("f2", Key::F2), ("f3", Key::F3), ("f4", Key::F4),
    ("f5", Key::F5), ("f6", Key::F6), ("f7", Key::F7), ("f8", Key::F8),
    ("f9", Key::F9), ("f10", Key::F10), ("f11", Key::F11), ("f12", Key::F12),
    ("space", Key::Space),
    ("tab", Key::Tab),
    ("escape", Key::Escape),
    ("esc", Key::Escape),
    ("enter", Key::Enter),
    ("return", Key::Enter),
    ("backspace", Key::Backspace),
    ("caps_lock", Key::CapsLock),
    ("left_shift", Key::LeftShift),
    ("lshift", Key::LeftShift),
    ("shift", Key::LeftShift),
    ("right_shift", Key::RightShift),
    ("rshift", Key::RightShift),
    ("left_control", Key::LeftControl),
    ("lctrl", Key::LeftControl),
    ("ctrl", Key::LeftControl),
    ("right_control", Key::RightControl),
    ("rctrl", Key::RightControl),
    ("left_alt", Key::LeftAlt),
    ("alt", Key::LeftAlt),
    ("right_alt", Key::RightAlt),
    ("up", Key::ArrowUp),
    ("down", Key::ArrowDown),
    ("left", Key::ArrowLeft),
    ("right", Key::ArrowRight),
    ("left_mouse_button", Key::LeftMouseButton),
    ("lmb", Key::LeftMouseButton),
    ("right_mouse_button", Key::RightMouseButton),
    ("rmb", Key::RightMouseButton),
    ("middle_mouse_button", Key::MiddleMouseButton),
    ("mmb", Key::MiddleMouseButton),
];

impl Key {
    /// Looks a key up by its config name. Surrounding whitespace and case are
    /// ignored; empty or unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Key> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        KEY_NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|&(_, key)| key)
    }

    /// Canonical config name of this key.
    pub fn name(self) -> &'static str {
        KEY_NAMES
            .iter()
            .find(|&&(_, key)| key == self)
            .map(|&(name, _)| name)
            .unwrap_or("unknown")
    }

    /// Every accepted config name with the key it selects, aliases included.
    pub fn names() -> impl Iterator<Item = (&'static str, Key)> {
        KEY_NAMES.iter().copied()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyName(pub String);

impl fmt::Display for UnknownKeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key name {:?}", self.0)
    }
}

impl std::error::Error for UnknownKeyName {}

impl FromStr for Key {
    type Err = UnknownKeyName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::from_name(s).ok_or_else(|| UnknownKeyName(s.to_string()))
    }
}

/// Logical input intent, independent of the physical key bound to it.
/// The set is closed: adding a variant means adding a default binding too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward = 0,
    Back = 1,
    Left = 2,
    Right = 3,
    Up = 4,
    Down = 5,
    SlowMove = 6,
    FastMove = 7,
    ToggleMenu = 8,
}

impl Action {
    pub const COUNT: usize = 9;

    pub const ALL: [Action; Action::COUNT] = [
        Action::Forward,
        Action::Back,
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::SlowMove,
        Action::FastMove,
        Action::ToggleMenu,
    ];

    /// The eight actions that drive free camera movement.
    pub const MOVEMENT: [Action; 8] = [
        Action::SlowMove,
        Action::FastMove,
        Action::Forward,
        Action::Left,
        Action::Back,
        Action::Right,
        Action::Up,
        Action::Down,
    ];

    /// Key under the `input` config section.
    pub const fn config_name(self) -> &'static str {
        match self {
            Action::Forward => "forward",
            Action::Back => "back",
            Action::Left => "left",
            Action::Right => "right",
            Action::Up => "up",
            Action::Down => "down",
            Action::SlowMove => "slow_move",
            Action::FastMove => "fast_move",
            Action::ToggleMenu => "toggle_menu",
        }
    }

    pub fn from_config_name(name: &str) -> Option<Action> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.config_name() == name)
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}

/// Which subsystem currently owns mouse and keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Mouse moves the camera.
    CameraControl,
    /// Mouse interacts with UI menus.
    #[default]
    MenuInteraction,
}

impl InteractionMode {
    pub fn toggled(self) -> Self {
        match self {
            InteractionMode::CameraControl => InteractionMode::MenuInteraction,
            InteractionMode::MenuInteraction => InteractionMode::CameraControl,
        }
    }
}

/// Held state of every movement action after binding resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementInput {
    pub slow: bool,
    pub fast: bool,
    pub forward: bool,
    pub left: bool,
    pub back: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Immutable view of the input accumulated since the previous tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub keys_pressed: HashSet<Key>,
    pub keys_just_pressed: HashSet<Key>,
    pub mouse_position: Vec2,
    /// Cursor travel since the previous snapshot.
    pub mouse_delta: Vec2,
}

impl InputSnapshot {
    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    pub fn keys_just_pressed(&self) -> &HashSet<Key> {
        &self.keys_just_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_round_trip_through_canonical_name() {
        for (_, key) in Key::names() {
            assert_eq!(Key::from_name(key.name()), Some(key));
        }
    }

    #[test]
    fn key_lookup_ignores_case_and_padding() {
        assert_eq!(Key::from_name("  W "), Some(Key::W));
        assert_eq!(Key::from_name("LEFT_CONTROL"), Some(Key::LeftControl));
        assert_eq!(Key::from_name("Esc"), Some(Key::Escape));
    }

    #[test]
    fn blank_and_unknown_key_names_are_rejected() {
        assert_eq!(Key::from_name(""), None);
        assert_eq!(Key::from_name("   \t"), None);
        assert_eq!(Key::from_name("hyper"), None);
        assert!("left control".parse::<Key>().is_err());
    }

    #[test]
    fn action_config_names_are_unique() {
        for action in Action::ALL {
            assert_eq!(Action::from_config_name(action.config_name()), Some(action));
            assert_eq!(Action::ALL[action.index()], action);
        }
        assert_eq!(Action::from_config_name("jump"), None);
    }

    #[test]
    fn mode_toggle_flips() {
        let mode = InteractionMode::default();
        assert_eq!(mode, InteractionMode::MenuInteraction);
        assert_eq!(mode.toggled(), InteractionMode::CameraControl);
        assert_eq!(mode.toggled().toggled(), mode);
    }
}
