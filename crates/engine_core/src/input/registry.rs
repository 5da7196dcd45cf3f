// crates/engine_core/src/input/registry.rs
use engine_shared::{Action, Key};

use super::config::InputDefaults;

/// Default key per action. Every action always has one, so lookups are total.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    defaults: [Key; Action::COUNT],
}

impl Default for ActionRegistry {
    fn default() -> Self {
        let mut defaults = [Key::Escape; Action::COUNT];
        for (action, key) in InputDefaults::BINDINGS {
            defaults[action.index()] = key;
        }
        Self { defaults }
    }
}

impl ActionRegistry {
    /// Overrides the compiled-in default for one action.
    pub fn with_default(mut self, action: Action, key: Key) -> Self {
        self.defaults[action.index()] = key;
        self
    }

    pub fn default_key(&self, action: Action) -> Key {
        self.defaults[action.index()]
    }

    /// Looks an action up by its config name. Asking for a name outside the
    /// fixed action set is a programming error.
    pub fn action_named(&self, name: &str) -> Action {
        match Action::from_config_name(name) {
            Some(action) => action,
            None => panic!("no action named {name:?} is registered"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_its_compiled_in_default() {
        let registry = ActionRegistry::default();
        for (action, key) in InputDefaults::BINDINGS {
            assert_eq!(registry.default_key(action), key);
        }
        assert_eq!(registry.default_key(Action::Forward), Key::W);
        assert_eq!(registry.default_key(Action::SlowMove), Key::LeftControl);
        assert_eq!(registry.default_key(Action::ToggleMenu), Key::Escape);
    }

    #[test]
    fn overriding_one_default_leaves_the_rest() {
        let registry = ActionRegistry::default().with_default(Action::Up, Key::E);
        assert_eq!(registry.default_key(Action::Up), Key::E);
        assert_eq!(registry.default_key(Action::Down), Key::LeftShift);
    }

    #[test]
    fn known_names_resolve_to_actions() {
        let registry = ActionRegistry::default();
        assert_eq!(registry.action_named("fast_move"), Action::FastMove);
    }

    #[test]
    #[should_panic(expected = "no action named")]
    fn unknown_action_name_is_fatal() {
        ActionRegistry::default().action_named("jump");
    }
}
