// crates/engine_core/src/input/map.rs
use engine_shared::{Action, InputSnapshot, Key, MovementInput};

use super::config::INPUT_SECTION;
use super::registry::ActionRegistry;
use crate::config_store::Configuration;

/// Resolves actions to keys: a valid `input.<action>` override wins, anything
/// else falls back to the registry default. Nothing is cached, so a config
/// change is visible on the very next lookup.
#[derive(Debug, Clone, Default)]
pub struct InputMap {
    registry: ActionRegistry,
}

impl InputMap {
    pub fn new(registry: ActionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// The configured key for `action`, if the config holds a valid key name.
    pub fn configured_key(&self, config: &Configuration, action: Action) -> Option<Key> {
        config
            .get(INPUT_SECTION, action.config_name())
            .and_then(Key::from_name)
    }

    pub fn resolve(&self, config: &Configuration, action: Action) -> Key {
        self.configured_key(config, action)
            .unwrap_or_else(|| self.registry.default_key(action))
    }

    /// String-keyed variant for callers holding a config name. Panics on a
    /// name outside the action set.
    pub fn resolve_named(&self, config: &Configuration, name: &str) -> Key {
        self.resolve(config, self.registry.action_named(name))
    }

    /// Current binding of every action, in `Action::index` order.
    pub fn bindings(&self, config: &Configuration) -> [Key; Action::COUNT] {
        Action::ALL.map(|action| self.resolve(config, action))
    }

    pub fn is_held(&self, config: &Configuration, snapshot: &InputSnapshot, action: Action) -> bool {
        snapshot.is_pressed(self.resolve(config, action))
    }

    pub fn is_just_pressed(
        &self,
        config: &Configuration,
        snapshot: &InputSnapshot,
        action: Action,
    ) -> bool {
        snapshot.is_just_pressed(self.resolve(config, action))
    }

    pub fn resolve_movement(&self, config: &Configuration, snapshot: &InputSnapshot) -> MovementInput {
        let mut movement = MovementInput::default();
        for action in Action::MOVEMENT {
            let held = self.is_held(config, snapshot, action);
            let flag = match action {
                Action::SlowMove => &mut movement.slow,
                Action::FastMove => &mut movement.fast,
                Action::Forward => &mut movement.forward,
                Action::Left => &mut movement.left,
                Action::Back => &mut movement.back,
                Action::Right => &mut movement.right,
                Action::Up => &mut movement.up,
                Action::Down => &mut movement.down,
                Action::ToggleMenu => continue,
            };
            *flag = held;
        }
        movement
    }
}
