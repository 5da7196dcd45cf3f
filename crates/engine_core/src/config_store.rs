// crates/engine_core/src/config_store.rs
//! In-memory `(section, key) -> value` store with a typed handler table.
//!
//! Handlers are plain function pointers. The owner hands the subsystems they
//! may touch to `apply_pending`, so a handler never holds on to shared state.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;
use tracing::{debug, warn};

use crate::camera::CameraSettings;
use crate::engine_loop::RateControl;
use crate::settings::parse_on_off_to_bool;

/// Why a handler refused a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("expected a finite number")]
    NotAFloat,
    #[error("expected a positive integer or \"inf\"")]
    NotARate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{section}.{key} = {value:?} rejected: {reason}")]
    Rejected {
        section: String,
        key: String,
        value: String,
        #[source]
        reason: HandlerError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey {
    pub section: String,
    pub key: String,
}

impl ConfigKey {
    pub fn new(section: &str, key: &str) -> Self {
        Self {
            section: section.to_string(),
            key: key.to_string(),
        }
    }
}

/// Subsystems a handler is allowed to mutate.
pub struct HandlerTargets<'a> {
    pub camera: &'a mut dyn CameraSettings,
    pub rate: &'a mut dyn RateControl,
}

pub type ConfigHandler = fn(&str, &mut HandlerTargets<'_>) -> Result<(), HandlerError>;

pub struct Configuration {
    values: HashMap<ConfigKey, String>,
    handlers: BTreeMap<ConfigKey, ConfigHandler>,
    dirty: BTreeSet<ConfigKey>,
    diagnostics_tx: Option<Sender<ConfigError>>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            handlers: BTreeMap::new(),
            dirty: BTreeSet::new(),
            diagnostics_tx: None,
        }
    }

    /// Builds a store from `(section, key, value)` triples. Nothing is marked
    /// dirty; run `apply_all` once handlers are registered.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        let mut config = Self::new();
        for (section, key, value) in entries {
            config
                .values
                .insert(ConfigKey::new(section, key), value.to_string());
        }
        config
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.values
            .get(&ConfigKey::new(section, key))
            .map(String::as_str)
    }

    /// `"on"` is true; absent or any other value is false.
    pub fn is_on(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some_and(parse_on_off_to_bool)
    }

    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let config_key = ConfigKey::new(section, key);
        let value = value.into();
        if self.values.get(&config_key) == Some(&value) {
            return;
        }
        self.values.insert(config_key.clone(), value);
        self.dirty.insert(config_key);
    }

    pub fn remove(&mut self, section: &str, key: &str) -> Option<String> {
        let config_key = ConfigKey::new(section, key);
        let previous = self.values.remove(&config_key);
        if previous.is_some() {
            self.dirty.insert(config_key);
        }
        previous
    }

    /// Registers `handler` for `(section, key)`, replacing any earlier one.
    pub fn register_handler(&mut self, section: &str, key: &str, handler: ConfigHandler) {
        if self
            .handlers
            .insert(ConfigKey::new(section, key), handler)
            .is_some()
        {
            debug!(section, key, "replaced config handler");
        }
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Subscribes to rejected values. Each one is sent here as well as
    /// returned from the apply call. A new subscription replaces the old one.
    pub fn diagnostics(&mut self) -> Receiver<ConfigError> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.diagnostics_tx = Some(tx);
        rx
    }

    /// Config-apply point: runs the handler of every pair changed since the
    /// last call. Removed values have nothing to apply and keep the previous
    /// in-memory setting.
    pub fn apply_pending(&mut self, targets: &mut HandlerTargets<'_>) -> Vec<ConfigError> {
        let dirty = std::mem::take(&mut self.dirty);
        dirty
            .iter()
            .filter_map(|config_key| self.run_handler(config_key, targets))
            .collect()
    }

    /// Runs every registered handler against its current value.
    pub fn apply_all(&mut self, targets: &mut HandlerTargets<'_>) -> Vec<ConfigError> {
        self.dirty.clear();
        let keys: Vec<ConfigKey> = self.handlers.keys().cloned().collect();
        keys.iter()
            .filter_map(|config_key| self.run_handler(config_key, targets))
            .collect()
    }

    fn run_handler(
        &self,
        config_key: &ConfigKey,
        targets: &mut HandlerTargets<'_>,
    ) -> Option<ConfigError> {
        let handler = self.handlers.get(config_key)?;
        let value = self.values.get(config_key)?;

        match handler(value.as_str(), targets) {
            Ok(()) => {
                debug!(section = %config_key.section, key = %config_key.key, value = %value, "applied config value");
                None
            }
            Err(reason) => {
                let err = ConfigError::Rejected {
                    section: config_key.section.clone(),
                    key: config_key.key.clone(),
                    value: value.clone(),
                    reason,
                };
                warn!("{err}");
                if let Some(tx) = &self.diagnostics_tx {
                    // A dropped receiver just means nobody is listening.
                    let _ = tx.send(err.clone());
                }
                Some(err)
            }
        }
    }
}
