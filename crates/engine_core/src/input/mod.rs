// crates/engine_core/src/input/mod.rs
pub mod registry;
pub mod map;
pub mod arbiter;
pub mod config;
pub mod poller;
pub mod winit_adapter;

// Re-export core types to maintain the API `crate::input::ActionRegistry`
pub use registry::ActionRegistry;
pub use map::InputMap;
pub use arbiter::{Arbiter, Transition, TransitionCause};
pub use config::InputDefaults;
pub use poller::InputPoller;
