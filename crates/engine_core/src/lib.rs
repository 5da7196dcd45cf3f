// crates/engine_core/src/lib.rs

// Logic Modules
pub mod app;
pub mod camera;
pub mod config_store;
pub mod engine_loop;
pub mod input;
pub mod menu;
pub mod settings;
pub mod stats;

// Platform Modules
pub mod logging;
pub mod platform_runner;
pub mod window;

// Re-export App so the Editor crate can find it easily
pub use app::{App, TickReport};
pub use config_store::{ConfigError, Configuration};
pub use platform_runner::PlatformRunner;
