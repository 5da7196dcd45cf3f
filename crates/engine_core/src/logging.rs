// crates/engine_core/src/logging.rs

use tracing_subscriber::EnvFilter;

/// Installs the console subscriber. `RUST_LOG` controls filtering, e.g.
/// `RUST_LOG=engine_core::input=debug` to watch mode transitions.
/// Calling it again is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
