use std::env;

use anyhow::{anyhow, Context, Result};
use engine_core::{logging, Configuration, PlatformRunner};
use tracing::info;

/// Splits a `section.key=value` argument.
fn parse_override(arg: &str) -> Result<(&str, &str, &str)> {
    let (path, value) = arg
        .split_once('=')
        .with_context(|| format!("expected section.key=value, got {arg:?}"))?;
    let (section, key) = path
        .split_once('.')
        .with_context(|| format!("expected section.key before '=', got {path:?}"))?;
    Ok((section.trim(), key.trim(), value))
}

fn main() -> Result<()> {
    logging::init();

    // e.g. `editor graphics.max_fps=inf input.forward=up`
    let mut config = Configuration::new();
    for arg in env::args().skip(1) {
        let (section, key, value) = parse_override(&arg)?;
        info!(section, key, value, "config override");
        config.set(section, key, value);
    }

    // Platform errors are not guaranteed Send + Sync, so keep only the message.
    PlatformRunner::new(config, "Rust Engine")
        .start()
        .map_err(|err| anyhow!("{err}"))?;
    Ok(())
}
