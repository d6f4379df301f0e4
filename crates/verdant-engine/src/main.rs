//! # Verdant
//!
//! Headless host for the Verdant world streamer.
//!
//! Loads `verdant.toml` (or the path given as the first argument), walks a
//! scripted viewpoint across the world and lets a scripted avatar jump,
//! logging streaming statistics as it goes.
//!
//! `verdant --init [path]` writes the default configuration and exits.
//! Set `VERDANT_LOG_FORMAT=json` for JSON log lines.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod avatar;
mod config;
mod simulation;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{EngineConfig, CONFIG_FILE};
use crate::simulation::Simulation;

/// Environment variable selecting the log format.
const LOG_FORMAT_VAR: &str = "VERDANT_LOG_FORMAT";

/// Whether the log format variable asks for JSON lines.
fn wants_json(format: Option<&str>) -> bool {
    format.is_some_and(|f| f.trim().eq_ignore_ascii_case("json"))
}

/// Main entry point.
fn main() -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("verdant=info".parse()?);
    if wants_json(std::env::var(LOG_FORMAT_VAR).ok().as_deref()) {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    info!("Verdant starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let first = args.next();
    if first.as_deref() == Some("--init") {
        let path = args.next().unwrap_or_else(|| CONFIG_FILE.to_string());
        EngineConfig::default()
            .save_to(&path)
            .with_context(|| format!("writing default config to {path}"))?;
        return Ok(());
    }

    let path = first.unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = EngineConfig::load_from(&path);
    info!(
        seed = config.world.seed,
        ticks = config.ticks,
        tick_rate = config.tick_rate,
        "Configuration ready"
    );

    let mut sim = Simulation::new(config).context("building the world")?;
    let summary = sim.run();

    info!(
        ticks = summary.ticks,
        center_x = summary.center_x,
        jumps = summary.jumps,
        refused_jumps = sim.avatar().refused(),
        reactions = summary.reactions,
        generated = summary.stats.generated_total,
        evicted = summary.stats.evicted_total,
        resident_entities = sim.scene().len(),
        subscriptions_consistent = sim.streamer().subscriptions_consistent(),
        "Verdant shutdown complete"
    );
    Ok(())
}
