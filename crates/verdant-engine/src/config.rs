//! Host configuration.
//!
//! Simulation pacing, the scripted viewpoint and avatar, and an embedded
//! `[world]` table for the streamer. Loaded from and saved to TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, warn};
use verdant_common::{VerdantError, VerdantResult};
use verdant_world::WorldConfig;

/// Configuration file name.
pub const CONFIG_FILE: &str = "verdant.toml";

/// Host configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Pacing ===
    /// Fixed ticks per second
    pub tick_rate: u32,
    /// Ticks to simulate before exiting
    pub ticks: u64,
    /// Sleep between ticks to run at `tick_rate` in wall-clock time
    pub realtime: bool,
    /// Log statistics every this many ticks (0 = only at the end)
    pub stats_interval: u64,

    // === Scripted viewpoint ===
    /// Viewpoint movement in pixels per tick
    pub viewpoint_speed: f32,
    /// Reverse direction every this many ticks (0 = never)
    pub reverse_every: u64,

    // === Scripted avatar ===
    /// Attempt a jump every this many ticks (0 = never)
    pub jump_interval: u64,

    // === World ===
    /// Streamer configuration
    pub world: WorldConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            ticks: 1200,
            realtime: false,
            stats_interval: 120,

            viewpoint_speed: 6.0,
            reverse_every: 480,

            jump_interval: 45,

            world: WorldConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses configuration from TOML text.
    pub fn parse(contents: &str) -> VerdantResult<Self> {
        toml::from_str(contents).map_err(|e| VerdantError::ConfigParse(e.to_string()))
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("{e}, using defaults");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamps pacing values to sensible ranges and checks the world table.
    pub fn validate(&mut self) -> VerdantResult<()> {
        self.tick_rate = self.tick_rate.clamp(1, 1000);
        if !self.viewpoint_speed.is_finite() {
            self.viewpoint_speed = 0.0;
        }
        self.world
            .validate()
            .map_err(|e| VerdantError::InvalidConfig(e.to_string()))
    }

    /// Seconds per tick.
    #[must_use]
    pub fn tick_duration(&self) -> f64 {
        1.0 / f64::from(self.tick_rate.max(1))
    }
}
