//! Headless fixed-timestep driver.
//!
//! Moves a scripted viewpoint, lets the avatar jump on a schedule, and
//! hands both to the streamer each tick.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};
use verdant_common::{VerdantError, VerdantResult};
use verdant_world::{HeadlessScene, StreamingStats, WorldStreamer};

use crate::avatar::Avatar;
use crate::config::EngineConfig;

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Ticks simulated
    pub ticks: u64,
    /// Final viewpoint centre
    pub center_x: f32,
    /// Jumps broadcast
    pub jumps: u64,
    /// Total vegetation reactions
    pub reactions: u64,
    /// Streamer totals at the end
    pub stats: StreamingStats,
}

/// Owns the streamer, its scene and the scripted actors.
#[derive(Debug)]
pub struct Simulation {
    /// Host configuration
    config: EngineConfig,
    /// The world
    streamer: WorldStreamer,
    /// Bookkeeping scene
    scene: HeadlessScene,
    /// Jump source
    avatar: Avatar,
    /// Viewpoint centre in pixels
    center_x: f32,
    /// Current direction (+1 or -1)
    direction: f32,
    /// Ticks simulated
    tick: u64,
    /// Total vegetation reactions
    reactions: u64,
}

impl Simulation {
    /// Validates the configuration and builds the world.
    pub fn new(mut config: EngineConfig) -> VerdantResult<Self> {
        config.validate()?;
        let mut scene = HeadlessScene::new();
        let streamer = WorldStreamer::new(config.world.clone(), &mut scene)
            .map_err(|e| VerdantError::InvalidConfig(e.to_string()))?;
        let center_x = config.world.window_width as f32 / 2.0;
        Ok(Self {
            config,
            streamer,
            scene,
            avatar: Avatar::new(),
            center_x,
            direction: 1.0,
            tick: 0,
            reactions: 0,
        })
    }

    /// Advances one tick.
    pub fn step(&mut self) {
        self.tick += 1;

        let reverse = self.config.reverse_every;
        if reverse > 0 && self.tick % reverse == 0 {
            self.direction = -self.direction;
            debug!(tick = self.tick, "Viewpoint reversed");
        }
        self.center_x += self.direction * self.config.viewpoint_speed;
        self.streamer.tick(self.center_x, &mut self.scene);

        let interval = self.config.jump_interval;
        if interval > 0 && self.tick % interval == 0 && self.avatar.jump() {
            let reacted = self.streamer.on_avatar_jump(&mut self.scene);
            self.reactions += reacted as u64;
            debug!(tick = self.tick, reacted, energy = self.avatar.energy(), "Avatar jumped");
        } else {
            self.avatar.idle();
        }

        let every = self.config.stats_interval;
        if every > 0 && self.tick % every == 0 {
            self.log_stats();
        }
    }

    /// Runs the configured number of ticks.
    pub fn run(&mut self) -> RunSummary {
        let tick_duration = Duration::from_secs_f64(self.config.tick_duration());
        for _ in 0..self.config.ticks {
            let started = Instant::now();
            self.step();
            if self.config.realtime {
                if let Some(rest) = tick_duration.checked_sub(started.elapsed()) {
                    thread::sleep(rest);
                }
            }
        }
        self.log_stats();
        self.summary()
    }

    fn log_stats(&self) {
        let stats = self.streamer.stats();
        info!(
            tick = self.tick,
            center_x = self.center_x,
            chunks = stats.resident_chunks,
            entities = stats.resident_entities,
            subscribers = stats.subscribers,
            generated = stats.generated_total,
            evicted = stats.evicted_total,
            energy = self.avatar.energy(),
            "World stats"
        );
    }

    /// Returns the run so far.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.tick,
            center_x: self.center_x,
            jumps: self.avatar.jumps(),
            reactions: self.reactions,
            stats: self.streamer.stats(),
        }
    }

    /// Returns the streamer.
    #[must_use]
    pub const fn streamer(&self) -> &WorldStreamer {
        &self.streamer
    }

    /// Returns the scene.
    #[must_use]
    pub const fn scene(&self) -> &HeadlessScene {
        &self.scene
    }

    /// Returns the avatar.
    #[must_use]
    pub const fn avatar(&self) -> &Avatar {
        &self.avatar
    }
}
