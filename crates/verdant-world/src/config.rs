//! World generation and streaming configuration.
//!
//! Every value here is fixed once a [`crate::WorldStreamer`] has been built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default block size in pixels.
pub const DEFAULT_BLOCK_SIZE: u32 = 30;

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Block size must be positive
    #[error("Block size must be positive")]
    ZeroBlockSize,
    /// Window dimensions must be positive
    #[error("Window dimensions must be positive, got {width}x{height}")]
    EmptyWindow {
        /// Configured width
        width: u32,
        /// Configured height
        height: u32,
    },
    /// Padding must be a whole number of blocks
    #[error("{side} padding {value} is not a multiple of block size {block_size}")]
    UnalignedPadding {
        /// Which side
        side: &'static str,
        /// Configured padding
        value: i32,
        /// Configured block size
        block_size: u32,
    },
    /// A probability is outside [0, 1]
    #[error("{name} probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange {
        /// Which probability
        name: &'static str,
        /// Configured value
        value: f32,
    },
    /// Categorical leaf + fruit probability exceeds 1
    #[error("Leaf and fruit probabilities sum to {0}, which exceeds 1")]
    SlotProbabilitiesExceedOne(f32),
    /// Trunk height range is inverted
    #[error("Trunk height range [{min}, {max}] is inverted")]
    InvertedTrunkRange {
        /// Minimum trunk height
        min: u32,
        /// Maximum trunk height
        max: u32,
    },
    /// Leaf grid has no cells
    #[error("Leaf grid {cols}x{rows} has no cells")]
    EmptyLeafGrid {
        /// Grid columns
        cols: u32,
        /// Grid rows
        rows: u32,
    },
    /// Terrain depth must be positive
    #[error("Terrain depth must be at least one block")]
    ZeroTerrainDepth,
    /// Noise wavelength must be positive and finite
    #[error("Noise wavelength factor must be positive, got {0}")]
    InvalidWavelength(f32),
    /// Noise amplitude must be non-negative and finite
    #[error("Noise amplitude must be non-negative, got {0}")]
    InvalidAmplitude(f32),
}

/// Result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// How each leaf-grid slot is resolved to leaf, fruit or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotDraw {
    /// One uniform draw split into leaf / fruit / empty bands.
    /// The fruit rate equals `fruit_probability`.
    #[default]
    Categorical,
    /// A leaf draw, then a fresh fruit draw when the leaf draw fails.
    /// The effective fruit rate is `(1 - leaf) * fruit`.
    Sequential,
}

/// World configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // === Layout ===
    /// Block edge length in pixels
    pub block_size: u32,
    /// Visible window width in pixels
    pub window_width: u32,
    /// Visible window height in pixels
    pub window_height: u32,
    /// Offset added to the left window edge (negative widens the window)
    pub padding_left: i32,
    /// Offset added to the right window edge (positive widens the window)
    pub padding_right: i32,

    // === Height field ===
    /// World seed
    pub seed: u64,
    /// Ground baseline as a fraction of window height
    pub ground_height_ratio: f32,
    /// Noise wavelength in blocks
    pub noise_wavelength_factor: f32,
    /// Maximum deviation from the baseline in pixels
    pub noise_amplitude: f32,
    /// Blocks per terrain column
    pub terrain_depth: u32,

    // === Flora ===
    /// Chance that a column roots a tree
    pub tree_probability: f32,
    /// Chance that a grid slot holds a leaf
    pub leaf_probability: f32,
    /// Chance that a grid slot holds a fruit
    pub fruit_probability: f32,
    /// How slots are drawn
    pub slot_draw: SlotDraw,
    /// Shortest trunk in pixels (inclusive)
    pub min_trunk_height: u32,
    /// Tallest trunk in pixels (inclusive)
    pub max_trunk_height: u32,
    /// Leaf grid columns
    pub leaf_grid_cols: u32,
    /// Leaf grid rows
    pub leaf_grid_rows: u32,
    /// Distance of the grid's top-left corner from the crown, in blocks
    pub crown_offset_blocks: f32,
    /// Leaf edge length in pixels
    pub leaf_size: u32,
    /// Fruit edge length in pixels
    pub fruit_size: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let block = DEFAULT_BLOCK_SIZE;
        Self {
            // Layout
            block_size: block,
            window_width: 1600,
            window_height: 900,
            padding_left: -3 * block as i32,
            padding_right: 3 * block as i32,

            // Height field
            seed: 0,
            ground_height_ratio: 2.0 / 3.0,
            noise_wavelength_factor: 7.0,
            noise_amplitude: 7.0 * block as f32,
            terrain_depth: 40,

            // Flora
            tree_probability: 0.1,
            leaf_probability: 0.5,
            fruit_probability: 0.2,
            slot_draw: SlotDraw::Categorical,
            min_trunk_height: 250,
            max_trunk_height: 350,
            leaf_grid_cols: 8,
            leaf_grid_rows: 8,
            crown_offset_blocks: 3.5,
            leaf_size: block,
            fruit_size: 26,
        }
    }
}

impl WorldConfig {
    /// Creates the default configuration with a different seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::EmptyWindow {
                width: self.window_width,
                height: self.window_height,
            });
        }
        let block = self.block_size as i32;
        for (side, value) in [("Left", self.padding_left), ("Right", self.padding_right)] {
            if value % block != 0 {
                return Err(ConfigError::UnalignedPadding {
                    side,
                    value,
                    block_size: self.block_size,
                });
            }
        }
        for (name, value) in [
            ("Tree", self.tree_probability),
            ("Leaf", self.leaf_probability),
            ("Fruit", self.fruit_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        let slot_total = self.leaf_probability + self.fruit_probability;
        if self.slot_draw == SlotDraw::Categorical && slot_total > 1.0 {
            return Err(ConfigError::SlotProbabilitiesExceedOne(slot_total));
        }
        if self.min_trunk_height > self.max_trunk_height {
            return Err(ConfigError::InvertedTrunkRange {
                min: self.min_trunk_height,
                max: self.max_trunk_height,
            });
        }
        if self.leaf_grid_cols == 0 || self.leaf_grid_rows == 0 {
            return Err(ConfigError::EmptyLeafGrid {
                cols: self.leaf_grid_cols,
                rows: self.leaf_grid_rows,
            });
        }
        if self.terrain_depth == 0 {
            return Err(ConfigError::ZeroTerrainDepth);
        }
        if !(self.noise_wavelength_factor.is_finite() && self.noise_wavelength_factor > 0.0) {
            return Err(ConfigError::InvalidWavelength(self.noise_wavelength_factor));
        }
        if !(self.noise_amplitude.is_finite() && self.noise_amplitude >= 0.0) {
            return Err(ConfigError::InvalidAmplitude(self.noise_amplitude));
        }
        Ok(())
    }

    /// Ground baseline in pixels.
    #[must_use]
    pub fn ground_baseline(&self) -> f32 {
        self.window_height as f32 * self.ground_height_ratio
    }

    /// Noise wavelength in pixels.
    #[must_use]
    pub fn noise_wavelength(&self) -> f32 {
        self.block_size as f32 * self.noise_wavelength_factor
    }

    /// Crown offset in pixels.
    #[must_use]
    pub fn crown_offset(&self) -> i32 {
        (self.block_size as f32 * self.crown_offset_blocks) as i32
    }
}
