//! Terrain columns.

use verdant_common::{align_down, Color, WorldPos};

use crate::config::WorldConfig;
use crate::height::HeightField;
use crate::rng::{approximate_color, position_rng, salt};

/// Base ground colour.
pub const GROUND_COLOR: Color = Color::rgb(212, 123, 74);

/// Per-channel ground colour jitter.
pub const GROUND_COLOR_DELTA: i16 = 10;

/// One solid, immovable ground block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerrainBlock {
    /// Top-left corner, block-aligned
    pub pos: WorldPos,
    /// Tint
    pub color: Color,
}

/// Builds vertical stacks of ground blocks under the height field.
///
/// Generation has no side effects; registering the blocks anywhere is the
/// caller's job.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    /// Ground height source
    field: HeightField,
    /// Block edge length
    block_size: u32,
    /// Blocks per column
    depth: u32,
    /// World seed, for tints
    seed: u64,
}

impl TerrainGenerator {
    /// Creates a terrain generator for `config`.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            field: HeightField::new(config),
            block_size: config.block_size,
            depth: config.terrain_depth,
            seed: config.seed,
        }
    }

    /// Returns the ground height at world x.
    #[must_use]
    pub fn ground_height_at(&self, x: f32) -> f32 {
        self.field.height(x)
    }

    /// Returns the y of the topmost block in the column at x.
    #[must_use]
    pub fn surface_top(&self, x: i32) -> i32 {
        align_down(self.field.height(x as f32), self.block_size)
    }

    /// Generates every block of the columns in `[min_x, max_x)`.
    ///
    /// Columns start at `min_x` aligned down to the block grid. Within a
    /// column, blocks run from the surface downward.
    #[must_use]
    pub fn create_in_range(&self, min_x: i32, max_x: i32) -> Vec<TerrainBlock> {
        let step = self.block_size as i32;
        let first = min_x.div_euclid(step) * step;
        let columns = ((max_x - first).max(0) + step - 1) / step;
        let mut blocks = Vec::with_capacity((columns as usize) * self.depth as usize);

        let mut x = first;
        while x < max_x {
            let top = self.surface_top(x);
            for row in 0..self.depth as i32 {
                let pos = WorldPos::new(x, top + row * step);
                let mut rng = position_rng(self.seed, pos, salt::GROUND_TINT);
                blocks.push(TerrainBlock {
                    pos,
                    color: approximate_color(GROUND_COLOR, GROUND_COLOR_DELTA, &mut rng),
                });
            }
            x += step;
        }
        blocks
    }
}
