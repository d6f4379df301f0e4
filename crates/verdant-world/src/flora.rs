//! Tree placement and layout.
//!
//! A column roots a tree when a draw from its own stream falls under the
//! tree probability. Each tree then draws its trunk height and every
//! crown slot from a second stream seeded by its root column, so a tree is
//! rebuilt identically whenever its column is regenerated.

use fastrand::Rng;
use verdant_common::{Color, Size, WorldPos};

use crate::config::{SlotDraw, WorldConfig};
use crate::rng::{approximate_color, column_chance, column_hash, column_rng, position_rng, salt};
use crate::vegetation::{LEAF_COLOR, LEAF_COLOR_DELTA};

/// What a crown slot resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Holds a leaf
    Leaf,
    /// Holds a fruit
    Fruit,
    /// Left empty
    Empty,
}

/// A leaf placed in a crown slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeafSpec {
    /// Top-left corner
    pub pos: WorldPos,
    /// Tint
    pub color: Color,
}

/// A fully laid-out tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    /// Left edge of the trunk and the ground surface it stands on
    pub root: WorldPos,
    /// Trunk height in pixels
    pub trunk_height: u32,
    /// Seed for the trunk's colours
    pub trunk_tint_seed: u64,
    /// Every crown slot in visiting order (column-major)
    pub slots: Vec<Slot>,
    /// Leaves, in slot order
    pub leaves: Vec<LeafSpec>,
    /// Fruit positions, in slot order
    pub fruits: Vec<WorldPos>,
}

impl Tree {
    /// Returns the trunk's top-left corner.
    #[must_use]
    pub const fn trunk_pos(&self) -> WorldPos {
        WorldPos::new(self.root.x, self.root.y - self.trunk_height as i32)
    }

    /// Returns the trunk's dimensions.
    #[must_use]
    pub const fn trunk_size(&self, block_size: u32) -> Size {
        Size::new(block_size, self.trunk_height)
    }
}

/// Decides where trees grow and lays them out.
#[derive(Debug, Clone)]
pub struct FloraGenerator {
    seed: u64,
    block_size: u32,
    tree_probability: f32,
    leaf_probability: f32,
    fruit_probability: f32,
    slot_draw: SlotDraw,
    min_trunk_height: u32,
    max_trunk_height: u32,
    grid_cols: u32,
    grid_rows: u32,
    crown_offset: i32,
}

impl FloraGenerator {
    /// Creates a flora generator for `config`.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            seed: config.seed,
            block_size: config.block_size,
            tree_probability: config.tree_probability,
            leaf_probability: config.leaf_probability,
            fruit_probability: config.fruit_probability,
            slot_draw: config.slot_draw,
            min_trunk_height: config.min_trunk_height,
            max_trunk_height: config.max_trunk_height,
            grid_cols: config.leaf_grid_cols,
            grid_rows: config.leaf_grid_rows,
            crown_offset: config.crown_offset(),
        }
    }

    /// Whether the column at x roots a tree.
    #[must_use]
    pub fn roots_tree(&self, x: i32) -> bool {
        column_chance(self.seed, x, salt::TREE_CHANCE, self.tree_probability)
    }

    /// Generates the trees of every column in `[min_x, max_x)`.
    ///
    /// `surface_top` maps a column's x to the y of its top ground block.
    pub fn create_in_range<F>(&self, min_x: i32, max_x: i32, surface_top: F) -> Vec<Tree>
    where
        F: Fn(i32) -> i32,
    {
        let step = self.block_size as i32;
        let mut trees = Vec::new();
        let mut x = min_x.div_euclid(step) * step;
        while x < max_x {
            if self.roots_tree(x) {
                trees.push(self.create_tree(WorldPos::new(x, surface_top(x))));
            }
            x += step;
        }
        trees
    }

    /// Lays out the tree rooted at `root`.
    ///
    /// Only `root.x` seeds the layout; `root.y` positions it.
    #[must_use]
    pub fn create_tree(&self, root: WorldPos) -> Tree {
        let mut rng = column_rng(self.seed, root.x, salt::TREE_LAYOUT);
        let trunk_height = rng.u32(self.min_trunk_height..=self.max_trunk_height);

        let crown = WorldPos::new(root.x, root.y - trunk_height as i32);
        let anchor = crown.offset(-self.crown_offset, -self.crown_offset);
        let step = self.block_size as i32;

        let capacity = (self.grid_cols * self.grid_rows) as usize;
        let mut slots = Vec::with_capacity(capacity);
        let mut leaves = Vec::new();
        let mut fruits = Vec::new();

        for col in 0..self.grid_cols as i32 {
            for row in 0..self.grid_rows as i32 {
                let pos = anchor.offset(col * step, row * step);
                let slot = self.draw_slot(&mut rng);
                match slot {
                    Slot::Leaf => {
                        let mut tint = position_rng(self.seed, pos, salt::LEAF_TINT);
                        leaves.push(LeafSpec {
                            pos,
                            color: approximate_color(LEAF_COLOR, LEAF_COLOR_DELTA, &mut tint),
                        });
                    },
                    Slot::Fruit => fruits.push(pos),
                    Slot::Empty => {},
                }
                slots.push(slot);
            }
        }

        Tree {
            root,
            trunk_height,
            trunk_tint_seed: column_hash(self.seed, root.x, salt::TRUNK_TINT),
            slots,
            leaves,
            fruits,
        }
    }

    fn draw_slot(&self, rng: &mut Rng) -> Slot {
        match self.slot_draw {
            SlotDraw::Categorical => {
                let u = rng.f32();
                if u < self.leaf_probability {
                    Slot::Leaf
                } else if u < self.leaf_probability + self.fruit_probability {
                    Slot::Fruit
                } else {
                    Slot::Empty
                }
            },
            SlotDraw::Sequential => {
                if rng.f32() < self.leaf_probability {
                    Slot::Leaf
                } else if rng.f32() < self.fruit_probability {
                    Slot::Fruit
                } else {
                    Slot::Empty
                }
            },
        }
    }
}
