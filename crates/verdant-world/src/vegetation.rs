//! Reactive vegetation: trunks, leaves and fruit that respond to the
//! avatar's jump.

use fastrand::Rng;
use verdant_common::Color;

use crate::rng::approximate_color;

/// Base trunk colour.
pub const TRUNK_COLOR: Color = Color::rgb(100, 50, 20);

/// Per-channel trunk colour jitter.
pub const TRUNK_COLOR_DELTA: i16 = 20;

/// Base leaf colour.
pub const LEAF_COLOR: Color = Color::rgb(50, 200, 30);

/// Per-channel leaf colour jitter.
pub const LEAF_COLOR_DELTA: i16 = 25;

/// Colours a fruit cycles through, one step per jump.
pub const FRUIT_PALETTE: [Color; 3] = [Color::RED, Color::YELLOW, Color::BLUE];

/// Angle a leaf turns through on each jump, in degrees.
pub const LEAF_SPIN_DEGREES: f32 = 90.0;

/// A piece of vegetation that reacts to jumps.
#[derive(Debug, Clone, PartialEq)]
pub enum Vegetation {
    /// Tree trunk; recolours on each jump.
    Trunk(Trunk),
    /// Leaf; spins a quarter turn on each jump.
    Leaf(Leaf),
    /// Fruit; steps through [`FRUIT_PALETTE`] on each jump.
    Fruit(Fruit),
}

impl Vegetation {
    /// Reacts to one jump. Touches only this object's own state.
    pub fn react(&mut self) {
        match self {
            Self::Trunk(trunk) => trunk.recolor(),
            Self::Leaf(leaf) => leaf.spin(),
            Self::Fruit(fruit) => fruit.advance_color(),
        }
    }

    /// Returns the current colour.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::Trunk(trunk) => trunk.color,
            Self::Leaf(leaf) => leaf.color,
            Self::Fruit(fruit) => fruit.color(),
        }
    }

    /// Returns how many jumps this object has reacted to.
    #[must_use]
    pub fn reactions(&self) -> u32 {
        match self {
            Self::Trunk(trunk) => trunk.reactions,
            Self::Leaf(leaf) => leaf.rotations,
            Self::Fruit(fruit) => fruit.reactions,
        }
    }
}

/// Trunk state.
#[derive(Debug, Clone, PartialEq)]
pub struct Trunk {
    /// Stream seed derived from the trunk's position
    tint_seed: u64,
    /// Current colour
    color: Color,
    /// Jumps reacted to
    reactions: u32,
}

impl Trunk {
    /// Creates a trunk whose colours derive from `tint_seed`.
    #[must_use]
    pub fn new(tint_seed: u64) -> Self {
        let mut trunk = Self {
            tint_seed,
            color: TRUNK_COLOR,
            reactions: 0,
        };
        trunk.color = trunk.tint();
        trunk
    }

    fn tint(&self) -> Color {
        let mut rng = Rng::with_seed(self.tint_seed.wrapping_add(u64::from(self.reactions)));
        approximate_color(TRUNK_COLOR, TRUNK_COLOR_DELTA, &mut rng)
    }

    fn recolor(&mut self) {
        self.reactions += 1;
        self.color = self.tint();
    }
}

/// Leaf state.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Fixed colour
    color: Color,
    /// Quarter turns requested so far
    rotations: u32,
}

impl Leaf {
    /// Creates a leaf of the given colour.
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            rotations: 0,
        }
    }

    /// Angle the current spin ends at; 0 until the first jump.
    #[must_use]
    pub fn spin_target(&self) -> f32 {
        if self.rotations == 0 {
            0.0
        } else {
            LEAF_SPIN_DEGREES
        }
    }

    fn spin(&mut self) {
        self.rotations += 1;
    }
}

/// Fruit state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fruit {
    /// Index into [`FRUIT_PALETTE`]
    palette_index: usize,
    /// Jumps reacted to
    reactions: u32,
}

impl Fruit {
    /// Creates a fruit showing the first palette colour.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            palette_index: 0,
            reactions: 0,
        }
    }

    /// Returns the current colour.
    #[must_use]
    pub const fn color(&self) -> Color {
        FRUIT_PALETTE[self.palette_index]
    }

    fn advance_color(&mut self) {
        self.palette_index = (self.palette_index + 1) % FRUIT_PALETTE.len();
        self.reactions += 1;
    }
}
