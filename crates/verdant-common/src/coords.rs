//! Coordinate types for world positions and chunk keys.

use serde::{Deserialize, Serialize};

/// World position in pixels (top-left corner of an entity).
///
/// The y axis grows downward, so larger `y` means deeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WorldPos {
    /// X coordinate in world space
    pub x: i32,
    /// Y coordinate in world space
    pub y: i32,
}

impl WorldPos {
    /// Creates a new world position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the chunk key of the slice containing this position.
    #[must_use]
    pub const fn chunk_key(self, block_size: u32) -> ChunkKey {
        ChunkKey::from_x(self.x, block_size)
    }

    /// Returns this position shifted by the given offsets.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Entity dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Creates a square size.
    #[must_use]
    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

/// Index of one block-wide vertical slice of the world.
///
/// Equal to `floor(x / block_size)` for any x inside the slice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ChunkKey(pub i32);

impl ChunkKey {
    /// Creates a chunk key from a raw index.
    #[must_use]
    pub const fn new(index: i32) -> Self {
        Self(index)
    }

    /// Returns the key of the slice containing world x.
    #[must_use]
    pub const fn from_x(x: i32, block_size: u32) -> Self {
        Self(x.div_euclid(block_size as i32))
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns the world x of the slice's left edge.
    #[must_use]
    pub const fn left_x(self, block_size: u32) -> i32 {
        self.0 * block_size as i32
    }

    /// Returns the world x one past the slice's right edge.
    #[must_use]
    pub const fn right_x(self, block_size: u32) -> i32 {
        (self.0 + 1) * block_size as i32
    }
}

impl std::fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "chunk#{}", self.0)
    }
}

/// Aligns a world coordinate down to the nearest multiple of `block_size`.
///
/// Results saturate at the largest aligned values an `i32` can hold; NaN
/// aligns to 0.
#[must_use]
pub fn align_down(value: f32, block_size: u32) -> i32 {
    let size = f64::from(block_size.max(1));
    let limit = (f64::from(i32::MAX) / size).floor() * size;
    ((f64::from(value) / size).floor() * size).clamp(-limit, limit) as i32
}
