//! Visible window and its per-tick difference.

use verdant_common::ChunkKey;

use crate::config::WorldConfig;

/// Furthest a window edge may lie from the origin, in pixels.
///
/// Viewpoints beyond it are clamped. The headroom up to `i32::MAX` covers
/// crowns and terrain that extend past their chunk.
pub const WORLD_EDGE_LIMIT: i32 = 1 << 30;

/// Horizontal span `[left, right)` that must be populated, in pixels.
///
/// Both edges are always multiples of the block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    /// Left edge (inclusive)
    pub left: i32,
    /// Right edge (exclusive)
    pub right: i32,
}

impl Window {
    /// Creates a window from block-aligned edges.
    #[must_use]
    pub const fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// Derives the padded window for a viewpoint centred at `center_x`.
    ///
    /// The centre is clamped to `±WORLD_EDGE_LIMIT` and both edges are
    /// clamped to the block-aligned range inside it.
    #[must_use]
    pub fn around(center_x: f32, config: &WorldConfig) -> Self {
        let block = i64::from(config.block_size.max(1));
        let limit = f64::from(WORLD_EDGE_LIMIT);
        let center = f64::from(center_x).clamp(-limit, limit);
        let half = f64::from(config.window_width) / 2.0;
        let left = ((center - half) / block as f64).floor() as i64 * block;
        let width = i64::from(config.window_width) / block * block;
        Self {
            left: clamp_edge(left + i64::from(config.padding_left), block),
            right: clamp_edge(left + width + i64::from(config.padding_right), block),
        }
    }

    /// The window before the viewpoint has moved: the screen starting at x = 0.
    #[must_use]
    pub fn initial(config: &WorldConfig) -> Self {
        Self::around(config.window_width as f32 / 2.0, config)
    }

    /// Returns the keys of the chunks inside the window.
    #[must_use]
    pub fn keys(&self, block_size: u32) -> KeySpan {
        KeySpan::new(
            ChunkKey::from_x(self.left, block_size).raw(),
            ChunkKey::from_x(self.right, block_size).raw(),
        )
    }

}

/// Clamps an aligned edge into `±WORLD_EDGE_LIMIT`, keeping it aligned.
fn clamp_edge(edge: i64, block: i64) -> i32 {
    let limit = i64::from(WORLD_EDGE_LIMIT) / block * block;
    edge.clamp(-limit, limit) as i32
}

/// Half-open run of chunk keys `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpan {
    /// First key
    pub start: i32,
    /// One past the last key
    pub end: i32,
}

impl KeySpan {
    /// Creates a key span.
    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Checks whether the span holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        (self.end - self.start).max(0) as usize
    }

    /// Checks whether a key lies in the span.
    #[must_use]
    pub const fn contains(&self, key: ChunkKey) -> bool {
        self.start <= key.0 && key.0 < self.end
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ChunkKey> {
        (self.start..self.end).map(ChunkKey)
    }

    /// Keys in `self` that are not in `other`: at most one run on each side.
    #[must_use]
    pub fn minus(&self, other: &Self) -> [Self; 2] {
        if other.is_empty() {
            return [*self, Self::new(self.end, self.end)];
        }
        [
            Self::new(self.start, self.end.min(other.start)),
            Self::new(self.start.max(other.end), self.end),
        ]
    }
}

/// Which keys entered and which left between two windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDiff {
    /// Keys now inside that were outside: left side, then right side
    pub entered: [KeySpan; 2],
    /// Keys now outside that were inside: left side, then right side
    pub exited: [KeySpan; 2],
}

impl WindowDiff {
    /// Compares two windows. Both sides are reconciled independently, so a
    /// tick that shrinks one side while growing the other is handled, as is
    /// a jump to a disjoint window.
    #[must_use]
    pub fn between(previous: &Window, current: &Window, block_size: u32) -> Self {
        let old = previous.keys(block_size);
        let new = current.keys(block_size);
        Self {
            entered: new.minus(&old),
            exited: old.minus(&new),
        }
    }

    /// Iterates over entering keys.
    pub fn entered_keys(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.entered.iter().flat_map(KeySpan::iter)
    }

    /// Iterates over exiting keys.
    pub fn exited_keys(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.exited.iter().flat_map(KeySpan::iter)
    }

    /// Checks whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entered.iter().chain(&self.exited).all(KeySpan::is_empty)
    }
}
