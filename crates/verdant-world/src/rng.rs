//! Position-keyed random streams.
//!
//! Every random decision in generation is drawn from a stream whose seed
//! is a hash of (world seed, position, purpose). Nothing depends on call
//! order, so any region can be regenerated in isolation.

use fastrand::Rng;
use verdant_common::{Color, WorldPos};

/// Purpose tags that separate otherwise identical streams.
pub mod salt {
    /// Does this column root a tree?
    pub const TREE_CHANCE: u64 = 0x7472_6565_0001;
    /// Per-tree stream: trunk height, then every grid slot.
    pub const TREE_LAYOUT: u64 = 0x7472_6565_0002;
    /// Ground block tint.
    pub const GROUND_TINT: u64 = 0x6772_6e64_0001;
    /// Trunk tint.
    pub const TRUNK_TINT: u64 = 0x7472_6e6b_0001;
    /// Leaf tint.
    pub const LEAF_TINT: u64 = 0x6c65_6166_0001;
}

/// splitmix64 finalizer.
const fn finalize(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Hashes a world seed, a position and a purpose into a stream seed.
#[must_use]
pub const fn position_hash(seed: u64, x: i32, y: i32, salt: u64) -> u64 {
    let mut state = finalize(seed ^ salt);
    state = finalize(state.wrapping_add(x as i64 as u64));
    finalize(state.wrapping_add(y as i64 as u64).wrapping_add(0x9E37_79B9_7F4A_7C15))
}

/// Hashes a world seed and a column into a stream seed.
#[must_use]
pub const fn column_hash(seed: u64, x: i32, salt: u64) -> u64 {
    position_hash(seed, x, 0, salt)
}

/// Returns the random stream for a column.
#[must_use]
pub fn column_rng(seed: u64, x: i32, salt: u64) -> Rng {
    Rng::with_seed(column_hash(seed, x, salt))
}

/// Returns the random stream for a position.
#[must_use]
pub fn position_rng(seed: u64, pos: WorldPos, salt: u64) -> Rng {
    Rng::with_seed(position_hash(seed, pos.x, pos.y, salt))
}

/// Draws once from a column's stream against `probability`.
#[must_use]
pub fn column_chance(seed: u64, x: i32, salt: u64, probability: f32) -> bool {
    column_rng(seed, x, salt).f32() < probability
}

/// Returns `base` with each channel independently jittered by up to
/// `delta`.
#[must_use]
pub fn approximate_color(base: Color, delta: i16, rng: &mut Rng) -> Color {
    let delta = delta.abs();
    base.shifted(
        rng.i16(-delta..=delta),
        rng.i16(-delta..=delta),
        rng.i16(-delta..=delta),
    )
}
