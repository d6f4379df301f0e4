//! # Verdant World
//!
//! Infinite side-scrolling world streaming.
//!
//! This crate handles:
//! - Deterministic height field and terrain columns
//! - Tree placement with leaf and fruit crowns
//! - Chunk generation and eviction around a moving viewpoint
//! - Jump fan-out to resident vegetation
//!
//! Everything generated is a pure function of the seed and the world
//! position, so a chunk that is evicted and later revisited comes back
//! identical.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod broadcast;
pub mod chunk;
pub mod config;
pub mod entity;
pub mod flora;
pub mod height;
pub mod rng;
pub mod scene;
pub mod streaming;
pub mod terrain;
pub mod vegetation;
pub mod window;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::broadcast::*;
    pub use crate::chunk::*;
    pub use crate::config::*;
    pub use crate::entity::*;
    pub use crate::flora::*;
    pub use crate::height::*;
    pub use crate::scene::*;
    pub use crate::streaming::*;
    pub use crate::terrain::*;
    pub use crate::vegetation::*;
    pub use crate::window::*;
}

pub use prelude::*;
