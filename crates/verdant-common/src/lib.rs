//! # Verdant Common
//!
//! Common types shared by the Verdant world streamer and its host.
//!
//! This crate provides:
//! - Coordinate types (world positions, chunk keys)
//! - Entity IDs and an instance-scoped ID allocator
//! - RGB colours
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod color;
pub mod coords;
pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::color::*;
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;
