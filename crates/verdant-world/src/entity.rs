//! Generated entities handed to the host scene.

use serde::{Deserialize, Serialize};
use verdant_common::{Color, EntityId, Size, WorldPos};

use crate::vegetation::Vegetation;

/// Role tag of a generated entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Terrain block
    Ground,
    /// Tree trunk
    Trunk,
    /// Leaf
    Leaf,
    /// Fruit
    Fruit,
}

impl Role {
    /// Returns the tag string the host registers the entity under.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Ground => "ground",
            Self::Trunk => "trunk",
            Self::Leaf => "leaf",
            Self::Fruit => "fruit",
        }
    }

    /// Returns the scene layer for this role.
    #[must_use]
    pub const fn layer(self) -> Layer {
        match self {
            Self::Ground | Self::Trunk => Layer::Static,
            Self::Leaf | Self::Fruit => Layer::Foliage,
        }
    }

    /// Whether entities of this role subscribe to jump notifications.
    #[must_use]
    pub const fn is_reactive(self) -> bool {
        !matches!(self, Self::Ground)
    }

    /// Whether entities of this role block movement and never move.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Ground | Self::Trunk)
    }
}

/// Scene layer a generated entity lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Collidable, immovable objects
    Static,
    /// Non-colliding tree crowns
    Foliage,
}

/// What a generated entity is.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// Terrain block with a fixed colour
    Ground(Color),
    /// Reactive vegetation
    Vegetation(Vegetation),
}

/// A generated entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Identifier issued when the entity was generated
    id: EntityId,
    /// Top-left corner
    pos: WorldPos,
    /// Dimensions
    size: Size,
    /// Variant data
    kind: EntityKind,
}

impl Entity {
    /// Creates a new entity.
    #[must_use]
    pub const fn new(id: EntityId, pos: WorldPos, size: Size, kind: EntityKind) -> Self {
        Self {
            id,
            pos,
            size,
            kind,
        }
    }

    /// Returns the entity ID.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the top-left corner.
    #[must_use]
    pub const fn pos(&self) -> WorldPos {
        self.pos
    }

    /// Returns the dimensions.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Returns the role tag.
    #[must_use]
    pub const fn role(&self) -> Role {
        match &self.kind {
            EntityKind::Ground(_) => Role::Ground,
            EntityKind::Vegetation(Vegetation::Trunk(_)) => Role::Trunk,
            EntityKind::Vegetation(Vegetation::Leaf(_)) => Role::Leaf,
            EntityKind::Vegetation(Vegetation::Fruit(_)) => Role::Fruit,
        }
    }

    /// Returns the current colour.
    #[must_use]
    pub fn color(&self) -> Color {
        match &self.kind {
            EntityKind::Ground(color) => *color,
            EntityKind::Vegetation(veg) => veg.color(),
        }
    }

    /// Returns the vegetation state, if this entity is reactive.
    #[must_use]
    pub const fn vegetation(&self) -> Option<&Vegetation> {
        match &self.kind {
            EntityKind::Vegetation(veg) => Some(veg),
            EntityKind::Ground(_) => None,
        }
    }

    /// Returns the mutable vegetation state, if this entity is reactive.
    pub fn vegetation_mut(&mut self) -> Option<&mut Vegetation> {
        match &mut self.kind {
            EntityKind::Vegetation(veg) => Some(veg),
            EntityKind::Ground(_) => None,
        }
    }
}
