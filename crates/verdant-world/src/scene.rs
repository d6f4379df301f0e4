//! Host scene seam.
//!
//! The streamer never renders or simulates physics; it only tells the
//! host which entities exist. Hosts implement [`Scene`]. [`HeadlessScene`]
//! is a bookkeeping implementation used by the headless driver and tests.

use ahash::AHashMap;
use tracing::warn;
use verdant_common::{Color, EntityId, Size, WorldPos};

use crate::entity::{Entity, Layer, Role};

/// A live scene that generated entities are added to and removed from.
pub trait Scene {
    /// Adds an entity to the scene on `entity.role().layer()`.
    fn add(&mut self, entity: &Entity);

    /// Removes an entity from the scene.
    fn remove(&mut self, entity: &Entity);

    /// Called after an entity's state changed in place (e.g. after a jump
    /// reaction) so the host can update its visuals.
    fn refresh(&mut self, _entity: &Entity) {}
}

/// What a [`HeadlessScene`] remembers about a resident entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneEntry {
    /// Role tag
    pub role: Role,
    /// Layer
    pub layer: Layer,
    /// Top-left corner
    pub pos: WorldPos,
    /// Dimensions
    pub size: Size,
    /// Colour at the last add/refresh
    pub color: Color,
}

impl SceneEntry {
    fn of(entity: &Entity) -> Self {
        let role = entity.role();
        Self {
            role,
            layer: role.layer(),
            pos: entity.pos(),
            size: entity.size(),
            color: entity.color(),
        }
    }
}

/// In-memory scene with no rendering.
///
/// Counts adds of already-present entities and removes of absent ones so
/// lifecycle bugs are visible.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    entries: AHashMap<EntityId, SceneEntry>,
    duplicate_adds: u64,
    missing_removes: u64,
    refreshes: u64,
}

impl HeadlessScene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of resident entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks whether an entity is resident.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Returns a resident entity's entry.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&SceneEntry> {
        self.entries.get(&id)
    }

    /// Iterates over resident entities.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &SceneEntry)> {
        self.entries.iter()
    }

    /// Counts resident entities with the given role.
    #[must_use]
    pub fn count_role(&self, role: Role) -> usize {
        self.entries.values().filter(|e| e.role == role).count()
    }

    /// Adds that found the entity already resident.
    #[must_use]
    pub const fn duplicate_adds(&self) -> u64 {
        self.duplicate_adds
    }

    /// Removes that found the entity absent.
    #[must_use]
    pub const fn missing_removes(&self) -> u64 {
        self.missing_removes
    }

    /// Refresh calls received.
    #[must_use]
    pub const fn refreshes(&self) -> u64 {
        self.refreshes
    }
}

impl Scene for HeadlessScene {
    fn add(&mut self, entity: &Entity) {
        if self.entries.insert(entity.id(), SceneEntry::of(entity)).is_some() {
            warn!("Entity {} added twice", entity.id());
            self.duplicate_adds += 1;
        }
    }

    fn remove(&mut self, entity: &Entity) {
        if self.entries.remove(&entity.id()).is_none() {
            warn!("Entity {} removed but not resident", entity.id());
            self.missing_removes += 1;
        }
    }

    fn refresh(&mut self, entity: &Entity) {
        self.refreshes += 1;
        if let Some(entry) = self.entries.get_mut(&entity.id()) {
            entry.color = entity.color();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;

    fn block(id: u64) -> Entity {
        Entity::new(
            EntityId::from_raw(id),
            WorldPos::new(0, 600),
            Size::square(30),
            EntityKind::Ground(Color::rgb(1, 2, 3)),
        )
    }

    #[test]
    fn test_add_remove() {
        let mut scene = HeadlessScene::new();
        scene.add(&block(1));
        scene.add(&block(2));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.count_role(Role::Ground), 2);
        assert_eq!(
            scene.get(EntityId::from_raw(1)).map(|e| e.layer),
            Some(Layer::Static)
        );
        scene.remove(&block(1));
        assert!(!scene.contains(EntityId::from_raw(1)));
        assert_eq!(scene.missing_removes(), 0);
    }

    #[test]
    fn test_lifecycle_violations_counted() {
        let mut scene = HeadlessScene::new();
        scene.add(&block(1));
        scene.add(&block(1));
        scene.remove(&block(5));
        assert_eq!(scene.duplicate_adds(), 1);
        assert_eq!(scene.missing_removes(), 1);
    }
}
