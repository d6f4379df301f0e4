//! Chunk: the generated content of one block-wide slice.

use verdant_common::{ChunkKey, Color, EntityId, EntityIdAllocator, Size, WorldPos};

use crate::entity::{Entity, EntityKind, Role};
use crate::flora::Tree;
use crate::terrain::TerrainBlock;
use crate::vegetation::{Fruit, Leaf, Trunk, Vegetation};

/// Handle a subscriber is registered under.
///
/// Locates the entity inside the chunk cache without a search. The ID is
/// never reused, so a handle can only ever name one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VegetationHandle {
    /// Entity ID
    pub id: EntityId,
    /// Owning chunk
    pub key: ChunkKey,
    /// Index in the chunk's entity list
    pub slot: u32,
}

/// One entity's observable layout, independent of its ID.
pub type LayoutEntry = (Role, WorldPos, Size, Color);

/// Generated content for one block-wide slice.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Slice index
    key: ChunkKey,
    /// Terrain blocks, then each tree's trunk, leaves and fruit
    entities: Vec<Entity>,
}

impl Chunk {
    /// Assembles a chunk from generator output, issuing fresh IDs.
    #[must_use]
    pub fn assemble(
        key: ChunkKey,
        blocks: Vec<TerrainBlock>,
        trees: Vec<Tree>,
        block_size: u32,
        leaf_size: u32,
        fruit_size: u32,
        ids: &mut EntityIdAllocator,
    ) -> Self {
        let tree_entities: usize = trees
            .iter()
            .map(|t| 1 + t.leaves.len() + t.fruits.len())
            .sum();
        let mut entities = Vec::with_capacity(blocks.len() + tree_entities);

        for block in blocks {
            entities.push(Entity::new(
                ids.allocate(),
                block.pos,
                Size::square(block_size),
                EntityKind::Ground(block.color),
            ));
        }

        for tree in trees {
            entities.push(Entity::new(
                ids.allocate(),
                tree.trunk_pos(),
                tree.trunk_size(block_size),
                EntityKind::Vegetation(Vegetation::Trunk(Trunk::new(tree.trunk_tint_seed))),
            ));
            for leaf in tree.leaves {
                entities.push(Entity::new(
                    ids.allocate(),
                    leaf.pos,
                    Size::square(leaf_size),
                    EntityKind::Vegetation(Vegetation::Leaf(Leaf::new(leaf.color))),
                ));
            }
            for pos in tree.fruits {
                entities.push(Entity::new(
                    ids.allocate(),
                    pos,
                    Size::square(fruit_size),
                    EntityKind::Vegetation(Vegetation::Fruit(Fruit::new())),
                ));
            }
        }

        Self { key, entities }
    }

    /// Returns the slice index.
    #[must_use]
    pub const fn key(&self) -> ChunkKey {
        self.key
    }

    /// Returns every entity in generation order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Checks whether the chunk holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the entity a handle names, if the handle is still valid.
    pub fn resolve_mut(&mut self, handle: &VegetationHandle) -> Option<&mut Entity> {
        if handle.key != self.key {
            return None;
        }
        self.entities
            .get_mut(handle.slot as usize)
            .filter(|e| e.id() == handle.id)
    }

    /// Iterates over the handles of the reactive entities.
    pub fn vegetation_handles(&self) -> impl Iterator<Item = VegetationHandle> + '_ {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.role().is_reactive())
            .map(|(slot, e)| VegetationHandle {
                id: e.id(),
                key: self.key,
                slot: slot as u32,
            })
    }

    /// Returns the chunk's layout with IDs stripped, for comparing two
    /// generations of the same key.
    #[must_use]
    pub fn layout(&self) -> Vec<LayoutEntry> {
        self.entities
            .iter()
            .map(|e| (e.role(), e.pos(), e.size(), e.color()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flora::{LeafSpec, Slot};

    fn tree() -> Tree {
        Tree {
            root: WorldPos::new(0, 600),
            trunk_height: 300,
            trunk_tint_seed: 1,
            slots: vec![Slot::Leaf, Slot::Fruit, Slot::Empty],
            leaves: vec![LeafSpec {
                pos: WorldPos::new(-105, 195),
                color: Color::rgb(50, 200, 30),
            }],
            fruits: vec![WorldPos::new(-105, 225)],
        }
    }

    fn blocks() -> Vec<TerrainBlock> {
        (0..3)
            .map(|row| TerrainBlock {
                pos: WorldPos::new(0, 600 + row * 30),
                color: Color::rgb(212, 123, 74),
            })
            .collect()
    }

    #[test]
    fn test_assemble_order() {
        let mut ids = EntityIdAllocator::new();
        let chunk = Chunk::assemble(ChunkKey(0), blocks(), vec![tree()], 30, 30, 26, &mut ids);
        let roles: Vec<Role> = chunk.entities().iter().map(Entity::role).collect();
        assert_eq!(
            roles,
            vec![
                Role::Ground,
                Role::Ground,
                Role::Ground,
                Role::Trunk,
                Role::Leaf,
                Role::Fruit
            ]
        );
        assert_eq!(ids.issued(), 6);
        assert_eq!(chunk.entities()[3].pos(), WorldPos::new(0, 300));
        assert_eq!(chunk.entities()[5].size(), Size::square(26));
    }

    #[test]
    fn test_vegetation_handles() {
        let mut ids = EntityIdAllocator::new();
        let mut chunk = Chunk::assemble(ChunkKey(4), blocks(), vec![tree()], 30, 30, 26, &mut ids);
        let handles: Vec<VegetationHandle> = chunk.vegetation_handles().collect();
        assert_eq!(handles.len(), 3);
        assert!(handles.iter().all(|h| h.key == ChunkKey(4)));
        for handle in &handles {
            let entity = chunk.resolve_mut(handle).expect("handle should resolve");
            assert!(entity.role().is_reactive());
        }
    }

    #[test]
    fn test_stale_handle_rejected() {
        let mut ids = EntityIdAllocator::new();
        let mut chunk = Chunk::assemble(ChunkKey(0), blocks(), vec![tree()], 30, 30, 26, &mut ids);
        let Some(mut handle) = chunk.vegetation_handles().next() else {
            panic!("expected a handle");
        };
        handle.id = EntityId::from_raw(999);
        assert!(chunk.resolve_mut(&handle).is_none());
    }

    #[test]
    fn test_layout_ignores_ids() {
        let mut ids = EntityIdAllocator::new();
        let a = Chunk::assemble(ChunkKey(0), blocks(), vec![tree()], 30, 30, 26, &mut ids);
        let b = Chunk::assemble(ChunkKey(0), blocks(), vec![tree()], 30, 30, 26, &mut ids);
        assert_ne!(a.entities()[0].id(), b.entities()[0].id());
        assert_eq!(a.layout(), b.layout());
    }
}
