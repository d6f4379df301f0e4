//! ID types for generated entities.

use serde::{Deserialize, Serialize};

/// Unique identifier for an entity produced by world generation.
///
/// IDs are issued by an [`EntityIdAllocator`] owned by whoever creates
/// the entities; there is no process-wide counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Null/invalid entity ID.
    pub const NULL: Self = Self(0);

    /// Creates an entity ID from a raw value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Checks if this is a valid (non-null) entity ID.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Issues monotonically increasing entity IDs.
///
/// IDs are never reused, so a stale handle can never alias an entity
/// generated later for the same region.
#[derive(Debug, Clone)]
pub struct EntityIdAllocator {
    next: u64,
}

impl Default for EntityIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityIdAllocator {
    /// Creates an allocator whose first ID is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Issues the next ID.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Returns how many IDs have been issued.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.next - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = EntityIdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert!(a.is_valid());
        assert!(b > a);
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut first = EntityIdAllocator::new();
        let mut second = EntityIdAllocator::new();
        first.allocate();
        first.allocate();
        assert_eq!(second.allocate(), EntityId::from_raw(1));
        assert_eq!(first.issued(), 2);
    }

    #[test]
    fn test_null_id() {
        assert!(!EntityId::NULL.is_valid());
        assert_eq!(EntityId::from_raw(7).raw(), 7);
    }
}
