//! In-memory storage backend for testing

use crate::error::{StorageError, StorageResult};
use crate::traits::{LoadStatus, StorageBackend};
use kith_core::{Registry, Snapshot};
use std::sync::RwLock;

/// In-memory storage backend
///
/// Keeps the last saved snapshot. Useful for testing and temporary storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: RwLock<Option<Snapshot>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot)),
        }
    }

    /// The last saved snapshot, if any
    pub fn snapshot(&self) -> StorageResult<Option<Snapshot>> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(snapshot.clone())
    }
}

impl StorageBackend for MemoryStorage {
    fn load_into(&self, registry: &mut Registry) -> StorageResult<LoadStatus> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        match snapshot.as_ref() {
            Some(snapshot) => Ok(LoadStatus::Loaded(registry.merge_snapshot(snapshot)?)),
            None => Ok(LoadStatus::Missing),
        }
    }

    fn save(&self, registry: &Registry) -> StorageResult<()> {
        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        *snapshot = Some(registry.to_snapshot());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kith_core::Directionality;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(
            storage.load_into(&mut Registry::new()).unwrap(),
            LoadStatus::Missing
        );

        let mut registry = Registry::new();
        registry.create_or_get("Jane Doe").unwrap();
        registry
            .add_undirected_edge("Jane Doe", "John Smith", "friends")
            .unwrap();
        storage.save(&registry).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, registry);
    }

    #[test]
    fn test_conflicting_load_is_rejected() {
        let mut stored = Registry::new();
        stored
            .declare_relationship_kind("mentors", Directionality::Directed)
            .unwrap();
        let storage = MemoryStorage::with_snapshot(stored.to_snapshot());

        let mut registry = Registry::new();
        registry
            .declare_relationship_kind("mentors", Directionality::Undirected)
            .unwrap();
        let err = storage.load_into(&mut registry).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Core(kith_core::Error::KindConflict { .. })
        ));
    }
}
