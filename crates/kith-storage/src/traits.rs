//! Storage backend trait definitions

use crate::error::StorageResult;
use kith_core::{LoadSummary, Registry};

/// Outcome of loading stored data into a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Data was found and merged
    Loaded(LoadSummary),
    /// Nothing stored yet; the registry was left unchanged
    Missing,
}

/// Trait for storage backend implementations
///
/// Loads and saves are whole-registry, blocking operations.
pub trait StorageBackend {
    /// Merge stored data into `registry`. Missing data is not an error.
    fn load_into(&self, registry: &mut Registry) -> StorageResult<LoadStatus>;

    /// Replace stored data with the contents of `registry`
    fn save(&self, registry: &Registry) -> StorageResult<()>;

    /// Load into a fresh registry
    fn load(&self) -> StorageResult<Registry> {
        let mut registry = Registry::new();
        self.load_into(&mut registry)?;
        Ok(registry)
    }
}
