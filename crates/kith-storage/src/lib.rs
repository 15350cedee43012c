//! Kith Storage - persistence for the social graph
//!
//! The canonical store is a single JSON file in the snapshot format of
//! [`kith_core::Snapshot`]. An in-memory backend is provided for tests.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use file::JsonFileStore;
pub use memory::MemoryStorage;
pub use traits::{LoadStatus, StorageBackend};
