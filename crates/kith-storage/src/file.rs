//! JSON file storage backend

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{StorageError, StorageResult};
use crate::traits::{LoadStatus, StorageBackend};
use kith_core::{Registry, Snapshot};

/// A registry persisted as one pretty-printed JSON document
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Read and parse the file; `None` if it does not exist
    pub fn read_snapshot(&self) -> StorageResult<Option<Snapshot>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let snapshot =
            serde_json::from_str(&content).map_err(|source| StorageError::Serialization {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(Some(snapshot))
    }

    /// Write a snapshot, replacing the file.
    ///
    /// The content goes to a temporary file in the same directory which is
    /// then renamed over the target, so a failed write never leaves a
    /// truncated data file. The temporary file is created owner read/write
    /// only on unix.
    pub fn write_snapshot(&self, snapshot: &Snapshot) -> StorageResult<()> {
        let content = snapshot.to_json_pretty()?;

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
                parent
            }
            None => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| self.io_error(e))?;
        file.as_file().sync_all().map_err(|e| self.io_error(e))?;
        file.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

impl StorageBackend for JsonFileStore {
    fn load_into(&self, registry: &mut Registry) -> StorageResult<LoadStatus> {
        let Some(snapshot) = self.read_snapshot()? else {
            tracing::warn!("File '{}' not found; starting empty", self.path.display());
            return Ok(LoadStatus::Missing);
        };

        let summary = registry.merge_snapshot(&snapshot)?;
        tracing::info!(
            "Loaded {} people and {} relationship kinds from {}",
            summary.people,
            snapshot.relationships.len(),
            self.path.display()
        );
        Ok(LoadStatus::Loaded(summary))
    }

    fn save(&self, registry: &Registry) -> StorageResult<()> {
        self.write_snapshot(&registry.to_snapshot())?;
        tracing::info!(
            "Saved {} people and {} relationship kinds to {}",
            registry.len(),
            registry.relationship_kinds().len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kith_core::Directionality;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_leaves_registry_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("people.json"));

        let mut registry = Registry::new();
        registry.create_or_get("Jane Doe").unwrap();
        let before = registry.clone();

        let status = store.load_into(&mut registry).unwrap();
        assert_eq!(status, LoadStatus::Missing);
        assert_eq!(registry, before);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("people.json"));

        let mut registry = Registry::new();
        registry.create_or_get("Jane A. Doe").unwrap();
        registry.create_or_get("John Smith").unwrap();
        registry
            .add_undirected_edge("Jane A. Doe", "John Smith", "friends")
            .unwrap();
        registry
            .declare_relationship_kind("mentors", Directionality::Directed)
            .unwrap();
        store.save(&registry).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, registry);
        assert_eq!(
            loaded.person("John Smith").unwrap().related("friends").unwrap(),
            ["Jane A. Doe"]
        );
    }

    #[test]
    fn test_file_is_in_snapshot_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        let store = JsonFileStore::new(&path);

        let mut registry = Registry::new();
        registry.create_or_get("Jane Doe").unwrap();
        registry
            .add_directed_edge("Jane Doe", "Kim Doe", "children")
            .unwrap();
        store.save(&registry).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["relationships"]["children"], "directed");
        assert_eq!(raw["people"]["Jane Doe"]["children"][0], "Kim Doe");
        assert_eq!(raw["people"]["Kim Doe"]["fullname"], "Kim Doe");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.load().unwrap_err();
        assert!(matches!(err, StorageError::Serialization { .. }));
    }

    #[test]
    fn test_save_replaces_file_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        let store = JsonFileStore::new(&path);

        let mut registry = Registry::new();
        registry.create_or_get("Jane Doe").unwrap();
        store.save(&registry).unwrap();
        registry.create_or_get("John Smith").unwrap();
        store.save(&registry).unwrap();

        assert_eq!(store.load().unwrap(), registry);
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["people.json"]);
    }

    #[test]
    fn test_failed_save_keeps_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        let store = JsonFileStore::new(&path);

        let mut registry = Registry::new();
        registry.create_or_get("Jane Doe").unwrap();
        store.save(&registry).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        // A directory in the way of the rename makes the save fail
        let blocked = JsonFileStore::new(dir.path().join("blocked"));
        fs::create_dir(blocked.path()).unwrap();
        fs::write(blocked.path().join("keep"), "x").unwrap();
        let err = blocked.save(&registry).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        let mut entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        entries.sort();
        assert_eq!(entries, ["blocked", "people.json"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.json");
        JsonFileStore::new(&path).save(&Registry::new()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
