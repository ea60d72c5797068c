//! Filesystem snapshot store.
//!
//! Persists one `index_{property}.json` artifact per tracked property and
//! a single `metadata.json` for the registry, all under the data
//! directory. Reload finds the artifacts again by the same names.

use std::path::{Path, PathBuf};

use vodsearch_core::search::snapshot::SnapshotStore;
use vodsearch_types::error::SnapshotError;
use vodsearch_types::record::{MetadataRegistry, Property};

/// Snapshot store writing JSON artifacts under a fixed directory.
///
/// All I/O goes through `tokio::fs`. A missing artifact reads back as
/// `None`; any other I/O failure or an unparsable artifact is an error.
pub struct FsSnapshotStore {
    dir: PathBuf,
}

impl FsSnapshotStore {
    /// Create a store rooted at `dir`. The directory must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of a property's index artifact.
    pub fn index_path(&self, property: Property) -> PathBuf {
        self.dir.join(format!("index_{property}.json"))
    }

    /// Path of the metadata registry artifact.
    pub fn registry_path(&self) -> PathBuf {
        self.dir.join("metadata.json")
    }

    async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, SnapshotError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SnapshotError::Io(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }
}

impl SnapshotStore for FsSnapshotStore {
    async fn write_index(&self, property: Property, bytes: &[u8]) -> Result<(), SnapshotError> {
        let path = self.index_path(property);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| SnapshotError::Io(format!("failed to write {}: {e}", path.display())))
    }

    async fn read_index(&self, property: Property) -> Result<Option<Vec<u8>>, SnapshotError> {
        Self::read_optional(&self.index_path(property)).await
    }

    async fn write_registry(&self, registry: &MetadataRegistry) -> Result<(), SnapshotError> {
        let bytes = serde_json::to_vec(registry).map_err(|e| {
            SnapshotError::Io(format!("failed to serialize metadata registry: {e}"))
        })?;
        let path = self.registry_path();
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| SnapshotError::Io(format!("failed to write {}: {e}", path.display())))
    }

    async fn read_registry(&self) -> Result<Option<MetadataRegistry>, SnapshotError> {
        match Self::read_optional(&self.registry_path()).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| SnapshotError::Corrupt(format!("metadata registry: {e}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    use vodsearch_types::record::Record;

    #[tokio::test]
    async fn test_index_artifact_round_trip() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path());

        store
            .write_index(Property::Title, b"index bytes")
            .await
            .unwrap();

        let bytes = store.read_index(Property::Title).await.unwrap();
        assert_eq!(bytes.as_deref(), Some(b"index bytes".as_slice()));
    }

    #[tokio::test]
    async fn test_missing_artifacts_read_as_none() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path());

        assert!(store.read_index(Property::Plot).await.unwrap().is_none());
        assert!(store.read_registry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_artifact_names_are_deterministic() {
        let store = FsSnapshotStore::new("/data");
        assert_eq!(
            store.index_path(Property::ReleaseDate),
            PathBuf::from("/data/index_release_date.json")
        );
        assert_eq!(store.registry_path(), PathBuf::from("/data/metadata.json"));
    }

    #[tokio::test]
    async fn test_registry_round_trip() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path());

        let mut registry = MetadataRegistry::new();
        let record: Record =
            serde_json::from_value(serde_json::json!({"title": "Brazil"})).unwrap();
        registry.insert(Property::Title, vec![record]);

        store.write_registry(&registry).await.unwrap();
        let restored = store.read_registry().await.unwrap().unwrap();
        assert_eq!(restored, registry);
    }

    #[tokio::test]
    async fn test_corrupt_registry_is_an_error() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path());

        tokio::fs::write(store.registry_path(), b"{ truncated")
            .await
            .unwrap();

        let err = store.read_registry().await.unwrap_err();
        assert!(matches!(err, SnapshotError::Corrupt(_)));
    }
}
