//! Snapshot store trait.
//!
//! A snapshot is one serialized index artifact per tracked property plus
//! a single metadata registry artifact, located by deterministic names so
//! a fresh process can reload the prior session's state.

use vodsearch_types::error::SnapshotError;
use vodsearch_types::record::{MetadataRegistry, Property};

/// Trait for durable snapshot storage.
///
/// Implementations live in vodsearch-infra (e.g., `FsSnapshotStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait SnapshotStore: Send + Sync {
    /// Write a property's serialized vector index.
    fn write_index(
        &self,
        property: Property,
        bytes: &[u8],
    ) -> impl std::future::Future<Output = Result<(), SnapshotError>> + Send;

    /// Read a property's serialized vector index; `None` when no prior
    /// artifact exists.
    fn read_index(
        &self,
        property: Property,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>, SnapshotError>> + Send;

    /// Write the whole metadata registry.
    fn write_registry(
        &self,
        registry: &MetadataRegistry,
    ) -> impl std::future::Future<Output = Result<(), SnapshotError>> + Send;

    /// Read the metadata registry; `None` when no prior artifact exists.
    fn read_registry(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<MetadataRegistry>, SnapshotError>> + Send;
}
