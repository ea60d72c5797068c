//! Vector index trait.
//!
//! The nearest-neighbor structure is opaque to the engine: append a
//! vector, get back its ordinal position; search, get back ranked
//! positions. The ordinal position is the join key into the property's
//! metadata sequence, so implementations must be strictly append-only.

use vodsearch_types::error::{SearchError, SnapshotError};

/// One ranked result from a vector index search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Zero-based insertion order of the matched vector.
    pub position: usize,
    /// Distance from the query vector, in backend-defined units.
    pub distance: f32,
}

/// Trait for an append-only vector similarity index.
///
/// Operations are synchronous; implementations hold everything in memory
/// and never block on I/O. Implementations live in vodsearch-infra.
pub trait VectorIndex: Sized + Send + Sync {
    /// Create an empty index for vectors of the given dimension.
    fn with_dimension(dimension: usize) -> Self;

    /// Append a vector, returning its ordinal position.
    ///
    /// Positions are strictly increasing and never reused or reassigned
    /// for the lifetime of the index.
    fn add(&mut self, vector: &[f32]) -> Result<usize, SearchError>;

    /// Return up to `k` results ordered by ascending distance.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, SearchError>;

    /// Number of vectors stored.
    fn len(&self) -> usize;

    /// Whether the index holds no vectors.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality this index accepts.
    fn dimension(&self) -> usize;

    /// Serialize the index into a snapshot artifact.
    fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError>;

    /// Rebuild an index from a snapshot artifact, vector count and
    /// internal ordering included.
    fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError>;
}
