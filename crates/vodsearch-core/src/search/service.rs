//! The search engine: ingestion pipeline, query router, snapshot manager.
//!
//! `SearchService` owns the property registry and coordinates the
//! embedding provider, the per-property vector indexes, and the snapshot
//! store. Every public operation returns a typed result; mapping to HTTP
//! statuses happens at the boundary layer.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use vodsearch_types::error::{SearchError, SnapshotError};
use vodsearch_types::record::{MetadataRegistry, Property, QueryHit, Record};

use super::embedder::Embedder;
use super::index::VectorIndex;
use super::registry::{PropertyRegistry, PropertyShard};
use super::snapshot::SnapshotStore;

/// Default number of results for a semantic query.
pub const DEFAULT_TOP_K: usize = 5;

/// Property-scoped search engine over catalog records.
pub struct SearchService<E, V, S> {
    embedder: E,
    registry: PropertyRegistry<V>,
    snapshots: S,
}

impl<E, V, S> SearchService<E, V, S>
where
    E: Embedder,
    V: VectorIndex,
    S: SnapshotStore,
{
    /// Open the engine, restoring every property's shard from the snapshot
    /// store where artifacts exist and starting empty otherwise.
    ///
    /// A restored index is reused verbatim, vector count and internal
    /// ordering included. Corrupt artifacts fail the open; there is no
    /// partial restore.
    pub async fn open(embedder: E, snapshots: S) -> Result<Self, SnapshotError> {
        let dimension = embedder.dimension();
        let mut restored = snapshots.read_registry().await?.unwrap_or_default();
        let mut registry = PropertyRegistry::new();

        for property in Property::ALL {
            let index = match snapshots.read_index(property).await? {
                Some(bytes) => V::from_bytes(&bytes)?,
                None => V::with_dimension(dimension),
            };
            let metadata = restored.remove(&property).unwrap_or_default();
            debug!(
                property = %property,
                vectors = index.len(),
                entries = metadata.len(),
                "registered property shard"
            );
            registry.register(property, PropertyShard { index, metadata });
        }

        Ok(Self {
            embedder,
            registry,
            snapshots,
        })
    }

    /// Ingest a batch of records, returning how many records were added.
    ///
    /// For each record, every tracked property holding a string value is
    /// embedded and its vector appended to that property's index; the
    /// whole record is then appended to the metadata sequence of every
    /// tracked property present in it, once per property, whether or not
    /// a vector was added for that property. A present-but-non-string
    /// value therefore grows the metadata sequence without growing the
    /// index: a known alignment hazard, documented in DESIGN.md.
    ///
    /// All embedding happens before any lock is taken; each property's
    /// appends for the batch run under one write guard, so two batches
    /// never interleave within a property.
    pub async fn ingest(&self, records: &[Record]) -> Result<usize, SearchError> {
        if records.is_empty() {
            return Err(SearchError::EmptyBatch);
        }

        // Embedding phase, lock-free.
        let mut pending: Vec<Property> = Vec::new();
        let mut texts: Vec<String> = Vec::new();
        for record in records {
            for property in record.present() {
                if let Some(text) = record.text(property) {
                    pending.push(property);
                    texts.push(text.to_string());
                }
            }
        }

        let vectors = if texts.is_empty() {
            Vec::new()
        } else {
            let vectors = self.embedder.embed(&texts).await?;
            if vectors.len() != texts.len() {
                return Err(SearchError::Provider(format!(
                    "embedder returned {} vectors for {} texts",
                    vectors.len(),
                    texts.len()
                )));
            }
            vectors
        };

        let mut per_property: HashMap<Property, Vec<&[f32]>> = HashMap::new();
        for (property, vector) in pending.iter().zip(&vectors) {
            per_property
                .entry(*property)
                .or_default()
                .push(vector.as_slice());
        }

        // Mutation phase: one property at a time, vectors first, then one
        // metadata entry per record carrying the property.
        for property in Property::ALL {
            let property_vectors = per_property.remove(&property).unwrap_or_default();
            let carried = records.iter().any(|r| r.value(property).is_some());
            if property_vectors.is_empty() && !carried {
                continue;
            }

            let shard = self.registry.shard(property)?;
            let mut guard = shard.write().await;

            // Verified up front so the appends below cannot fail part-way.
            if let Some(bad) = property_vectors
                .iter()
                .find(|v| v.len() != guard.index.dimension())
            {
                return Err(SearchError::Index(format!(
                    "vector dimension {} does not match index dimension {}",
                    bad.len(),
                    guard.index.dimension()
                )));
            }

            for vector in property_vectors {
                guard.index.add(vector)?;
            }
            for record in records {
                if record.value(property).is_some() {
                    guard.metadata.push(record.clone());
                }
            }
        }

        info!(added = records.len(), "ingested metadata batch");
        Ok(records.len())
    }

    /// Query one property: substring containment for the date-like
    /// property, semantic nearest-neighbor search for everything else.
    ///
    /// The property name is lower-cased before lookup.
    pub async fn query(
        &self,
        property: &str,
        value: &str,
        top_k: usize,
    ) -> Result<Vec<QueryHit>, SearchError> {
        let parsed: Property = property
            .to_lowercase()
            .parse()
            .map_err(|_| SearchError::UnknownProperty(property.to_string()))?;

        if value.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        if parsed.is_substring_matched() {
            self.substring_query(parsed, value).await
        } else {
            self.semantic_query(parsed, value, top_k).await
        }
    }

    /// Linear containment scan over the property's metadata sequence.
    /// Results keep insertion order and carry distance 0.0; entries whose
    /// value for the property is missing or non-string never match.
    async fn substring_query(
        &self,
        property: Property,
        value: &str,
    ) -> Result<Vec<QueryHit>, SearchError> {
        let shard = self.registry.shard(property)?;
        let guard = shard.read().await;

        let hits = guard
            .metadata
            .iter()
            .filter(|record| {
                record
                    .text(property)
                    .is_some_and(|text| text.contains(value))
            })
            .map(|record| QueryHit {
                metadata: record.clone(),
                distance: 0.0,
            })
            .collect();
        Ok(hits)
    }

    /// Embed the query text and run nearest-neighbor search against the
    /// property's index, joining each position to its metadata entry.
    async fn semantic_query(
        &self,
        property: Property,
        value: &str,
        top_k: usize,
    ) -> Result<Vec<QueryHit>, SearchError> {
        let vectors = self.embedder.embed(&[value.to_string()]).await?;
        let query_vector = vectors.into_iter().next().ok_or_else(|| {
            SearchError::Provider("embedder returned no vector for the query".to_string())
        })?;

        let shard = self.registry.shard(property)?;
        let guard = shard.read().await;

        let mut hits = Vec::new();
        for hit in guard.index.search(&query_vector, top_k)? {
            // Alignment can drift when a tracked value was not a string;
            // positions past the sequence are dropped rather than surfaced.
            let Some(record) = guard.metadata.get(hit.position) else {
                warn!(
                    property = %property,
                    position = hit.position,
                    "dropping search hit past metadata bounds"
                );
                continue;
            };
            hits.push(QueryHit {
                metadata: record.clone(),
                distance: hit.distance,
            });
        }
        Ok(hits)
    }

    /// Persist every property's index and the full metadata registry.
    ///
    /// Holds every property's write lock for the duration so the artifacts
    /// form one consistent snapshot.
    pub async fn save(&self) -> Result<(), SnapshotError> {
        let mut guards = Vec::with_capacity(Property::ALL.len());
        for (property, shard) in self.registry.iter() {
            guards.push((property, shard.write().await));
        }

        let mut registry = MetadataRegistry::new();
        for (property, guard) in &guards {
            let bytes = guard.index.to_bytes()?;
            self.snapshots.write_index(*property, &bytes).await?;
            registry.insert(*property, guard.metadata.clone());
        }
        self.snapshots.write_registry(&registry).await?;

        info!("snapshot saved");
        Ok(())
    }

    /// Vector and metadata entry counts for one property.
    pub async fn counts(&self, property: Property) -> Result<(usize, usize), SearchError> {
        let shard = self.registry.shard(property)?;
        let guard = shard.read().await;
        Ok((guard.index.len(), guard.metadata.len()))
    }

    /// The embedding model backing this engine.
    pub fn model_name(&self) -> &str {
        self.embedder.model_name()
    }
}
