//! Per-property index registry.
//!
//! Owns one vector index and one aligned metadata sequence per tracked
//! property. Position `i` in a property's index corresponds to element `i`
//! of its metadata sequence; every mutation path goes through the
//! ingestion pipeline, which appends to both under the same write guard.

use std::collections::HashMap;

use tokio::sync::RwLock;

use vodsearch_types::error::SearchError;
use vodsearch_types::record::{Property, Record};

use super::index::VectorIndex;

/// One property's vector index and its aligned metadata sequence.
#[derive(Debug)]
pub struct PropertyShard<V> {
    pub index: V,
    pub metadata: Vec<Record>,
}

/// Registry mapping each tracked property to its shard.
///
/// The map is populated once at startup (empty shards, or shards restored
/// from a snapshot) and never changes shape afterwards; only shard
/// contents mutate, behind their per-property lock. Ingestion takes the
/// write side, queries the read side, and a snapshot save takes every
/// write lock in `Property::ALL` order.
pub struct PropertyRegistry<V> {
    shards: HashMap<Property, RwLock<PropertyShard<V>>>,
}

impl<V: VectorIndex> PropertyRegistry<V> {
    /// A registry with no shards registered yet.
    pub fn new() -> Self {
        Self {
            shards: HashMap::new(),
        }
    }

    /// Register a property's shard. Called once per tracked property at
    /// startup; a repeat registration replaces the shard.
    pub fn register(&mut self, property: Property, shard: PropertyShard<V>) {
        self.shards.insert(property, RwLock::new(shard));
    }

    /// The shard for a property.
    pub fn shard(&self, property: Property) -> Result<&RwLock<PropertyShard<V>>, SearchError> {
        self.shards
            .get(&property)
            .ok_or_else(|| SearchError::UnknownProperty(property.to_string()))
    }

    /// All registered shards, in `Property::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, &RwLock<PropertyShard<V>>)> {
        Property::ALL
            .into_iter()
            .filter_map(|property| self.shards.get(&property).map(|shard| (property, shard)))
    }
}

impl<V: VectorIndex> Default for PropertyRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}
