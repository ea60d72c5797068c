//! Brute-force flat vector index.
//!
//! Stores vectors row-major in one contiguous buffer and searches by
//! scanning every row. Distances are squared L2 (no square root), exactly
//! what a flat L2 index reports, so persisted sessions keep returning the
//! same numbers. Search is exact; results come back ascending.

use serde::{Deserialize, Serialize};

use vodsearch_core::search::index::{SearchHit, VectorIndex};
use vodsearch_types::error::{SearchError, SnapshotError};

/// Exact flat L2 index over fixed-dimension vectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatIndex {
    dimension: usize,
    data: Vec<f32>,
}

impl FlatIndex {
    fn rows(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    fn row(&self, position: usize) -> &[f32] {
        let start = position * self.dimension;
        &self.data[start..start + self.dimension]
    }
}

impl VectorIndex for FlatIndex {
    fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension,
            data: Vec::new(),
        }
    }

    fn add(&mut self, vector: &[f32]) -> Result<usize, SearchError> {
        if vector.len() != self.dimension {
            return Err(SearchError::Index(format!(
                "vector dimension {} does not match index dimension {}",
                vector.len(),
                self.dimension
            )));
        }
        let position = self.rows();
        self.data.extend_from_slice(vector);
        Ok(position)
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, SearchError> {
        if query.len() != self.dimension {
            return Err(SearchError::Index(format!(
                "query dimension {} does not match index dimension {}",
                query.len(),
                self.dimension
            )));
        }

        let mut hits: Vec<SearchHit> = (0..self.rows())
            .map(|position| {
                let distance = self
                    .row(position)
                    .iter()
                    .zip(query)
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f32>();
                SearchHit { position, distance }
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);
        Ok(hits)
    }

    fn len(&self) -> usize {
        self.rows()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        serde_json::to_vec(self).map_err(|e| SnapshotError::Io(e.to_string()))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        serde_json::from_slice(bytes).map_err(|e| SnapshotError::Corrupt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(dimension: usize, axis: usize) -> Vec<f32> {
        let mut v = vec![0.0; dimension];
        v[axis] = 1.0;
        v
    }

    #[test]
    fn test_add_returns_strictly_increasing_positions() {
        let mut index = FlatIndex::with_dimension(4);
        for expected in 0..5 {
            let position = index.add(&unit(4, expected % 4)).unwrap();
            assert_eq!(position, expected);
        }
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_add_rejects_wrong_dimension() {
        let mut index = FlatIndex::with_dimension(4);
        let err = index.add(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, SearchError::Index(_)));
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_search_rejects_wrong_dimension() {
        let index = FlatIndex::with_dimension(4);
        assert!(index.search(&[1.0], 3).is_err());
    }

    #[test]
    fn test_search_returns_squared_l2_ascending() {
        let mut index = FlatIndex::with_dimension(2);
        index.add(&[0.0, 0.0]).unwrap();
        index.add(&[3.0, 4.0]).unwrap();
        index.add(&[1.0, 0.0]).unwrap();

        let hits = index.search(&[0.0, 0.0], 3).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].position, 0);
        assert_eq!(hits[0].distance, 0.0);
        assert_eq!(hits[1].position, 2);
        assert_eq!(hits[1].distance, 1.0);
        assert_eq!(hits[2].position, 1);
        // Squared distance: 3^2 + 4^2, not 5.
        assert_eq!(hits[2].distance, 25.0);
    }

    #[test]
    fn test_search_caps_results_at_k_and_at_len() {
        let mut index = FlatIndex::with_dimension(2);
        for i in 0..4 {
            index.add(&[i as f32, 0.0]).unwrap();
        }

        assert_eq!(index.search(&[0.0, 0.0], 2).unwrap().len(), 2);
        assert_eq!(index.search(&[0.0, 0.0], 100).unwrap().len(), 4);
    }

    #[test]
    fn test_search_empty_index_returns_nothing() {
        let index = FlatIndex::with_dimension(8);
        assert!(index.is_empty());
        assert!(index.search(&[0.0; 8], 5).unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_bytes_round_trip() {
        let mut index = FlatIndex::with_dimension(3);
        index.add(&[1.0, 2.0, 3.0]).unwrap();
        index.add(&[4.0, 5.0, 6.0]).unwrap();

        let restored = FlatIndex::from_bytes(&index.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.dimension(), 3);

        let original = index.search(&[1.0, 2.0, 3.0], 2).unwrap();
        let reloaded = restored.search(&[1.0, 2.0, 3.0], 2).unwrap();
        assert_eq!(original, reloaded);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let err = FlatIndex::from_bytes(b"definitely not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Corrupt(_)));
    }
}
