use thiserror::Error;

/// Errors from the core ingest and query operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no metadata provided")]
    EmptyBatch,

    #[error("query value is empty")]
    EmptyQuery,

    #[error("invalid or missing property: '{0}'")]
    UnknownProperty(String),

    #[error("embedding provider error: {0}")]
    Provider(String),

    #[error("vector index error: {0}")]
    Index(String),
}

/// Errors from snapshot persistence (used by trait definitions in
/// vodsearch-core).
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(String),

    #[error("snapshot artifact is corrupt: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_display() {
        let err = SearchError::UnknownProperty("Director".to_string());
        assert_eq!(err.to_string(), "invalid or missing property: 'Director'");
        assert_eq!(SearchError::EmptyBatch.to_string(), "no metadata provided");
    }

    #[test]
    fn test_snapshot_error_display() {
        let err = SnapshotError::Corrupt("metadata.json: eof".to_string());
        assert!(err.to_string().contains("metadata.json"));
    }
}
