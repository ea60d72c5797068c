//! Data directory resolution and configuration loading.

use std::path::{Path, PathBuf};

use vodsearch_types::config::ServiceConfig;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `VODSEARCH_DATA_DIR` environment variable
/// 2. `~/.vodsearch`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VODSEARCH_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".vodsearch");
    }

    // Last resort: current directory
    PathBuf::from(".vodsearch")
}

/// Load `config.toml` from the data directory.
///
/// A missing file yields the default configuration; a present but
/// unparsable file is an error.
pub async fn load_config(data_dir: &Path) -> anyhow::Result<ServiceConfig> {
    let path = data_dir.join("config.toml");
    match tokio::fs::read_to_string(&path).await {
        Ok(raw) => Ok(toml::from_str(&raw)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ServiceConfig::default()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_config_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(dir.path()).await.unwrap();
        assert_eq!(config.port, 8000);
    }

    #[tokio::test]
    async fn test_config_file_is_parsed() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("config.toml"), "port = 9999")
            .await
            .unwrap();

        let config = load_config(dir.path()).await.unwrap();
        assert_eq!(config.port, 9999);
    }

    #[tokio::test]
    async fn test_invalid_config_file_is_an_error() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("config.toml"), "port = \"not a number\"")
            .await
            .unwrap();

        assert!(load_config(dir.path()).await.is_err());
    }
}
