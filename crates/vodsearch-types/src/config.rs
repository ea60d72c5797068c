//! Service configuration.
//!
//! `ServiceConfig` represents the optional `config.toml` in the data
//! directory. All fields have sensible defaults, so a missing file is
//! equivalent to an empty one.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the search service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Interface the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server binds to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding a static web UI, served when it exists.
    #[serde(default)]
    pub web_dir: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_default_values() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert!(config.web_dir.is_none());
    }

    #[test]
    fn test_service_config_deserialize_with_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_service_config_deserialize_with_values() {
        let toml_str = r#"
host = "0.0.0.0"
port = 9100
web_dir = "web/dist"
"#;
        let config: ServiceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9100);
        assert_eq!(config.web_dir.as_deref(), Some("web/dist"));
    }

    #[test]
    fn test_service_config_serde_roundtrip() {
        let config = ServiceConfig {
            host: "10.0.0.1".to_string(),
            port: 8080,
            web_dir: Some("static".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ServiceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.host, "10.0.0.1");
        assert_eq!(parsed.port, 8080);
    }
}
