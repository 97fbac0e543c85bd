//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Server bind configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Pagination bounds applied to every collection request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when the request does not carry one
    pub default_page_size: usize,

    /// Upper bound a client-supplied page size is clamped to
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 20,
        }
    }
}

/// Complete configuration for the API process
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,

    /// Path prefix the routes and generated links are rooted at
    pub base_path: BasePath,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasePath(pub String);

impl Default for BasePath {
    fn default() -> Self {
        Self("/api".to_string())
    }
}

impl ApiConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from the path in `BIBLIO_CONFIG`, or fall back to defaults
    pub fn load() -> Result<Self> {
        match std::env::var("BIBLIO_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
