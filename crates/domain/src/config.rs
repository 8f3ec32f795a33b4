//! Application configuration structures
//!
//! Loaded by the infra config loader from environment variables or a
//! JSON/TOML file.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database settings
    pub database: DatabaseConfig,
    /// File storage settings
    pub storage: StorageConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
    /// Connection pool size
    pub pool_size: u32,
}

/// File storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for stored files
    pub root: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server binds to
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig { path: "encore.db".into(), pool_size: 5 },
            storage: StorageConfig { root: "storage".into() },
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: "127.0.0.1:3000".into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.database.pool_size, 5);
        assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
    }

    #[test]
    fn server_section_is_optional_in_files() {
        let json = r#"{
            "database": { "path": "test.db", "pool_size": 2 },
            "storage": { "root": "files" }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.database.path, "test.db");
        assert_eq!(config.server.bind_addr, ServerConfig::default().bind_addr);
    }
}
