//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ENCORE_DB_PATH`: Database file path
//! - `ENCORE_DB_POOL_SIZE`: Connection pool size
//! - `ENCORE_STORAGE_ROOT`: Root directory for stored files
//! - `ENCORE_BIND_ADDR`: Socket address the server binds to (optional)

use std::path::{Path, PathBuf};

use encore_domain::{
    Config, DatabaseConfig, EncoreError, Result, ServerConfig, StorageConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `EncoreError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `EncoreError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("ENCORE_DB_PATH")?;
    let db_pool_size = env_var("ENCORE_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| EncoreError::Config(format!("Invalid pool size: {e}")))
    })?;
    let storage_root = env_var("ENCORE_STORAGE_ROOT")?;
    let bind_addr =
        std::env::var("ENCORE_BIND_ADDR").unwrap_or_else(|_| ServerConfig::default().bind_addr);

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        storage: StorageConfig { root: storage_root },
        server: ServerConfig { bind_addr },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `EncoreError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(EncoreError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            EncoreError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| EncoreError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| EncoreError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| EncoreError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(EncoreError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory and up to two parent directories
/// for `config.{json,toml}` or `encore.{json,toml}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("encore.json"),
            cwd.join("encore.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| EncoreError::Config(format!("Missing required environment variable: {key}")))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("ENCORE_DB_PATH", "/tmp/encore-test.db");
        std::env::set_var("ENCORE_DB_POOL_SIZE", "5");
        std::env::set_var("ENCORE_STORAGE_ROOT", "/tmp/encore-storage");
        std::env::set_var("ENCORE_BIND_ADDR", "0.0.0.0:8080");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.database.path, "/tmp/encore-test.db");
        assert_eq!(config.database.pool_size, 5);
        assert_eq!(config.storage.root, "/tmp/encore-storage");
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");

        std::env::remove_var("ENCORE_DB_PATH");
        std::env::remove_var("ENCORE_DB_POOL_SIZE");
        std::env::remove_var("ENCORE_STORAGE_ROOT");
        std::env::remove_var("ENCORE_BIND_ADDR");
    }

    #[test]
    fn test_bind_addr_defaults_when_unset() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("ENCORE_DB_PATH", "/tmp/encore-test.db");
        std::env::set_var("ENCORE_DB_POOL_SIZE", "2");
        std::env::set_var("ENCORE_STORAGE_ROOT", "/tmp/encore-storage");
        std::env::remove_var("ENCORE_BIND_ADDR");

        let config = load_from_env().expect("load");
        assert_eq!(config.server.bind_addr, ServerConfig::default().bind_addr);

        std::env::remove_var("ENCORE_DB_PATH");
        std::env::remove_var("ENCORE_DB_POOL_SIZE");
        std::env::remove_var("ENCORE_STORAGE_ROOT");
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::remove_var("ENCORE_DB_PATH");
        std::env::remove_var("ENCORE_DB_POOL_SIZE");
        std::env::remove_var("ENCORE_STORAGE_ROOT");

        let result = load_from_env();
        assert!(result.is_err(), "Should fail with missing env var");
        assert!(matches!(result.unwrap_err(), EncoreError::Config(_)));
    }

    #[test]
    fn test_load_from_env_invalid_pool_size() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("ENCORE_DB_PATH", "/tmp/encore-test.db");
        std::env::set_var("ENCORE_DB_POOL_SIZE", "not-a-number");

        let result = load_from_env();
        assert!(result.is_err(), "Should fail with invalid pool size");
        assert!(matches!(result.unwrap_err(), EncoreError::Config(_)));

        std::env::remove_var("ENCORE_DB_PATH");
        std::env::remove_var("ENCORE_DB_POOL_SIZE");
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "database": { "path": "test.db", "pool_size": 4 },
            "storage": { "root": "files" },
            "server": { "bind_addr": "127.0.0.1:9000" }
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("load json config");
        assert_eq!(config.database.path, "test.db");
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[database]
path = "test.db"
pool_size = 6

[storage]
root = "files"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("load toml config");
        assert_eq!(config.database.pool_size, 6);
        assert_eq!(config.storage.root, "files");
        // Missing server section falls back to the default
        assert_eq!(config.server.bind_addr, ServerConfig::default().bind_addr);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result.unwrap_err(), EncoreError::Config(_)));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("test.yaml"));
        assert!(matches!(result.unwrap_err(), EncoreError::Config(_)));
    }
}
