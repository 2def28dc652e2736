//! Site Configuration
//!
//! Hierarchical configuration loading:
//! 1. Environment variables (OCN_* prefix, highest precedence)
//! 2. ocn.toml in the working directory
//! 3. Built-in defaults (lowest precedence)

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level site configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Directory served under /static, relative to the working directory.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            static_dir: PathBuf::from("crates/ocn-site/static"),
        }
    }
}

/// Settings for the backing SQLite store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
    /// Maximum pool connections (default: 8)
    pub max_connections: u32,
    /// Busy timeout in milliseconds (default: 5000)
    pub busy_timeout_ms: u64,
    /// Connection acquire timeout in seconds (default: 30)
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ocn.db"),
            max_connections: 8,
            busy_timeout_ms: 5000,
            acquire_timeout_secs: 30,
        }
    }
}

impl SiteConfig {
    /// Load configuration from the current directory and environment.
    pub fn load() -> Result<Self> {
        let dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from_dir(dir)
    }

    /// Load configuration from a specific directory (ocn.toml + OCN_* env).
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        builder = builder.add_source(config::Config::try_from(&Self::default())?);

        // 2. Project config (ocn.toml)
        let config_file = dir.as_ref().join("ocn.toml");
        if config_file.exists() {
            builder = builder.add_source(
                config::File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 3. Environment variables (OCN_*)
        builder = builder.add_source(
            config::Environment::with_prefix("OCN")
                .separator("_")
                .try_parsing(true),
        );

        let merged = builder.build().context("Failed to build configuration")?;

        merged
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.server.bind_address, "127.0.0.1:3000");
        assert_eq!(
            config.server.static_dir,
            PathBuf::from("crates/ocn-site/static")
        );
        assert_eq!(config.database.path, PathBuf::from("ocn.db"));
        assert_eq!(config.database.max_connections, 8);
    }

    #[test]
    fn test_load_defaults_from_empty_dir() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = SiteConfig::load_from_dir(temp_dir.path()).expect("Failed to load config");

        assert_eq!(config.server.bind_address, "127.0.0.1:3000");
        assert_eq!(config.database.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_load_project_config() {
        let temp_dir = tempdir().expect("Failed to create temp dir");

        let config_content = r#"
[server]
bind_address = "0.0.0.0:8080"

[database]
path = "notes/course.db"
max_connections = 2
"#;
        fs::write(temp_dir.path().join("ocn.toml"), config_content)
            .expect("Failed to write config");

        let config = SiteConfig::load_from_dir(temp_dir.path()).expect("Failed to load config");

        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.database.path, PathBuf::from("notes/course.db"));
        assert_eq!(config.database.max_connections, 2);
        // Untouched keys keep their defaults
        assert_eq!(config.database.busy_timeout_ms, 5000);
    }
}
