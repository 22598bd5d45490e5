//! likectl configuration
//!
//! Loaded from `~/.likectl/config.toml` when present, otherwise defaults.
//! Environment variables override the file:
//! - `LIKECTL_COLLECTION`: liked collection name (default "Liked Companies")
//! - `LIKECTL_CHUNK_SIZE`: ids per committed chunk (default 1000)
//! - `LIKECTL_RESET_SIZE`: companies re-liked by a reset (default 10)
//! - `DATABASE_URL`: Postgres connection string
//!
//! CLI flags are applied on top by the binary.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::CollectionName;
use crate::orchestrator::DEFAULT_CHUNK_SIZE;
use crate::validation::ValidationError;

/// Default number of companies re-liked by a reset
pub const DEFAULT_RESET_SIZE: u32 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?} (invalid TOML): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LikeConfig {
    pub likes: LikesConfig,
    pub server: ListenConfig,
    pub database: DatabaseConfig,
}

/// Liked-collection behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LikesConfig {
    /// Name of the collection treated as the liked set
    pub collection_name: CollectionName,
    /// Ids per committed chunk for like-all runs
    pub chunk_size: usize,
    /// Companies (first by id) re-liked by a reset
    pub reset_size: u32,
}

impl Default for LikesConfig {
    fn default() -> Self {
        Self {
            collection_name: CollectionName::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            reset_size: DEFAULT_RESET_SIZE,
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub bind: SocketAddr,
    /// Allow any CORS origin instead of localhost only
    pub cors_permissive: bool,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors_permissive: false,
        }
    }
}

/// Postgres connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    /// Seconds a request waits for a free pooled connection
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            acquire_timeout_secs: 10,
        }
    }
}

impl LikeConfig {
    /// Config file path: ~/.likectl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".likectl/config.toml")
    }

    /// Load from the default path (if it exists), then apply environment
    /// overrides and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        let config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a TOML config file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from `lookup` (normally the process environment) and
    /// validate the result.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("LIKECTL_COLLECTION") {
            self.likes.collection_name = CollectionName::new(&name)?;
        }

        if let Some(raw) = lookup("LIKECTL_CHUNK_SIZE") {
            self.likes.chunk_size = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "LIKECTL_CHUNK_SIZE",
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup("LIKECTL_RESET_SIZE") {
            self.likes.reset_size = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "LIKECTL_RESET_SIZE",
                value: raw.clone(),
            })?;
        }

        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            self.database.url = Some(url);
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.likes.chunk_size == 0 {
            return Err(ValidationError::BelowMinimum {
                field: "likes.chunk_size",
                min: 1,
                value: 0,
            });
        }

        if self.database.max_connections == 0 {
            return Err(ValidationError::BelowMinimum {
                field: "database.max_connections",
                min: 1,
                value: 0,
            });
        }

        if self.database.acquire_timeout_secs == 0 {
            return Err(ValidationError::BelowMinimum {
                field: "database.acquire_timeout_secs",
                min: 1,
                value: 0,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = LikeConfig::default();
        assert_eq!(config.likes.collection_name.as_str(), "Liked Companies");
        assert_eq!(config.likes.chunk_size, 1000);
        assert_eq!(config.likes.reset_size, 10);
        assert_eq!(config.server.bind.port(), 8000);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn parses_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[likes]
chunk_size = 250

[database]
url = "postgres://localhost/companies"
"#
        )
        .unwrap();

        let config = LikeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.likes.chunk_size, 250);
        assert_eq!(config.likes.reset_size, 10);
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://localhost/companies")
        );
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[likes\nchunk_size = ").unwrap();

        let err = LikeConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_apply() {
        let config = LikeConfig::default()
            .with_overrides(env(&[
                ("LIKECTL_COLLECTION", "Favourites"),
                ("LIKECTL_CHUNK_SIZE", "50"),
                ("LIKECTL_RESET_SIZE", "3"),
                ("DATABASE_URL", "postgres://db/likes"),
            ]))
            .unwrap();

        assert_eq!(config.likes.collection_name.as_str(), "Favourites");
        assert_eq!(config.likes.chunk_size, 50);
        assert_eq!(config.likes.reset_size, 3);
        assert_eq!(config.database.url.as_deref(), Some("postgres://db/likes"));
    }

    #[test]
    fn non_numeric_chunk_size_rejected() {
        let err = LikeConfig::default()
            .with_overrides(env(&[("LIKECTL_CHUNK_SIZE", "lots")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "LIKECTL_CHUNK_SIZE",
                ..
            }
        ));
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let err = LikeConfig::default()
            .with_overrides(env(&[("LIKECTL_CHUNK_SIZE", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn zero_acquire_timeout_rejected() {
        let mut config = LikeConfig::default();
        assert_eq!(config.database.acquire_timeout_secs, 10);
        config.database.acquire_timeout_secs = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::BelowMinimum {
                field: "database.acquire_timeout_secs",
                ..
            }
        ));
    }
}
