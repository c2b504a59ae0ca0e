#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for vercheck
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/vercheck/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;
use vercheck_errors::{ConfigError, Error};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub feeds: FeedConfig,

    #[serde(default)]
    pub signing: SigningConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// Snapshot cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache root, platform cache dir when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Snapshots older than this are re-fetched
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u64,
}

/// Upstream index format behind `feeds.index_url`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IndexFormatKind {
    /// `index-v1.json`, shipped inside `index-v1.jar`
    #[default]
    #[serde(rename = "index-v1")]
    IndexV1,
    /// Flat `{id: {name, version, vercode}}` snapshot, served as plain JSON
    #[serde(rename = "snapshot")]
    Snapshot,
}

impl IndexFormatKind {
    /// Whether the document is distributed zip-wrapped
    #[must_use]
    pub fn is_archived(self) -> bool {
        matches!(self, Self::IndexV1)
    }
}

/// Feed locations and parsing knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_index_url")]
    pub index_url: String,
    #[serde(default = "default_index_member")]
    pub index_member: String,
    #[serde(default)]
    pub index_format: IndexFormatKind,
    #[serde(default = "default_ledger_url")]
    pub ledger_url: String,
    /// Base URL artifacts are downloaded from for the signing check
    #[serde(default = "default_repo_url")]
    pub repo_url: String,
    /// Index entries that are not real apps
    #[serde(default = "default_excluded_packages")]
    pub excluded_packages: Vec<String>,
    /// Locale consulted when an app has no top-level name
    #[serde(default = "default_name_locale")]
    pub name_locale: String,
}

/// Signing inspection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningConfig {
    #[serde(default = "default_signing_tool")]
    pub tool: String,
    /// Certificate identity of the repository's own signing key
    #[serde(default = "default_official_signer")]
    pub official_signer: String,
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout")]
    pub timeout: u64, // seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64, // seconds
}

// Default implementations

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            max_age_hours: default_max_age_hours(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            index_member: default_index_member(),
            index_format: IndexFormatKind::default(),
            ledger_url: default_ledger_url(),
            repo_url: default_repo_url(),
            excluded_packages: default_excluded_packages(),
            name_locale: default_name_locale(),
        }
    }
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            tool: default_signing_tool(),
            official_signer: default_official_signer(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

// Default value functions for serde
fn default_max_age_hours() -> u64 {
    24
}

fn default_index_url() -> String {
    constants::INDEX_URL.to_string()
}

fn default_index_member() -> String {
    constants::INDEX_MEMBER.to_string()
}

fn default_ledger_url() -> String {
    constants::LEDGER_URL.to_string()
}

fn default_repo_url() -> String {
    constants::REPO_URL.to_string()
}

fn default_excluded_packages() -> Vec<String> {
    vec![constants::OTA_PACKAGE.to_string()]
}

fn default_name_locale() -> String {
    constants::NAME_LOCALE.to_string()
}

fn default_signing_tool() -> String {
    constants::SIGNING_TOOL.to_string()
}

fn default_official_signer() -> String {
    constants::OFFICIAL_SIGNER.to_string()
}

fn default_timeout() -> u64 {
    300 // 5 minutes, the index archive is large
}

fn default_connect_timeout() -> u64 {
    30
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(Self::path_in(&config_dir))
    }

    /// Config file location under a platform config directory
    #[must_use]
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir
            .join(constants::APP_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME)
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        debug!(path = %path.display(), "loaded config file");

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let Ok(config_path) = Self::default_path() else {
            return Ok(Self::default());
        };

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // VERCHECK_CACHE_DIR
        if let Ok(dir) = std::env::var("VERCHECK_CACHE_DIR") {
            if dir.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "VERCHECK_CACHE_DIR".to_string(),
                    value: dir,
                }
                .into());
            }
            self.cache.dir = Some(PathBuf::from(dir));
        }

        // VERCHECK_MAX_AGE_HOURS
        if let Ok(hours) = std::env::var("VERCHECK_MAX_AGE_HOURS") {
            self.cache.max_age_hours = hours.parse().map_err(|_| ConfigError::InvalidValue {
                field: "VERCHECK_MAX_AGE_HOURS".to_string(),
                value: hours,
            })?;
        }

        // VERCHECK_INDEX_URL
        if let Ok(url) = std::env::var("VERCHECK_INDEX_URL") {
            self.feeds.index_url = url;
        }

        // VERCHECK_LEDGER_URL
        if let Ok(url) = std::env::var("VERCHECK_LEDGER_URL") {
            self.feeds.ledger_url = url;
        }

        // VERCHECK_APKSIGNER
        if let Ok(tool) = std::env::var("VERCHECK_APKSIGNER") {
            self.signing.tool = tool;
        }

        Ok(())
    }

    /// Get the cache root (with default)
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache.dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(constants::CACHE_DIR_NAME)
        })
    }

    /// Snapshot freshness window
    #[must_use]
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.cache.max_age_hours.saturating_mul(3600))
    }

    /// Artifact URL for one exact package release
    #[must_use]
    pub fn artifact_url(&self, package_id: &str, version_code: u64) -> String {
        format!(
            "{}/{package_id}_{version_code}.apk",
            self.feeds.repo_url.trim_end_matches('/')
        )
    }
}
