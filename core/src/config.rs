//! Showcase configuration loading
//!
//! Loads configuration from `~/.config/showcase/showcase.toml` (or the
//! `SHOWCASE_CONFIG` env). Every field has a default, so an absent file is
//! equivalent to an empty one.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::errors::ConfigError;

/// Root configuration
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ShowcaseConfig {
    /// Which repository the catalog is read from
    #[serde(default)]
    pub source: SourceConfig,

    /// Layout of the catalog inside that repository
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Identity of the content source: API endpoint plus owner/repo/branch.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SourceConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_owner")]
    pub owner: String,

    #[serde(default = "default_repo")]
    pub repo: String,

    /// Reference every request is pinned to
    #[serde(default = "default_branch")]
    pub branch: String,

    /// The hosting API rejects requests without a User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_owner() -> String {
    "explysm".to_string()
}

fn default_repo() -> String {
    "Ai-Slop".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_user_agent() -> String {
    format!("showcase/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            owner: default_owner(),
            repo: default_repo(),
            branch: default_branch(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Catalog layout and traversal settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Directory holding one subdirectory per category
    #[serde(default = "default_root")]
    pub root: String,

    /// File name of the descriptor inside each project directory
    #[serde(default = "default_descriptor_file")]
    pub descriptor_file: String,

    /// Descriptor reads in flight per category (1 = serial)
    #[serde(default = "default_max_concurrent_reads")]
    pub max_concurrent_reads: usize,
}

fn default_root() -> String {
    "categories".to_string()
}

fn default_descriptor_file() -> String {
    "info.json".to_string()
}

fn default_max_concurrent_reads() -> usize {
    1
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            descriptor_file: default_descriptor_file(),
            max_concurrent_reads: default_max_concurrent_reads(),
        }
    }
}

impl CatalogConfig {
    /// Path of the descriptor file for a project directory.
    pub fn descriptor_path(&self, project_path: &str) -> String {
        format!(
            "{}/{}",
            project_path.trim_end_matches('/'),
            self.descriptor_file
        )
    }
}

impl ShowcaseConfig {
    /// Environment variable for config path override
    pub const ENV_CONFIG_PATH: &'static str = "SHOWCASE_CONFIG";

    /// Default config filename
    pub const DEFAULT_CONFIG_FILENAME: &'static str = "showcase.toml";

    /// Load configuration from file
    ///
    /// Resolution order:
    /// 1. `SHOWCASE_CONFIG` environment variable
    /// 2. `~/.config/showcase/showcase.toml`
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::resolve_config_path();

        if !path.exists() {
            tracing::info!(
                path = %path.display(),
                "showcase config not found, using defaults"
            );
            return Ok(Self::default());
        }

        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path. Unlike [`Self::load`], a
    /// missing file is an error.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents)
    }

    /// Parse configuration from TOML string
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let cfg: ShowcaseConfig =
            toml::from_str(contents).map_err(|source| ConfigError::Parse { source })?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn resolve_config_path() -> PathBuf {
        if let Ok(path) = std::env::var(Self::ENV_CONFIG_PATH) {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .map(|h| {
                h.join(".config")
                    .join("showcase")
                    .join(Self::DEFAULT_CONFIG_FILENAME)
            })
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_CONFIG_FILENAME))
    }

    /// Validate configuration. Called by [`Self::parse`]; callers that apply
    /// overrides on top of a loaded config should call it again.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("source.owner", &self.source.owner),
            ("source.repo", &self.source.repo),
            ("source.branch", &self.source.branch),
            ("catalog.root", &self.catalog.root),
            ("catalog.descriptor_file", &self.catalog.descriptor_file),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
        }

        let api_base = Url::parse(&self.source.api_base).map_err(|e| {
            ConfigError::Invalid(format!(
                "source.api_base '{}' is not a URL: {e}",
                self.source.api_base
            ))
        })?;
        if !matches!(api_base.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "source.api_base must be http(s), got '{}'",
                api_base.scheme()
            )));
        }

        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "source.timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.catalog.max_concurrent_reads == 0 {
            return Err(ConfigError::Invalid(
                "catalog.max_concurrent_reads must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
