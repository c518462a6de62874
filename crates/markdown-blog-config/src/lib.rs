mod collection;

pub use collection::{
    CollectionConfig, CollectionsConfig, SortField, SortOrder, SortOrderError, TagsConfig,
};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Excerpt length used when the config does not set one
pub const DEFAULT_EXCERPT_LENGTH: usize = 255;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Site-wide settings, loaded once and passed by reference into the build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub production: bool,
    pub base_url: String,
    pub site_name: String,
    pub site_description: String,
    pub site_author: String,
    pub source_path: PathBuf,
    pub build_path: PathBuf,
    pub excerpt_length: usize,
    pub collections: CollectionsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            production: false,
            base_url: String::new(),
            site_name: String::new(),
            site_description: String::new(),
            site_author: String::new(),
            source_path: PathBuf::from("source"),
            build_path: PathBuf::from("build_local"),
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            collections: CollectionsConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config = Self::from_toml(&content).map_err(|source| ConfigError::ConfigParseError {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Parse a config from TOML text, expanding `~` and `$VAR` in paths
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: SiteConfig = toml::from_str(content)?;

        config.source_path = Self::expand_path(&config.source_path).unwrap_or(config.source_path);
        config.build_path = Self::expand_path(&config.build_path).unwrap_or(config.build_path);

        Ok(config)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-blog");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Prefix a site-relative path with the configured base URL
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
