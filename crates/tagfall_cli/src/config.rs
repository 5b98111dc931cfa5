//! Tagfall configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "tagfall.toml";

/// Top-level configuration (tagfall.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct TagfallConfig {
    #[serde(default)]
    pub locales: LocalesConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Locale ranking
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct LocalesConfig {
    /// Tried before anything else
    #[serde(default)]
    pub preferred: Option<String>,
    /// Tried after every other locale
    #[serde(default = "default_fallback")]
    pub fallback: String,
    /// Restrict the catalog to these locale keys (empty = all)
    #[serde(default)]
    pub allowed: Vec<String>,
}

fn default_fallback() -> String {
    tagfall::DEFAULT_LOCALE.to_string()
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            preferred: None,
            fallback: default_fallback(),
            allowed: Vec::new(),
        }
    }
}

/// Catalog source
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CatalogConfig {
    /// Catalog file (relative paths are resolved against the config file)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl TagfallConfig {
    /// Load configuration from a file or a directory containing tagfall.toml
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: TagfallConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        if let (Some(catalog), Some(base)) = (config.catalog.path.as_mut(), config_path.parent()) {
            if catalog.is_relative() {
                *catalog = base.join(&*catalog);
            }
        }

        Ok(config)
    }

    /// Load an explicit config, or `./tagfall.toml` if present, or defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = Path::new(CONFIG_FILE_NAME);
        if local.is_file() {
            tracing::debug!("Using {}", local.display());
            return Self::load(local);
        }
        Ok(Self::default())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_uses_defaults() {
        let config: TagfallConfig = toml::from_str("").unwrap();
        assert_eq!(config, TagfallConfig::default());
        assert_eq!(config.locales.fallback, "en");
    }

    #[test]
    fn load_resolves_catalog_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
[locales]
preferred = "zh-TW"
fallback = "fr"
allowed = ["fr", "zh-hant"]

[catalog]
path = "strings.yaml"
"#,
        )
        .unwrap();

        let config = TagfallConfig::load(dir.path()).unwrap();
        assert_eq!(config.locales.preferred.as_deref(), Some("zh-TW"));
        assert_eq!(config.locales.fallback, "fr");
        assert_eq!(config.locales.allowed, vec!["fr", "zh-hant"]);
        assert_eq!(config.catalog.path, Some(dir.path().join("strings.yaml")));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TagfallConfig::load_or_default(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = TagfallConfig::default();
        let text = config.to_toml().unwrap();
        let back: TagfallConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
