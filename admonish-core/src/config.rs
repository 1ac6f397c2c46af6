//! Configuration management for admonish

use anyhow::{ensure, Context, Result};
use pulldown_cmark::Options;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::descriptor::{BlockType, Registry};
use crate::extract::Indentation;
use crate::params::KeywordVariant;
use crate::pipeline::DEFAULT_MARKER_PREFIX;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keywords: KeywordVariant,
    pub marker_prefix: String,
    pub indentation: Indentation,
    pub markdown: MarkdownConfig,
    /// Extra or overridden block types, keyed by kind
    pub types: BTreeMap<String, BlockType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub footnotes: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keywords: KeywordVariant::default(),
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
            indentation: Indentation::default(),
            markdown: MarkdownConfig::default(),
            types: BTreeMap::new(),
        }
    }
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            tasklists: true,
        }
    }
}

impl MarkdownConfig {
    /// pulldown-cmark options matching these settings
    pub fn options(&self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, self.tasklists);
        options
    }
}

impl Config {
    /// Get the platform-specific config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "admonish")
            .map(|proj_dirs| proj_dirs.config_dir().join("admonish.toml"))
    }

    /// Load configuration from file, falling back to defaults if missing
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Check settings serde cannot express
    pub fn validate(&self) -> Result<()> {
        let indentation = &self.indentation;
        ensure!(
            indentation.min_spaces >= 1,
            "indentation.min_spaces must be at least 1"
        );
        ensure!(
            indentation.min_spaces <= indentation.max_spaces,
            "indentation.min_spaces ({}) exceeds indentation.max_spaces ({})",
            indentation.min_spaces,
            indentation.max_spaces
        );
        ensure!(!self.marker_prefix.is_empty(), "marker_prefix must not be empty");
        Ok(())
    }

    /// Builtin block types with the configured ones merged over them
    pub fn registry(&self) -> Registry {
        let mut registry = Registry::builtin();
        registry.extend(self.types.clone());
        registry
    }
}
