use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

static COMPILED_DEFAULT: LazyLock<Config> = LazyLock::new(|| {
    Config::parse(DEFAULT_CONFIG).unwrap_or_else(|e| {
        tracing::warn!("bundled default config rejected, using built-in defaults: {e}");
        Config::default()
    })
});

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub code: CodeConfig,
    pub paragraph: ParagraphConfig,
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CodeConfig {
    /// Add `class="language-TAG"` to `<code>` for fences with a language tag.
    pub language_class: bool,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ParagraphConfig {
    pub soft_break: SoftBreak,
}

/// Rendering of a line feed inside a paragraph
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SoftBreak {
    #[default]
    Br,
    Space,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PreviewConfig {
    pub raw_panel: bool,
    pub raw_title: String,
    pub rendered_title: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            raw_panel: true,
            raw_title: "Raw Markdown".to_string(),
            rendered_title: "Preview".to_string(),
        }
    }
}

impl Config {
    /// The configuration bundled with the crate.
    pub fn compiled_default() -> &'static Config {
        &COMPILED_DEFAULT
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Fails when the text is not valid TOML or a value has the wrong type.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML config file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a valid config.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file, or return defaults if not found or invalid.
    pub fn load(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{e}, falling back to default config");
                Self::compiled_default().clone()
            }
        }
    }
}
