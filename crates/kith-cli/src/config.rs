//! CLI configuration
//!
//! Read from `<config dir>/kith/config.toml`, or the file named by
//! `KITH_CONFIG`. Every key is optional; unset keys fall back to defaults.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Search engine used by `kith search` unless `--fuzzy` is given
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Exact,
    Fuzzy,
}

impl std::str::FromStr for SearchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "fuzzy" => Ok(Self::Fuzzy),
            other => anyhow::bail!("Unknown search mode '{}' (expected exact or fuzzy)", other),
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Fuzzy => f.write_str("fuzzy"),
        }
    }
}

/// Get the config file path
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os("KITH_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kith")
        .join("config.toml")
}

/// Get default data file
pub fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kith")
        .join("people.json")
}

/// Configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_mode: Option<SearchMode>,
}

impl Config {
    /// Load the config file. A missing file yields defaults; any other read
    /// or parse failure is an error.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_file_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading config file {}", path.display()))
            }
        };
        toml::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Write the config file, creating its directory if needed
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["data_file", "format", "search_mode"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_file" => Some(self.data_file().display().to_string()),
            "format" => Some(self.format().to_string()),
            "search_mode" => Some(self.search_mode().to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "data_file" => self.data_file = Some(PathBuf::from(value)),
            "format" => self.format = Some(value.parse()?),
            "search_mode" => self.search_mode = Some(value.parse()?),
            _ => anyhow::bail!(
                "Unknown config key: {} (available keys: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(default_data_file)
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn search_mode(&self) -> SearchMode {
        self.search_mode.unwrap_or_default()
    }
}
