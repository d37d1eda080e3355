//! Bitmap CLI configuration
//!
//! Settings are read from `bitmap.toml` in the working directory, or from the
//! file given with `--config`:
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [output]
//! path = "out.txt"
//! trailing_blank_line = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE: &str = "bitmap.toml";

/// Top-level configuration
#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct BitmapConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Where printed canvases go
#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Write dumps to this file instead of stdout
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Emit an empty line after every printed canvas
    #[serde(default)]
    pub trailing_blank_line: bool,
}

impl BitmapConfig {
    /// Load `bitmap.toml` from `dir`, falling back to defaults if absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load an explicit configuration file, which must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
