//! Configuration for glyphwalk.
//!
//! Everything is optional. Without a file the program uses the built-in
//! glyph and hint line. The file lives at `~/.glyphwalk/config.toml`:
//!
//! ```toml
//! # Marker glyph (must be one cell wide)
//! glyph = "@"
//!
//! # Usage line shown at the top-left
//! hint = "Arrows move, q quits"
//!
//! # Log filter for ~/.glyphwalk/glyphwalk.log
//! log_level = "debug"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_width::UnicodeWidthChar;

/// Name of the per-user directory holding the config and the log
pub const APP_DIR: &str = ".glyphwalk";

pub const DEFAULT_GLYPH: char = 'O';
pub const DEFAULT_HINT: &str = "Arrow keys move the square. Press 'q' or Ctrl-C to quit.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Glyph {0:?} must be exactly one cell wide")]
    InvalidGlyph(char),
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Marker glyph
    pub glyph: char,
    /// Usage line
    pub hint: String,
    /// tracing filter directive
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            glyph: DEFAULT_GLYPH,
            hint: DEFAULT_HINT.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load `~/.glyphwalk/config.toml`; a missing file means defaults
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.glyph.width() != Some(1) {
            return Err(ConfigError::InvalidGlyph(self.glyph));
        }
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> Option<PathBuf> {
        app_dir().map(|dir| dir.join("config.toml"))
    }
}

/// `~/.glyphwalk`, if a home directory is known
pub fn app_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(APP_DIR))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}
