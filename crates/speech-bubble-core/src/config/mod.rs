//! Configuration management for speech-bubble.
//!
//! Configuration is loaded from the platform config directory with defaults
//! that reproduce the stock tool (asset in `./assets`, white background).

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overlay asset location
    pub assets: AssetsConfig,

    /// Resize and flatten settings
    pub compositor: CompositorConfig,

    /// Accepted file extensions
    pub formats: FormatsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.speech-bubble.speech-bubble/config.toml
    /// - Linux: ~/.config/speech-bubble/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\speech-bubble\config\config.toml
    ///
    /// Falls back to ~/.speech-bubble/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "speech-bubble", "speech-bubble")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".speech-bubble").join("config.toml")
            })
    }

    /// Get the resolved assets directory (with ~ expansion).
    pub fn assets_dir(&self) -> PathBuf {
        let path_str = self.assets.dir.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Full path of the overlay asset.
    pub fn overlay_path(&self) -> PathBuf {
        self.assets_dir().join(&self.assets.overlay)
    }

    /// Background color for flattening.
    pub fn background(&self) -> image::Rgb<u8> {
        image::Rgb(self.compositor.background)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
