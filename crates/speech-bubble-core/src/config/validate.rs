//! Configuration validation.

use crate::error::ConfigError;
use crate::pipeline::format::encodable_format;

use super::Config;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

impl Config {
    /// Validate configuration values are usable.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.assets.overlay.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "assets.overlay must not be empty".into(),
            ));
        }
        if self.formats.supported.is_empty() {
            return Err(ConfigError::ValidationError(
                "formats.supported must list at least one extension".into(),
            ));
        }
        for ext in &self.formats.supported {
            let Some(bare) = ext.strip_prefix('.') else {
                return Err(ConfigError::ValidationError(format!(
                    "formats.supported entry {ext:?} must start with a dot"
                )));
            };
            if encodable_format(bare).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "formats.supported entry {ext:?} has no enabled codec"
                )));
            }
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {LOG_LEVELS:?}"
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of {LOG_FORMATS:?}"
            )));
        }
        Ok(())
    }
}
