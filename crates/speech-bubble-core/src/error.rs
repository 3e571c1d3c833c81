//! Error types for the speech-bubble pipeline.
//!
//! Errors are organized by stage so that messages name the offending path or
//! extension directly.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for speech-bubble operations.
#[derive(Error, Debug)]
pub enum BubbleError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Orientation outside of 1..=4
    #[error("Invalid orientation {0}: expected 1, 2, 3 or 4")]
    InvalidOrientation(u8),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Extension not in the allowlist
    #[error("Unsupported file extension {extension:?} for {path}. Only {supported:?} are supported")]
    UnsupportedFormat {
        path: PathBuf,
        extension: String,
        supported: Vec<String>,
    },

    /// Input is missing or not a regular file
    #[error("Image file {0} not found")]
    FileNotFound(PathBuf),

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Image encoding failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Directory creation, write or path resolution failed
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for speech-bubble results.
pub type Result<T> = std::result::Result<T, BubbleError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
