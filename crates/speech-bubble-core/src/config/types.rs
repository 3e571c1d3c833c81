//! Sub-configuration structs with defaults matching the bundled tool.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Location of the bundled overlay asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding the assets (relative paths resolve against the
    /// working directory)
    pub dir: PathBuf,

    /// File name of the speech bubble graphic inside `dir`
    pub overlay: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
            overlay: "speech_bubble.png".to_string(),
        }
    }
}

/// Resampling filter used when stretching the overlay to the base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    /// Nearest neighbor (fastest, blocky).
    Nearest,
    /// Bilinear interpolation.
    Bilinear,
    /// Catmull-Rom cubic interpolation.
    CatmullRom,
    /// Gaussian interpolation.
    Gaussian,
    /// Lanczos with window 3 (slowest, sharpest).
    #[default]
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Nearest => image::imageops::FilterType::Nearest,
            ResampleFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResampleFilter::CatmullRom => image::imageops::FilterType::CatmullRom,
            ResampleFilter::Gaussian => image::imageops::FilterType::Gaussian,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Compositor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Filter used to resize the overlay
    pub filter: ResampleFilter,

    /// RGB background used when flattening for formats without alpha
    pub background: [u8; 3],
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            filter: ResampleFilter::Lanczos3,
            background: [255, 255, 255],
        }
    }
}

/// Accepted input and output extensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatsConfig {
    /// Dot-prefixed, case-sensitive extensions
    pub supported: Vec<String>,
}

impl Default for FormatsConfig {
    fn default() -> Self {
        Self {
            supported: crate::pipeline::format::SUPPORTED_FORMATS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
