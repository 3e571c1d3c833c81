//! Image processing pipeline components.
//!
//! This module contains all the stages of the speech-bubble pipeline:
//! - **format**: Extension allowlist and per-format alpha support
//! - **decode**: Load images into RGBA buffers
//! - **metadata**: EXIF orientation lookup and normalization
//! - **transform**: Mirror and quarter-turn the overlay
//! - **composite**: Resize, subtract with wraparound, flatten
//! - **encode**: Write the result, creating directories as needed
//! - **processor**: Orchestrates the full pipeline

pub mod composite;
pub mod decode;
pub mod encode;
pub mod format;
pub mod metadata;
pub mod processor;
pub mod transform;

// Re-exports for convenient access
pub use composite::{flatten, resize_overlay, subtract_modulo, CompositeImage, Compositor};
pub use decode::ImageDecoder;
pub use encode::ImageEncoder;
pub use format::{check_format, PathPair, SupportedFormat, SUPPORTED_FORMATS};
pub use metadata::{normalize_orientation, read_orientation, ExifOrientation};
pub use processor::BubbleProcessor;
pub use transform::apply_transform;
