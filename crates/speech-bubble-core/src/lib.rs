//! Speech Bubble Core - put a speech bubble on any image.
//!
//! The bundled speech bubble graphic is stretched over the input image,
//! optionally mirrored and turned, and subtracted from it channel by channel
//! with 8-bit wraparound. Where the bubble is opaque the result's alpha drops
//! to zero, punching the bubble shape out of the picture.
//!
//! # Architecture
//!
//! ```text
//! Validate → Decode (+ EXIF orientation) → Resize → Mirror/Rotate → Subtract → Flatten? → Write
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use speech_bubble_core::{BubbleProcessor, Config, Orientation, TransformSpec};
//! use std::path::Path;
//!
//! fn main() -> speech_bubble_core::Result<()> {
//!     let config = Config::load()?;
//!     let processor = BubbleProcessor::new(&config);
//!     let spec = TransformSpec::new(false, Orientation::Left);
//!     let report = processor.process(Path::new("cat.jpg"), Path::new("out/cat.png"), &spec)?;
//!     println!("Saved {}", report.output_path.display());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{BubbleError, ConfigError, PipelineError, PipelineResult, Result};
pub use pipeline::BubbleProcessor;
pub use types::{Orientation, ProcessedImage, Stage, StageTimings, TransformSpec};

use std::path::Path;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Put the speech bubble on `image_path` and save it to `output_path` using
/// the default configuration.
///
/// `orientation` must be 1, 2, 3 or 4.
pub fn process(
    image_path: &Path,
    output_path: &Path,
    mirror: bool,
    orientation: u8,
) -> Result<ProcessedImage> {
    let spec = TransformSpec::from_raw(mirror, orientation)?;
    BubbleProcessor::new(&Config::default()).process(image_path, output_path, &spec)
}
