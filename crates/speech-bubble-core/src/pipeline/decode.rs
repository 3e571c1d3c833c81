//! Image decoding into fully-realized RGBA buffers.

use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use crate::error::PipelineError;

use super::metadata::{normalize_orientation, read_orientation};

/// Loads images from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl ImageDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode `path` into RGBA8 without looking at EXIF orientation.
    ///
    /// Used for the overlay asset, whose pixel layout is authoritative.
    pub fn load(&self, path: &Path) -> Result<RgbaImage, PipelineError> {
        let bytes = Self::read(path)?;
        Self::decode_bytes(&bytes, path)
    }

    /// Decode `path` and physically apply its EXIF orientation.
    ///
    /// The tag is consumed here; the returned buffer carries no metadata.
    pub fn load_oriented(&self, path: &Path) -> Result<RgbaImage, PipelineError> {
        let bytes = Self::read(path)?;
        let image = Self::decode_bytes(&bytes, path)?;
        let orientation = read_orientation(&bytes);
        tracing::trace!("EXIF orientation for {:?}: {:?}", path, orientation);
        Ok(normalize_orientation(image, orientation))
    }

    fn read(path: &Path) -> Result<Vec<u8>, PipelineError> {
        if !path.is_file() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }
        std::fs::read(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Sniff the format from content, falling back to the extension.
    fn decode_bytes(bytes: &[u8], path: &Path) -> Result<RgbaImage, PipelineError> {
        let mut reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        if reader.format().is_none() {
            if let Ok(format) = ImageFormat::from_path(path) {
                reader.set_format(format);
            }
        }

        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(image.into_rgba8())
    }
}
