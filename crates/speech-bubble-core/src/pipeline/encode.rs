//! Writing the composited result to disk.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

use super::composite::CompositeImage;
use super::format::SupportedFormat;

/// Writes results in the format implied by the output extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageEncoder;

impl ImageEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode `image` to `path`, creating missing parent directories and
    /// overwriting any existing file.
    ///
    /// The image is encoded in memory first, so a failed encode leaves
    /// `path` untouched.
    ///
    /// Returns the canonical absolute path of the written file.
    pub fn write(
        &self,
        image: CompositeImage,
        path: &Path,
        format: SupportedFormat,
    ) -> Result<PathBuf, PipelineError> {
        let mut buffer = Cursor::new(Vec::new());
        image
            .into_dynamic()
            .write_to(&mut buffer, format.image_format())
            .map_err(|e| PipelineError::Encode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Self::ensure_parent_dir(path)?;
        std::fs::write(path, buffer.into_inner()).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        std::fs::canonicalize(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn ensure_parent_dir(path: &Path) -> Result<(), PipelineError> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                tracing::debug!("Creating output directory {:?}", parent);
                std::fs::create_dir_all(parent).map_err(|source| PipelineError::Io {
                    path: parent.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }
}
