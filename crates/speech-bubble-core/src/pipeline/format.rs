//! Extension allowlist checks, run before any file is touched.

use image::ImageFormat;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Extensions known to work for both input and output.
pub const SUPPORTED_FORMATS: [&str; 7] = [
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".webp", ".tiff",
];

/// A file format recognized from a path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedFormat {
    format: ImageFormat,
}

impl SupportedFormat {
    /// The codec's format identifier.
    pub fn image_format(self) -> ImageFormat {
        self.format
    }

    /// Whether the format can store an alpha channel.
    ///
    /// JPEG and BMP results are flattened onto a solid background first.
    pub fn supports_alpha(self) -> bool {
        !matches!(self.format, ImageFormat::Jpeg | ImageFormat::Bmp)
    }

    /// Lowercase name used in reports.
    pub fn name(self) -> &'static str {
        match self.format {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::WebP => "webp",
            ImageFormat::Tiff => "tiff",
            _ => "unknown",
        }
    }
}

/// Map a bare extension to a format this build can both decode and encode.
///
/// Extensions `image` recognizes without an enabled codec (`tga`, `ico`)
/// return `None`.
pub fn encodable_format(extension: &str) -> Option<ImageFormat> {
    match ImageFormat::from_extension(extension)? {
        format @ (ImageFormat::Png
        | ImageFormat::Jpeg
        | ImageFormat::Gif
        | ImageFormat::Bmp
        | ImageFormat::WebP
        | ImageFormat::Tiff) => Some(format),
        _ => None,
    }
}

/// The dot-prefixed extension of `path`, or an empty string.
///
/// Mirrors a path suffix: `photo.tar.png` gives `.png`, `.hidden` gives "".
pub fn path_suffix(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}

/// Check that `path` carries an extension from `supported`.
///
/// Matching is case-sensitive: `.PNG` is rejected when only `.png` is listed.
pub fn check_format<S: AsRef<str>>(
    path: &Path,
    supported: &[S],
) -> Result<SupportedFormat, PipelineError> {
    let suffix = path_suffix(path);
    let unsupported = || PipelineError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: suffix.clone(),
        supported: supported.iter().map(|s| s.as_ref().to_string()).collect(),
    };

    if !supported.iter().any(|s| s.as_ref() == suffix) {
        return Err(unsupported());
    }

    let format = suffix
        .strip_prefix('.')
        .and_then(encodable_format)
        .ok_or_else(unsupported)?;
    Ok(SupportedFormat { format })
}

/// Input and output paths whose extensions have both been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPair {
    input: PathBuf,
    input_format: SupportedFormat,
    output: PathBuf,
    output_format: SupportedFormat,
}

impl PathPair {
    /// Validate both extensions against `supported`.
    ///
    /// The check is purely lexical; neither path has to exist yet.
    pub fn new<S: AsRef<str>>(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        supported: &[S],
    ) -> Result<Self, PipelineError> {
        let input = input.into();
        let output = output.into();
        let input_format = check_format(&input, supported)?;
        let output_format = check_format(&output, supported)?;
        Ok(Self {
            input,
            input_format,
            output,
            output_format,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn input_format(&self) -> SupportedFormat {
        self.input_format
    }

    pub fn output_format(&self) -> SupportedFormat {
        self.output_format
    }
}
