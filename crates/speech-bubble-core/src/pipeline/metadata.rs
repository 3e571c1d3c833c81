//! EXIF orientation lookup and pixel normalization.
//!
//! Cameras often store pixels in sensor order and record the intended display
//! orientation as an EXIF tag. The input image is physically rotated/flipped
//! once after decode so nothing downstream has to look at the tag again.

use exif::{In, Reader, Tag, Value};
use image::{imageops, RgbaImage};
use std::io::Cursor;

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ExifOrientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (mirror along the main diagonal).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (mirror along the anti-diagonal).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl ExifOrientation {
    /// Returns true if correcting this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            ExifOrientation::Transpose
                | ExifOrientation::Rotate90CW
                | ExifOrientation::Transverse
                | ExifOrientation::Rotate270CW
        )
    }
}

impl From<u32> for ExifOrientation {
    fn from(value: u32) -> Self {
        match value {
            2 => ExifOrientation::FlipHorizontal,
            3 => ExifOrientation::Rotate180,
            4 => ExifOrientation::FlipVertical,
            5 => ExifOrientation::Transpose,
            6 => ExifOrientation::Rotate90CW,
            7 => ExifOrientation::Transverse,
            8 => ExifOrientation::Rotate270CW,
            _ => ExifOrientation::Normal,
        }
    }
}

/// Read the orientation tag from an encoded image.
///
/// Returns `ExifOrientation::Normal` if the container has no EXIF block or
/// the tag is absent. This is intentionally lenient: a broken EXIF block
/// never fails the decode.
pub fn read_orientation(bytes: &[u8]) -> ExifOrientation {
    let mut cursor = Cursor::new(bytes);
    let exif = match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return ExifOrientation::Normal,
        Err(e) => {
            tracing::warn!("Ignoring unreadable EXIF data: {}", e);
            return ExifOrientation::Normal;
        }
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|f| match &f.value {
            Value::Short(v) => v.first().map(|&x| x as u32),
            Value::Long(v) => v.first().copied(),
            _ => f.value.get_uint(0),
        })
        .map(ExifOrientation::from)
        .unwrap_or_default()
}

/// Physically apply an EXIF orientation to a pixel buffer.
///
/// The returned image is what a viewer honoring the tag would display.
pub fn normalize_orientation(img: RgbaImage, orientation: ExifOrientation) -> RgbaImage {
    match orientation {
        ExifOrientation::Normal => img,
        ExifOrientation::FlipHorizontal => imageops::flip_horizontal(&img),
        ExifOrientation::Rotate180 => imageops::rotate180(&img),
        ExifOrientation::FlipVertical => imageops::flip_vertical(&img),
        ExifOrientation::Transpose => imageops::flip_horizontal(&imageops::rotate90(&img)),
        ExifOrientation::Rotate90CW => imageops::rotate90(&img),
        ExifOrientation::Transverse => imageops::flip_horizontal(&imageops::rotate270(&img)),
        ExifOrientation::Rotate270CW => imageops::rotate270(&img),
    }
}
