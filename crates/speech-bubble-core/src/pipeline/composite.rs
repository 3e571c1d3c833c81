//! Overlay compositing: resize, transform, subtract with wraparound, flatten.
//!
//! The blend is a per-channel `base - overlay` in wrapping 8-bit arithmetic.
//! Where the bubble is opaque the alpha channel wraps to zero, which is what
//! punches the bubble shape out of the picture. Clamped subtraction would
//! look completely different, so the arithmetic here must stay modular.

use image::{imageops, DynamicImage, Rgb, RgbImage, RgbaImage};

use crate::config::ResampleFilter;
use crate::types::TransformSpec;

use super::format::SupportedFormat;
use super::transform::apply_transform;

/// Result of compositing, shaped for the target format.
#[derive(Debug, Clone, PartialEq)]
pub enum CompositeImage {
    /// Kept as RGBA for formats with an alpha channel.
    Rgba(RgbaImage),
    /// Flattened onto the background for formats without one.
    Rgb(RgbImage),
}

impl CompositeImage {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            CompositeImage::Rgba(img) => img.dimensions(),
            CompositeImage::Rgb(img) => img.dimensions(),
        }
    }

    pub fn is_flattened(&self) -> bool {
        matches!(self, CompositeImage::Rgb(_))
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            CompositeImage::Rgba(img) => DynamicImage::ImageRgba8(img),
            CompositeImage::Rgb(img) => DynamicImage::ImageRgb8(img),
        }
    }
}

/// Resize `overlay` to exactly `width` x `height`.
///
/// Aspect ratio is not preserved; the bubble stretches to cover the base.
pub fn resize_overlay(
    overlay: &RgbaImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> RgbaImage {
    if overlay.dimensions() == (width, height) {
        return overlay.clone();
    }
    imageops::resize(overlay, width, height, filter.to_image_filter())
}

/// Subtract `overlay` from `base` channel by channel, modulo 256.
///
/// Covers the intersection of both images anchored at the top-left; the
/// result has the smaller width and the smaller height.
pub fn subtract_modulo(base: &RgbaImage, overlay: &RgbaImage) -> RgbaImage {
    let width = base.width().min(overlay.width());
    let height = base.height().min(overlay.height());

    RgbaImage::from_fn(width, height, |x, y| {
        let a = base.get_pixel(x, y);
        let b = overlay.get_pixel(x, y);
        image::Rgba([
            a[0].wrapping_sub(b[0]),
            a[1].wrapping_sub(b[1]),
            a[2].wrapping_sub(b[2]),
            a[3].wrapping_sub(b[3]),
        ])
    })
}

/// Paste `img` onto an opaque `background`, using its alpha as the mask.
///
/// Alpha 0 yields the background exactly and alpha 255 the pixel's own color.
pub fn flatten(img: &RgbaImage, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let px = img.get_pixel(x, y);
        let alpha = px[3] as u32;
        let blend = |fg: u8, bg: u8| -> u8 {
            ((fg as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8
        };
        Rgb([
            blend(px[0], background[0]),
            blend(px[1], background[1]),
            blend(px[2], background[2]),
        ])
    })
}

/// Combines a base image with the speech bubble overlay.
#[derive(Debug, Clone)]
pub struct Compositor {
    filter: ResampleFilter,
    background: Rgb<u8>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(ResampleFilter::default(), Rgb([255, 255, 255]))
    }
}

impl Compositor {
    pub fn new(filter: ResampleFilter, background: Rgb<u8>) -> Self {
        Self { filter, background }
    }

    /// Run resize, transform, subtract and (if needed) flatten.
    ///
    /// `base` must already be in its display orientation.
    pub fn composite(
        &self,
        base: &RgbaImage,
        overlay: &RgbaImage,
        spec: &TransformSpec,
        target: SupportedFormat,
    ) -> CompositeImage {
        let (width, height) = base.dimensions();
        let resized = resize_overlay(overlay, width, height, self.filter);
        let transformed = apply_transform(resized, spec);
        if transformed.dimensions() != (width, height) {
            tracing::debug!(
                "Overlay is {}x{} after {} turn, compositing over {}x{} intersection",
                transformed.width(),
                transformed.height(),
                spec.orientation(),
                width.min(transformed.width()),
                height.min(transformed.height())
            );
        }

        let result = subtract_modulo(base, &transformed);

        if target.supports_alpha() {
            CompositeImage::Rgba(result)
        } else {
            tracing::debug!(
                "{} has no alpha channel, flattening onto {:?}",
                target.name(),
                self.background.0
            );
            CompositeImage::Rgb(flatten(&result, self.background))
        }
    }
}
