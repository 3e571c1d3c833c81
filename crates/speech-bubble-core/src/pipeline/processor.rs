//! Pipeline orchestration - wires together all processing stages.
//!
//! ```text
//! Unvalidated → Validated → Loaded → Composited → Written
//!       └────────────┴──────────┴──────────┴──────→ Failed
//! ```
//!
//! Nothing touches the output path until every earlier stage succeeded.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::types::{ProcessedImage, Stage, StageTimings, TransformSpec};

use super::composite::Compositor;
use super::decode::ImageDecoder;
use super::encode::ImageEncoder;
use super::format::PathPair;

/// Puts the speech bubble on images.
///
/// Holds only immutable settings, so one processor can serve any number of
/// independent runs.
#[derive(Debug, Clone)]
pub struct BubbleProcessor {
    supported_formats: Vec<String>,
    overlay_path: PathBuf,
    decoder: ImageDecoder,
    compositor: Compositor,
    encoder: ImageEncoder,
}

impl BubbleProcessor {
    /// Create a new processor with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            supported_formats: config.formats.supported.clone(),
            overlay_path: config.overlay_path(),
            decoder: ImageDecoder::new(),
            compositor: Compositor::new(config.compositor.filter, config.background()),
            encoder: ImageEncoder::new(),
        }
    }

    /// Location the overlay asset is read from.
    pub fn overlay_path(&self) -> &Path {
        &self.overlay_path
    }

    /// Validate both paths, then run the rest of the pipeline.
    pub fn process(
        &self,
        image_path: &Path,
        output_path: &Path,
        spec: &TransformSpec,
    ) -> Result<ProcessedImage> {
        let start = Instant::now();
        let pair = PathPair::new(image_path, output_path, &self.supported_formats)
            .inspect_err(|e| Self::log_failure(Stage::Unvalidated, e))?;
        self.run(&pair, spec, start)
    }

    /// Run the pipeline for an already-validated path pair.
    pub fn process_pair(&self, pair: &PathPair, spec: &TransformSpec) -> Result<ProcessedImage> {
        self.run(pair, spec, Instant::now())
    }

    fn run(&self, pair: &PathPair, spec: &TransformSpec, start: Instant) -> Result<ProcessedImage> {
        let mut stage = Stage::Unvalidated;
        let result = self.run_stages(pair, spec, start, &mut stage);
        if let Err(e) = &result {
            Self::log_failure(stage, e);
        }
        result.map_err(Into::into)
    }

    fn run_stages(
        &self,
        pair: &PathPair,
        spec: &TransformSpec,
        start: Instant,
        stage: &mut Stage,
    ) -> std::result::Result<ProcessedImage, PipelineError> {
        let mut timings = StageTimings::default();
        tracing::debug!("Processing: {:?} -> {:?}", pair.input(), pair.output());

        // Validate
        if !pair.input().is_file() {
            return Err(PipelineError::FileNotFound(pair.input().to_path_buf()));
        }
        timings.validate_ms = start.elapsed().as_millis() as u64;
        *stage = Stage::Validated;
        tracing::trace!("  Validate: {}ms", timings.validate_ms);

        // Load
        let load_start = Instant::now();
        let base = self.decoder.load_oriented(pair.input())?;
        let overlay = self.decoder.load(&self.overlay_path)?;
        timings.load_ms = load_start.elapsed().as_millis() as u64;
        *stage = Stage::Loaded;
        tracing::trace!(
            "  Load: {}ms (base {}x{}, overlay {}x{})",
            timings.load_ms,
            base.width(),
            base.height(),
            overlay.width(),
            overlay.height()
        );

        // Composite
        let composite_start = Instant::now();
        let composite = self
            .compositor
            .composite(&base, &overlay, spec, pair.output_format());
        timings.composite_ms = composite_start.elapsed().as_millis() as u64;
        *stage = Stage::Composited;
        tracing::trace!("  Composite: {}ms", timings.composite_ms);

        let (width, height) = composite.dimensions();
        let flattened = composite.is_flattened();

        // Write
        let write_start = Instant::now();
        let output_path = self
            .encoder
            .write(composite, pair.output(), pair.output_format())?;
        timings.write_ms = write_start.elapsed().as_millis() as u64;
        *stage = Stage::Written;
        tracing::trace!("  Write: {}ms", timings.write_ms);

        tracing::info!("Image saved at {}", output_path.display());
        tracing::debug!(
            "Processed {:?} in {}ms ({}x{})",
            pair.input(),
            timings.total_ms(),
            width,
            height
        );

        Ok(ProcessedImage {
            output_path,
            width,
            height,
            format: pair.output_format().name().to_string(),
            flattened,
            transform: *spec,
            timings,
        })
    }

    fn log_failure(stage: Stage, error: &PipelineError) {
        tracing::debug!("Pipeline {} after {} stage: {}", Stage::Failed, stage, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BubbleError;
    use crate::types::Orientation;
    use image::{Rgb, Rgba, RgbaImage};
    use tempfile::TempDir;

    /// Temp workspace with a 50x50 opaque blue overlay asset and a 100x100
    /// opaque red input.
    struct Fixture {
        dir: TempDir,
        processor: BubbleProcessor,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let assets = dir.path().join("assets");
            std::fs::create_dir(&assets).unwrap();
            RgbaImage::from_pixel(50, 50, Rgba([0, 0, 255, 255]))
                .save(assets.join("speech_bubble.png"))
                .unwrap();
            RgbaImage::from_pixel(100, 100, Rgba([255, 0, 0, 255]))
                .save(dir.path().join("red.png"))
                .unwrap();

            let mut config = Config::default();
            config.assets.dir = assets;
            let processor = BubbleProcessor::new(&config);
            Self { dir, processor }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }
    }

    #[test]
    fn test_red_base_blue_overlay_png() {
        let fx = Fixture::new();
        let out = fx.path("out/result.png");
        let report = fx
            .processor
            .process(&fx.path("red.png"), &out, &TransformSpec::default())
            .unwrap();

        assert_eq!((report.width, report.height), (100, 100));
        assert!(!report.flattened);
        assert_eq!(report.format, "png");
        assert!(report.output_path.is_absolute());

        let img = image::open(&out).unwrap().to_rgba8();
        assert!(img.pixels().all(|p| *p == Rgba([255, 0, 1, 0])));
    }

    #[test]
    fn test_red_base_blue_overlay_jpg_is_white() {
        let fx = Fixture::new();
        let out = fx.path("result.jpg");
        let report = fx
            .processor
            .process(&fx.path("red.png"), &out, &TransformSpec::default())
            .unwrap();
        assert!(report.flattened);

        let img = image::open(&out).unwrap();
        assert!(!img.color().has_alpha());
        let rgb = img.to_rgb8();
        // JPEG is lossy; a flat white image survives within a step or two
        assert!(rgb.pixels().all(|p| p.0.iter().all(|&c| c >= 250)));
    }

    #[test]
    fn test_bmp_is_flattened() {
        let fx = Fixture::new();
        let out = fx.path("result.bmp");
        let report = fx
            .processor
            .process(&fx.path("red.png"), &out, &TransformSpec::default())
            .unwrap();
        assert!(report.flattened);

        let img = image::open(&out).unwrap();
        assert!(!img.color().has_alpha());
        assert!(img.to_rgb8().pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let fx = Fixture::new();
        let out = fx.path("out/never.png");
        let err = fx
            .processor
            .process(&fx.path("nope.png"), &out, &TransformSpec::default())
            .unwrap_err();

        assert!(matches!(
            err,
            BubbleError::Pipeline(PipelineError::FileNotFound(_))
        ));
        assert!(!out.exists());
        assert!(!fx.path("out").exists());
    }

    #[test]
    fn test_failed_encode_leaves_no_file() {
        let fx = Fixture::new();
        // JPEG cannot encode anything wider than 65535 pixels
        let wide = fx.path("wide.png");
        RgbaImage::from_pixel(70_000, 1, Rgba([9, 9, 9, 255]))
            .save(&wide)
            .unwrap();

        let out = fx.path("fresh/out.jpg");
        let err = fx
            .processor
            .process(&wide, &out, &TransformSpec::default())
            .unwrap_err();
        assert!(matches!(
            err,
            BubbleError::Pipeline(PipelineError::Encode { .. })
        ));
        assert!(!out.exists());
        assert!(!fx.path("fresh").exists());
    }

    #[test]
    fn test_failed_encode_keeps_existing_output() {
        let fx = Fixture::new();
        let wide = fx.path("wide.png");
        RgbaImage::from_pixel(70_000, 1, Rgba([9, 9, 9, 255]))
            .save(&wide)
            .unwrap();

        let out = fx.path("existing.jpg");
        std::fs::write(&out, b"previous result").unwrap();
        assert!(fx
            .processor
            .process(&wide, &out, &TransformSpec::default())
            .is_err());
        assert_eq!(std::fs::read(&out).unwrap(), b"previous result");
    }

    #[test]
    fn test_bad_output_extension_rejected_before_input_check() {
        let fx = Fixture::new();
        let err = fx
            .processor
            .process(&fx.path("nope.png"), &fx.path("out.txt"), &TransformSpec::default())
            .unwrap_err();

        match err {
            BubbleError::Pipeline(PipelineError::UnsupportedFormat { extension, .. }) => {
                assert_eq!(extension, ".txt")
            }
            other => panic!("Expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_input_extension_rejected() {
        let fx = Fixture::new();
        std::fs::copy(fx.path("red.png"), fx.path("red.svg")).unwrap();
        let err = fx
            .processor
            .process(&fx.path("red.svg"), &fx.path("out.png"), &TransformSpec::default())
            .unwrap_err();
        assert!(matches!(
            err,
            BubbleError::Pipeline(PipelineError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_missing_overlay_asset() {
        let fx = Fixture::new();
        let mut config = Config::default();
        config.assets.dir = fx.path("elsewhere");
        let processor = BubbleProcessor::new(&config);

        let out = fx.path("out.png");
        let err = processor
            .process(&fx.path("red.png"), &out, &TransformSpec::default())
            .unwrap_err();
        match err {
            BubbleError::Pipeline(PipelineError::FileNotFound(path)) => {
                assert_eq!(path, processor.overlay_path())
            }
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_corrupt_input_is_decode_error() {
        let fx = Fixture::new();
        std::fs::write(fx.path("broken.png"), b"not a png").unwrap();
        let out = fx.path("out.png");
        let err = fx
            .processor
            .process(&fx.path("broken.png"), &out, &TransformSpec::default())
            .unwrap_err();
        assert!(matches!(
            err,
            BubbleError::Pipeline(PipelineError::Decode { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_quarter_turn_report_dimensions() {
        let fx = Fixture::new();
        RgbaImage::from_pixel(60, 30, Rgba([9, 9, 9, 255]))
            .save(fx.path("wide.png"))
            .unwrap();
        let spec = TransformSpec::new(true, Orientation::Right);
        let report = fx
            .processor
            .process(&fx.path("wide.png"), &fx.path("out.webp"), &spec)
            .unwrap();
        assert_eq!((report.width, report.height), (30, 30));
        assert_eq!(report.transform, spec);
    }

    #[test]
    fn test_process_pair() {
        let fx = Fixture::new();
        let pair = PathPair::new(
            fx.path("red.png"),
            fx.path("pair.gif"),
            &fx.processor.supported_formats,
        )
        .unwrap();
        let report = fx
            .processor
            .process_pair(&pair, &TransformSpec::default())
            .unwrap();
        assert_eq!(report.format, "gif");
        assert!(fx.path("pair.gif").is_file());
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let fx = Fixture::new();
        let spec = TransformSpec::new(true, Orientation::Bottom);
        let a = fx.path("a.png");
        let b = fx.path("b.png");
        fx.processor.process(&fx.path("red.png"), &a, &spec).unwrap();
        fx.processor.process(&fx.path("red.png"), &b, &spec).unwrap();
        assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
    }
}
