//! Command-line arguments and the single `speech-bubble` command.

use clap::Parser;
use speech_bubble_core::{BubbleProcessor, Config, ProcessedImage, TransformSpec};
use std::path::PathBuf;

/// Put a speech bubble on any image.
#[derive(Parser, Debug)]
#[command(name = "speech-bubble")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of an image you want to put speech bubble on
    #[arg(value_name = "IMAGE_FILE")]
    pub image_path: PathBuf,

    /// Path to the file where the result will be written to
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_path: PathBuf,

    /// Flips speech bubble horizontally
    #[arg(short, long, overrides_with = "no_mirror")]
    pub mirror: bool,

    /// Keep the speech bubble unflipped (default)
    #[arg(long, overrides_with = "mirror")]
    pub no_mirror: bool,

    /// Speech bubble orientation (1: on the top; 2: on the left; 3: on the bottom; 4: on the right)
    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(1..=4)
    )]
    pub orientation: u8,

    /// Directory holding speech_bubble.png (overrides the config file)
    #[arg(long, env = "SPEECH_BUBBLE_ASSETS_DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    pub json_logs: bool,

    /// Print the result report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Load the configuration for this invocation.
///
/// An explicit `--config` must load cleanly. A broken file at the default
/// location only produces a warning and falls back to defaults.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        // Logging isn't initialized yet, so use eprintln for config warnings.
        None => Config::load().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check {}.",
                Config::default_path().display()
            );
            Config::default()
        }),
    };

    if let Some(dir) = &cli.assets_dir {
        config.assets.dir = dir.clone();
    }
    Ok(config)
}

/// Run the pipeline for the parsed arguments.
pub fn execute(cli: &Cli, config: &Config) -> anyhow::Result<ProcessedImage> {
    let spec = TransformSpec::from_raw(cli.mirror, cli.orientation)?;
    tracing::debug!(
        "Overlay {:?}, mirror={}, orientation={}",
        config.overlay_path(),
        spec.mirror(),
        spec.orientation()
    );

    let processor = BubbleProcessor::new(config);
    let report = processor.process(&cli.image_path, &cli.output_path, &spec)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(report)
}
