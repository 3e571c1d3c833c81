//! speech-bubble CLI - put a speech bubble on any image.
//!
//! # Usage
//!
//! ```bash
//! # Bubble on top
//! speech-bubble cat.jpg cat_talking.png
//!
//! # Mirrored bubble on the left, written as JPEG
//! speech-bubble cat.jpg out/cat.jpg --mirror --orientation 2
//! ```

use clap::Parser;

mod cli;
mod logging;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let config = cli::load_config(&args)?;
    logging::init_from_config(&config, args.verbose, args.json_logs);

    tracing::debug!("speech-bubble v{}", speech_bubble_core::VERSION);

    cli::execute(&args, &config)?;
    Ok(())
}
