//! photo-print CLI - convert a photo into a 1-bit BMP for a thermal printer.
//!
//! Settings come from the environment (optionally a `.env` file) and can be
//! overridden per run with command-line flags.

mod config;
mod sink;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use sink::{Alignment, DryRunSink, FileSink, PrintSink};

#[derive(Parser)]
#[command(
    name = "photo-print",
    about = "Convert a photo into a monochrome bitmap for printing"
)]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Output width in pixels
    #[arg(short, long)]
    width: Option<u32>,
    /// Output file or directory
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Image alignment on the paper
    #[arg(short, long, value_enum)]
    align: Option<Alignment>,
    /// Blank lines to feed after the image
    #[arg(long)]
    feed_lines: Option<u16>,
    /// Use a flat threshold instead of Floyd-Steinberg dithering
    #[arg(long)]
    no_dither: bool,
    /// Rotate the image 180 degrees
    #[arg(short, long)]
    rotate: bool,
    /// Log the job instead of writing it
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(width) = self.width {
            config.target_width = width;
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(align) = self.align {
            config.align = align;
        }
        if let Some(lines) = self.feed_lines {
            config.feed_lines = lines;
        }
        if self.no_dither {
            config.dither = false;
        }
        if self.rotate {
            config.rotate_print = true;
        }
        if self.dry_run {
            config.dry_run_mode = true;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    config::load_dotenv();
    let args = Args::parse();
    let config = args.apply(AppConfig::load());

    let mut sink: Box<dyn PrintSink> = if config.dry_run_mode {
        Box::new(DryRunSink::new())
    } else {
        Box::new(FileSink::new(&config.output_path))
    };

    print_photo(&args.input, &config, sink.as_mut())
}

/// Decode, convert and hand one photo to the sink.
fn print_photo(
    input: &Path,
    config: &AppConfig,
    sink: &mut dyn PrintSink,
) -> anyhow::Result<()> {
    let image =
        image::open(input).with_context(|| format!("failed to decode {}", input.display()))?;
    tracing::info!(
        path = %input.display(),
        width = image.width(),
        height = image.height(),
        "Loaded image"
    );

    let bmp = mono_bitmap::convert(&image, &config.convert_options())
        .with_context(|| format!("failed to convert {}", input.display()))?;

    sink.add_image(config.align, &bmp);
    sink.feed_lines(config.feed_lines);
    sink.start_print()
        .with_context(|| format!("{} sink failed", sink.name()))?;

    tracing::info!(sink = sink.name(), bytes = bmp.len(), "Print job finished");
    Ok(())
}
