//! Print sinks that receive encoded bitmaps.
//!
//! A sink mirrors a receipt-printer job: images are queued with an
//! alignment, paper is fed, then the job is started.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use mono_bitmap::BitmapFile;

/// Horizontal placement of an image on the paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(s, true)
    }
}

/// Errors that can occur while handing a job to a sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Nothing queued to print")]
    EmptyJob,

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for a print job.
///
/// Alignment and feed are paper directives. Sinks without paper, such as
/// [`FileSink`], accept and ignore them.
pub trait PrintSink {
    /// Human-readable sink name (e.g. "file", "dry-run").
    fn name(&self) -> &str;

    /// Queue an encoded bitmap with the given alignment.
    fn add_image(&mut self, align: Alignment, bmp: &BitmapFile);

    /// Queue a paper feed of `lines` blank lines.
    fn feed_lines(&mut self, lines: u16);

    /// Run the queued job.
    fn start_print(&mut self) -> Result<(), SinkError>;
}

/// Writes each queued bitmap to disk.
///
/// If `output` is an existing directory, files are named
/// `mono_<YYYYmmdd_HHMMSS>.bmp` inside it; otherwise `output` is the file path.
/// Files hold the bitmap bytes only, so alignment and feed are dropped.
#[derive(Debug)]
pub struct FileSink {
    output: PathBuf,
    queued: Vec<Vec<u8>>,
}

impl FileSink {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            queued: Vec::new(),
        }
    }

    fn target_path(&self, index: usize, stamp: &str) -> PathBuf {
        let suffix = if index == 0 {
            String::new()
        } else {
            format!("_{index}")
        };
        if self.output.is_dir() {
            return self.output.join(format!("mono_{stamp}{suffix}.bmp"));
        }
        if index == 0 {
            return self.output.clone();
        }
        with_suffix(&self.output, &suffix)
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

impl PrintSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn add_image(&mut self, _align: Alignment, bmp: &BitmapFile) {
        self.queued.push(bmp.as_bytes().to_vec());
    }

    fn feed_lines(&mut self, _lines: u16) {}

    fn start_print(&mut self) -> Result<(), SinkError> {
        if self.queued.is_empty() {
            return Err(SinkError::EmptyJob);
        }

        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        for (index, bytes) in self.queued.iter().enumerate() {
            let path = self.target_path(index, &stamp);
            std::fs::write(&path, bytes).map_err(|source| SinkError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote bitmap");
        }

        self.queued.clear();
        Ok(())
    }
}

/// Logs the job instead of printing it.
#[derive(Debug, Default)]
pub struct DryRunSink {
    images: Vec<(Alignment, usize)>,
    feed: u16,
}

impl DryRunSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrintSink for DryRunSink {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn add_image(&mut self, align: Alignment, bmp: &BitmapFile) {
        self.images.push((align, bmp.len()));
    }

    fn feed_lines(&mut self, lines: u16) {
        self.feed = self.feed.saturating_add(lines);
    }

    fn start_print(&mut self) -> Result<(), SinkError> {
        if self.images.is_empty() {
            return Err(SinkError::EmptyJob);
        }
        for (align, bytes) in &self.images {
            tracing::info!(?align, bytes, "[dry-run] Would print image");
        }
        tracing::info!(feed_lines = self.feed, "[dry-run] Would feed paper");
        self.images.clear();
        self.feed = 0;
        Ok(())
    }
}
