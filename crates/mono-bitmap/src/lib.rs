//! Monochrome bitmap pipeline for thermal printer output.
//!
//! Normalizes a decoded color image, resizes it to the paper width,
//! dithers it to black-and-white (Floyd-Steinberg) and encodes the result
//! as a 1-bit, bottom-up Windows bitmap.

pub mod bmp;
pub mod dither;
pub mod normalize;
pub mod options;
pub mod pipeline;
pub mod resize;
pub mod rotate;

// Re-exports for convenience
pub use bmp::{BitmapFile, encode_bmp};
pub use dither::{DitherMode, GrayscaleField, MonochromeGrid, dither};
pub use normalize::{normalize, rgba_from_argb};
pub use options::ConvertOptions;
pub use pipeline::{convert, to_monochrome_bmp};
pub use resize::resize_to_width;

/// Default output width in pixels for the target printer.
pub const DEFAULT_TARGET_WIDTH: u32 = 320;

/// Errors that can occur while converting an image.
#[derive(Debug, thiserror::Error)]
pub enum MonoBitmapError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

/// Result type alias for mono-bitmap operations.
pub type Result<T> = std::result::Result<T, MonoBitmapError>;

/// Reject zero-sized geometry at a stage entry.
pub(crate) fn ensure_dimensions(stage: &str, width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(MonoBitmapError::InvalidImage(format!(
            "{stage}: image must be non-empty, got {width}x{height}"
        )));
    }
    Ok(())
}
