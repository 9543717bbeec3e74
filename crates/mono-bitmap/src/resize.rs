//! Image resizing for thermal printer output.
//!
//! Provides an aspect-ratio-preserving resize to the paper width using Lanczos3 filtering.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::{MonoBitmapError, Result, ensure_dimensions};

/// Resize an image to a target width while maintaining aspect ratio.
///
/// The new height is `round(height * width / orig_width)`. Uses Lanczos3
/// filtering; returns an exact copy if the image already matches the target width.
pub fn resize_to_width(img: &RgbaImage, width: u32) -> Result<RgbaImage> {
    let (orig_w, orig_h) = img.dimensions();
    ensure_dimensions("resize", orig_w, orig_h)?;
    if width == 0 {
        return Err(MonoBitmapError::InvalidImage(
            "resize: target width must be positive".into(),
        ));
    }

    if orig_w == width {
        debug!(width, "Image already at target width, skipping resize");
        return Ok(img.clone());
    }

    let ratio = f64::from(width) / f64::from(orig_w);
    let new_height = (f64::from(orig_h) * ratio).round() as u32;
    if new_height == 0 {
        return Err(MonoBitmapError::InvalidImage(format!(
            "resize: {orig_w}x{orig_h} scaled to width {width} rounds to zero height"
        )));
    }

    debug!(
        orig_w,
        orig_h,
        new_width = width,
        new_height,
        "Resizing image to target width"
    );

    Ok(imageops::resize(img, width, new_height, FilterType::Lanczos3))
}
