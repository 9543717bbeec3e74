//! Source normalization into a directly readable RGBA8 buffer.

use std::borrow::Cow;

use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

use crate::{MonoBitmapError, Result, ensure_dimensions};

/// Return the image as an RGBA8 buffer, copying only if necessary.
///
/// An image already stored as 8-bit RGBA is borrowed as-is. Any other
/// representation (grayscale, RGB, 16-bit, float) is converted into a
/// freshly allocated RGBA8 copy.
pub fn normalize(img: &DynamicImage) -> Result<Cow<'_, RgbaImage>> {
    let (width, height) = (img.width(), img.height());
    ensure_dimensions("normalize", width, height)?;

    match img {
        DynamicImage::ImageRgba8(buf) => {
            debug!(width, height, "Source already RGBA8, borrowing buffer");
            Ok(Cow::Borrowed(buf))
        }
        other => {
            debug!(
                width,
                height,
                color = ?other.color(),
                "Converting source to RGBA8"
            );
            Ok(Cow::Owned(other.to_rgba8()))
        }
    }
}

/// Build an RGBA8 image from packed `0xAARRGGBB` words in row-major order.
pub fn rgba_from_argb(width: u32, height: u32, pixels: &[u32]) -> Result<RgbaImage> {
    ensure_dimensions("rgba_from_argb", width, height)?;

    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| {
            MonoBitmapError::InvalidImage(format!("{width}x{height} overflows pixel count"))
        })?;
    if pixels.len() != expected {
        return Err(MonoBitmapError::InvalidImage(format!(
            "pixel buffer holds {} values, expected {expected} for {width}x{height}",
            pixels.len()
        )));
    }

    let mut out = RgbaImage::new(width, height);
    for (dst, &argb) in out.pixels_mut().zip(pixels) {
        let [a, r, g, b] = argb.to_be_bytes();
        *dst = Rgba([r, g, b, a]);
    }
    Ok(out)
}
