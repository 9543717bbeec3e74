//! End-to-end conversion: normalize, resize, dither, encode.

use image::DynamicImage;
use tracing::debug;

use crate::bmp::{BitmapFile, encode_bmp};
use crate::dither::dither;
use crate::normalize::normalize;
use crate::options::ConvertOptions;
use crate::resize::resize_to_width;
use crate::rotate::rotate_180;
use crate::Result;

/// Convert a decoded image into a 1-bit BMP file using `options`.
pub fn convert(img: &DynamicImage, options: &ConvertOptions) -> Result<BitmapFile> {
    let source = normalize(img)?;
    let mut scaled = resize_to_width(&source, options.target_width)?;
    if options.rotate_print {
        scaled = rotate_180(&scaled);
    }
    let grid = dither(&scaled, options.dither)?;
    let bmp = encode_bmp(&grid)?;

    debug!(
        width = grid.width(),
        height = grid.height(),
        bytes = bmp.len(),
        "Converted image to monochrome BMP"
    );
    Ok(bmp)
}

/// Convert with Floyd-Steinberg dithering at the given width.
pub fn to_monochrome_bmp(img: &DynamicImage, target_width: u32) -> Result<BitmapFile> {
    convert(img, &ConvertOptions::new().with_target_width(target_width))
}
