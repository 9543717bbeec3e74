//! Dithering algorithms for converting color images to black-and-white.
//!
//! Provides BT.601 luma reduction, Floyd-Steinberg error-diffusion dithering
//! and simple threshold conversion.

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::{MonoBitmapError, Result, ensure_dimensions};

/// Midpoint threshold; values at or above it become white.
const THRESHOLD: f32 = 128.0;

const BLACK: f32 = 0.0;
const WHITE: f32 = 255.0;

// ITU-R BT.601 luma coefficients in thousandths. The weighted sum is
// exact in integers, so colors landing on 128 compare equal to it.
const LUMA_R: u32 = 299;
const LUMA_G: u32 = 587;
const LUMA_B: u32 = 114;
const LUMA_SCALE: f32 = 1000.0;

/// How the grayscale field is reduced to two levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DitherMode {
    /// Floyd-Steinberg error diffusion.
    #[default]
    FloydSteinberg,
    /// Flat midpoint threshold, no error diffusion.
    Threshold,
}

/// Per-pixel luma values of one image, mutated in place while dithering.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayscaleField {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl GrayscaleField {
    /// Compute the luma field of an RGBA image. Alpha is ignored.
    pub fn from_rgba(img: &RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        ensure_dimensions("grayscale", width, height)?;
        let values = img.pixels().map(luma).collect();
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Wrap precomputed luma values laid out row-major.
    pub fn from_values(width: u32, height: u32, values: Vec<f32>) -> Result<Self> {
        ensure_dimensions("grayscale", width, height)?;
        if values.len() != width as usize * height as usize {
            return Err(MonoBitmapError::InvalidImage(format!(
                "grayscale field holds {} values, expected {width}x{height}",
                values.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(MonoBitmapError::InvalidImage(format!(
                "grayscale field holds non-finite value {bad}"
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Black/white pixel grid, row-major top-to-bottom. `true` is white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonochromeGrid {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl MonochromeGrid {
    /// Build a grid from row-major pixels. The pixel count must match the geometry.
    pub fn new(width: u32, height: u32, pixels: Vec<bool>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(MonoBitmapError::InvalidImage(format!(
                "grid holds {} pixels, expected {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Materialize a grid from a field: white iff the value is >= 128.
    pub fn from_field(field: &GrayscaleField) -> Self {
        Self {
            width: field.width,
            height: field.height,
            pixels: field.values.iter().map(|&v| v >= THRESHOLD).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_white(&self, x: u32, y: u32) -> bool {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Pixels of row `y`, left to right.
    pub fn row(&self, y: u32) -> &[bool] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }
}

fn luma(px: &Rgba<u8>) -> f32 {
    let [r, g, b, _] = px.0;
    let sum = LUMA_R * u32::from(r) + LUMA_G * u32::from(g) + LUMA_B * u32::from(b);
    // At most 255_000, exactly representable in f32
    sum as f32 / LUMA_SCALE
}

/// Convert an RGBA image to a black-and-white grid.
pub fn dither(img: &RgbaImage, mode: DitherMode) -> Result<MonochromeGrid> {
    let mut field = GrayscaleField::from_rgba(img)?;
    match mode {
        DitherMode::FloydSteinberg => floyd_steinberg(&mut field),
        DitherMode::Threshold => threshold(&mut field),
    }
    Ok(MonochromeGrid::from_field(&field))
}

/// Apply Floyd-Steinberg dithering to a grayscale field in place.
///
/// Pixels are visited in raster order; each one is clamped to 0..=255,
/// quantized to 0 or 255, and its error is pushed to unvisited neighbors:
/// - Right:        7/16
/// - Bottom-left:  3/16
/// - Bottom:       5/16
/// - Bottom-right: 1/16
pub fn floyd_steinberg(field: &mut GrayscaleField) {
    let (width, height) = (field.width, field.height);
    debug!(width, height, "Applying Floyd-Steinberg dithering");

    for y in 0..height {
        for x in 0..width {
            let idx = y as usize * width as usize + x as usize;
            let old_value = field.values[idx].clamp(BLACK, WHITE);
            let new_value = quantize(old_value);
            field.values[idx] = new_value;

            distribute_error(field, x, y, old_value - new_value);
        }
    }

    debug!("Floyd-Steinberg dithering complete");
}

/// Distribute quantization error to neighboring pixels.
fn distribute_error(field: &mut GrayscaleField, x: u32, y: u32, error: f32) {
    let width = field.width as usize;
    let idx = y as usize * width + x as usize;
    let has_right = x + 1 < field.width;

    if has_right {
        field.values[idx + 1] += error * 7.0 / 16.0;
    }
    if y + 1 < field.height {
        let below = idx + width;
        if x > 0 {
            field.values[below - 1] += error * 3.0 / 16.0;
        }
        field.values[below] += error * 5.0 / 16.0;
        if has_right {
            field.values[below + 1] += error / 16.0;
        }
    }
}

/// Simple threshold conversion without error diffusion.
pub fn threshold(field: &mut GrayscaleField) {
    debug!(
        width = field.width,
        height = field.height,
        "Applying threshold conversion"
    );
    for v in &mut field.values {
        *v = quantize(*v);
    }
}

fn quantize(value: f32) -> f32 {
    if value < THRESHOLD { BLACK } else { WHITE }
}
