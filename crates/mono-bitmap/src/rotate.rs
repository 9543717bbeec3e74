//! 180-degree rotation for printers that feed paper upside down.

use image::RgbaImage;
use image::imageops;
use tracing::debug;

/// Rotate an image 180 degrees.
///
/// This is equivalent to flipping both horizontally and vertically.
pub fn rotate_180(img: &RgbaImage) -> RgbaImage {
    let (w, h) = img.dimensions();
    debug!(w, h, "Rotating image 180 degrees");
    imageops::rotate180(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Create a test image with unique red values at corners.
    /// Top-left=10, Top-right=20, Bottom-left=30, Bottom-right=40
    fn create_corner_image(width: u32, height: u32) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(width, height, Rgba([128, 128, 128, 255]));
        img.put_pixel(0, 0, Rgba([10, 0, 0, 255]));
        img.put_pixel(width - 1, 0, Rgba([20, 0, 0, 255]));
        img.put_pixel(0, height - 1, Rgba([30, 0, 0, 255]));
        img.put_pixel(width - 1, height - 1, Rgba([40, 0, 0, 255]));
        img
    }

    fn red(img: &RgbaImage, x: u32, y: u32) -> u8 {
        img.get_pixel(x, y).0[0]
    }

    #[test]
    fn test_rotate_180_corner_values() {
        let img = create_corner_image(4, 4);
        let rotated = rotate_180(&img);

        // After 180 rotation, corners swap diagonally
        assert_eq!(red(&rotated, 0, 0), 40);
        assert_eq!(red(&rotated, 3, 0), 30);
        assert_eq!(red(&rotated, 0, 3), 20);
        assert_eq!(red(&rotated, 3, 3), 10);
    }

    #[test]
    fn test_rotate_180_preserves_dimensions() {
        let img = create_corner_image(10, 20);
        assert_eq!(rotate_180(&img).dimensions(), (10, 20));
    }

    #[test]
    fn test_rotate_180_is_involution() {
        let img = create_corner_image(5, 7);
        assert_eq!(rotate_180(&rotate_180(&img)), img);
    }
}
