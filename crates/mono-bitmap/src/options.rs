//! Conversion options.
//!
//! These options control the output width, the black-and-white reduction
//! and orientation of the printed image.

use crate::DEFAULT_TARGET_WIDTH;
use crate::dither::DitherMode;

/// Configuration options for a single image conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Output width in pixels. Height follows the source aspect ratio.
    pub target_width: u32,

    /// Error diffusion or flat threshold.
    pub dither: DitherMode,

    /// Rotate the image 180 degrees before dithering (for upside-down printers).
    pub rotate_print: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            dither: DitherMode::FloydSteinberg,
            rotate_print: false,
        }
    }
}

impl ConvertOptions {
    /// Create options with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set target width.
    pub fn with_target_width(mut self, val: u32) -> Self {
        self.target_width = val;
        self
    }

    /// Builder: set dither mode.
    pub fn with_dither(mut self, val: DitherMode) -> Self {
        self.dither = val;
        self
    }

    /// Builder: set rotate-print flag.
    pub fn with_rotate_print(mut self, val: bool) -> Self {
        self.rotate_print = val;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.target_width, 320);
        assert_eq!(opts.dither, DitherMode::FloydSteinberg);
        assert!(!opts.rotate_print);
    }

    #[test]
    fn test_builder_chain() {
        let opts = ConvertOptions::new()
            .with_target_width(384)
            .with_dither(DitherMode::Threshold)
            .with_rotate_print(true);

        assert_eq!(opts.target_width, 384);
        assert_eq!(opts.dither, DitherMode::Threshold);
        assert!(opts.rotate_print);
    }
}
