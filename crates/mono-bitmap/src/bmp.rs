//! 1-bit Windows bitmap encoder.
//!
//! Layout: 14-byte file header, 40-byte info header (BITMAPINFOHEADER),
//! 2-entry BGR0 palette (0 = black, 1 = white), then pixel rows written
//! bottom-to-top, packed MSB first and zero-padded to 4-byte boundaries.
//! All multi-byte fields are little-endian.

use tracing::debug;

use crate::dither::MonochromeGrid;
use crate::{MonoBitmapError, Result, ensure_dimensions};

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const PALETTE_SIZE: u32 = 8;

/// Offset of the first pixel byte.
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE;

const SIGNATURE: [u8; 2] = *b"BM";

/// Palette entries in BGR0 order: index 0 black, index 1 white.
const PALETTE: [[u8; 4]; 2] = [[0x00, 0x00, 0x00, 0x00], [0xff, 0xff, 0xff, 0x00]];

/// An encoded bitmap file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapFile(Vec<u8>);

impl BitmapFile {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for BitmapFile {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Row geometry shared by the headers and the pixel writer.
#[derive(Debug, Clone, Copy)]
struct RowLayout {
    row_bytes: usize,
    padded_row_bytes: usize,
}

impl RowLayout {
    fn for_width(width: u32) -> Self {
        let row_bytes = (width as usize).div_ceil(8);
        let padded_row_bytes = row_bytes.div_ceil(4) * 4;
        Self {
            row_bytes,
            padded_row_bytes,
        }
    }
}

/// BITMAPFILEHEADER.
#[derive(Debug, Clone, Copy)]
struct FileHeader {
    file_size: u32,
    pixel_offset: u32,
}

impl FileHeader {
    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&SIGNATURE);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // reserved
        out.extend_from_slice(&self.pixel_offset.to_le_bytes());
    }
}

/// BITMAPINFOHEADER for an uncompressed 1 bpp image.
///
/// Height is positive: rows are stored bottom-up.
#[derive(Debug, Clone, Copy)]
struct InfoHeader {
    width: i32,
    height: i32,
    image_size: u32,
}

impl InfoHeader {
    const PLANES: u16 = 1;
    const BITS_PER_PIXEL: u16 = 1;
    const COMPRESSION_NONE: u32 = 0;

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&Self::PLANES.to_le_bytes());
        out.extend_from_slice(&Self::BITS_PER_PIXEL.to_le_bytes());
        out.extend_from_slice(&Self::COMPRESSION_NONE.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        // x/y resolution, colors used, important colors
        out.extend_from_slice(&[0u8; 16]);
    }
}

/// Pack one row of pixels 8 per byte, MSB first (1 = white), then zero-pad.
fn pack_row(row: &[bool], layout: RowLayout, out: &mut Vec<u8>) {
    out.extend(row.chunks(8).map(|chunk| {
        chunk
            .iter()
            .enumerate()
            .filter(|&(_, &white)| white)
            .fold(0u8, |byte, (bit, _)| byte | (0x80u8 >> bit))
    }));
    out.resize(out.len() + layout.padded_row_bytes - layout.row_bytes, 0);
}

fn to_i32(value: u32, what: &str) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| MonoBitmapError::InvalidImage(format!("{what} {value} exceeds BMP range")))
}

/// Encode a monochrome grid as a complete 1-bit BMP file.
pub fn encode_bmp(grid: &MonochromeGrid) -> Result<BitmapFile> {
    let (width, height) = (grid.width(), grid.height());
    ensure_dimensions("encode", width, height)?;

    let layout = RowLayout::for_width(width);
    let image_size = u32::try_from(layout.padded_row_bytes * height as usize)
        .ok()
        .filter(|size| size.checked_add(PIXEL_DATA_OFFSET).is_some())
        .ok_or_else(|| {
            MonoBitmapError::InvalidImage(format!("{width}x{height} is too large for BMP"))
        })?;

    let file_header = FileHeader {
        file_size: PIXEL_DATA_OFFSET + image_size,
        pixel_offset: PIXEL_DATA_OFFSET,
    };
    let info_header = InfoHeader {
        width: to_i32(width, "width")?,
        height: to_i32(height, "height")?,
        image_size,
    };

    debug!(
        width,
        height,
        padded_row_bytes = layout.padded_row_bytes,
        file_size = file_header.file_size,
        "Encoding 1-bit BMP"
    );

    let mut out = Vec::with_capacity(file_header.file_size as usize);
    file_header.write_to(&mut out);
    info_header.write_to(&mut out);
    for entry in PALETTE {
        out.extend_from_slice(&entry);
    }
    for y in (0..height).rev() {
        pack_row(grid.row(y), layout, &mut out);
    }

    debug_assert_eq!(out.len(), file_header.file_size as usize);
    Ok(BitmapFile(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn read_i32(bytes: &[u8], offset: usize) -> i32 {
        i32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn read_u16(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn test_row_layout_padding() {
        let cases = [
            (1, 1, 4),
            (8, 1, 4),
            (9, 2, 4),
            (32, 4, 4),
            (33, 5, 8),
            (320, 40, 40),
        ];
        for (width, row_bytes, padded) in cases {
            let layout = RowLayout::for_width(width);
            assert_eq!(layout.row_bytes, row_bytes, "width {width}");
            assert_eq!(layout.padded_row_bytes, padded, "width {width}");
        }
    }

    #[test]
    fn test_pack_row_msb_first() {
        let layout = RowLayout::for_width(10);
        let mut row = vec![false; 10];
        row[0] = true;
        row[7] = true;
        row[8] = true;
        let mut out = Vec::new();
        pack_row(&row, layout, &mut out);
        assert_eq!(out, vec![0b1000_0001, 0b1000_0000, 0, 0]);
    }

    #[test]
    fn test_headers_layout() {
        let grid = MonochromeGrid::new(10, 3, vec![false; 30]).unwrap();
        let bmp = encode_bmp(&grid).unwrap();
        let bytes = bmp.as_bytes();

        // 10px -> 2 row bytes -> padded to 4
        let image_size = 4 * 3;
        assert_eq!(bytes.len(), 62 + image_size);
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(read_u32(bytes, 2), (62 + image_size) as u32);
        assert_eq!(read_u32(bytes, 6), 0);
        assert_eq!(read_u32(bytes, 10), 62);
        assert_eq!(read_u32(bytes, 14), 40);
        assert_eq!(read_i32(bytes, 18), 10);
        assert_eq!(read_i32(bytes, 22), 3);
        assert_eq!(read_u16(bytes, 26), 1);
        assert_eq!(read_u16(bytes, 28), 1);
        assert_eq!(read_u32(bytes, 30), 0);
        assert_eq!(read_u32(bytes, 34), image_size as u32);
        assert!(bytes[38..54].iter().all(|&b| b == 0));
        assert_eq!(&bytes[54..58], &[0, 0, 0, 0]);
        assert_eq!(&bytes[58..62], &[255, 255, 255, 0]);
    }

    #[test]
    fn test_rows_written_bottom_up() {
        // Top row all white, bottom row all black
        let mut pixels = vec![true; 8];
        pixels.extend(vec![false; 8]);
        let grid = MonochromeGrid::new(8, 2, pixels).unwrap();
        let bmp = encode_bmp(&grid).unwrap();
        let data = &bmp.as_bytes()[62..];

        assert_eq!(data, &[0x00, 0, 0, 0, 0xff, 0, 0, 0]);
    }

    #[test]
    fn test_padding_bytes_are_zero() {
        let grid = MonochromeGrid::new(3, 2, vec![true; 6]).unwrap();
        let bmp = encode_bmp(&grid).unwrap();
        let data = &bmp.as_bytes()[62..];

        // 3 white pixels -> 0b1110_0000, unused low bits and padding stay zero
        assert_eq!(data, &[0xe0, 0, 0, 0, 0xe0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_rejects_empty_grid() {
        let grid = MonochromeGrid::new(0, 0, Vec::new()).unwrap();
        assert!(matches!(
            encode_bmp(&grid),
            Err(MonoBitmapError::InvalidImage(_))
        ));
        let grid = MonochromeGrid::new(4, 0, Vec::new()).unwrap();
        assert!(encode_bmp(&grid).is_err());
    }
}
