// Pixel-perfect comparison library for rectangle-decomposed polylines.
//
// Provides buffer comparison, BMP I/O, and diff image generation.

use std::fs::File;
use std::io::{self, BufWriter, Read as IoRead, Write as IoWrite};
use std::path::Path;

use polyline_rects::surface::Surface;

pub mod render;

// ============================================================================
// Pixel Buffer
// ============================================================================

/// An RGBA pixel buffer with dimensions.
#[derive(Clone)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, row-major, top-to-bottom. Length = width * height * 4.
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 4],
        }
    }

    /// Byte offset of pixel (x, y) in `data`.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}

impl From<&Surface> for PixelBuffer {
    fn from(s: &Surface) -> Self {
        Self {
            width: s.width(),
            height: s.height(),
            data: s.as_rgba(),
        }
    }
}

// ============================================================================
// Comparison Result
// ============================================================================

/// Information about a single pixel difference.
#[derive(Debug, Clone)]
pub struct DiffInfo {
    pub x: u32,
    pub y: u32,
    pub pixel_a: [u8; 4],
    pub pixel_b: [u8; 4],
}

/// Result of comparing two pixel buffers.
#[derive(Debug, Clone)]
pub struct CompareResult {
    pub identical: bool,
    pub total_pixels: u64,
    /// Pixels that differ in any channel.
    pub different_pixels: u64,
    /// Differing pixels painted only in A (a != background, b == background).
    pub only_in_a: u64,
    /// Differing pixels painted only in B.
    pub only_in_b: u64,
    /// The first differing pixel, scanning left-to-right, top-to-bottom.
    pub first_diff: Option<DiffInfo>,
}

impl std::fmt::Display for CompareResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.identical {
            write!(f, "IDENTICAL: {} pixels match perfectly", self.total_pixels)
        } else {
            write!(
                f,
                "DIFFERENT: {}/{} pixels differ ({:.2}%), {} only in A, {} only in B",
                self.different_pixels,
                self.total_pixels,
                self.different_pixels as f64 / self.total_pixels as f64 * 100.0,
                self.only_in_a,
                self.only_in_b,
            )?;
            if let Some(ref d) = self.first_diff {
                write!(
                    f,
                    "\n  First diff at ({}, {}): A={:?} B={:?}",
                    d.x, d.y, d.pixel_a, d.pixel_b
                )?;
            }
            Ok(())
        }
    }
}

// ============================================================================
// Buffer Comparison
// ============================================================================

/// Compare two RGBA pixel buffers pixel by pixel.
///
/// `background` decides which side a differing pixel was painted on.
pub fn compare_buffers(a: &PixelBuffer, b: &PixelBuffer, background: [u8; 4]) -> CompareResult {
    assert_eq!(a.width, b.width, "Width mismatch");
    assert_eq!(a.height, b.height, "Height mismatch");
    assert_eq!(a.data.len(), b.data.len(), "Data length mismatch");

    let total_pixels = (a.width as u64) * (a.height as u64);
    let mut different_pixels = 0u64;
    let mut only_in_a = 0u64;
    let mut only_in_b = 0u64;
    let mut first_diff: Option<DiffInfo> = None;

    for y in 0..a.height {
        for x in 0..a.width {
            let pa = a.pixel(x, y);
            let pb = b.pixel(x, y);
            if pa == pb {
                continue;
            }
            different_pixels += 1;
            if pb == background {
                only_in_a += 1;
            } else if pa == background {
                only_in_b += 1;
            }
            if first_diff.is_none() {
                first_diff = Some(DiffInfo {
                    x,
                    y,
                    pixel_a: pa,
                    pixel_b: pb,
                });
            }
        }
    }

    CompareResult {
        identical: different_pixels == 0,
        total_pixels,
        different_pixels,
        only_in_a,
        only_in_b,
        first_diff,
    }
}

/// Generate a visual diff image.
///
/// - Identical pixels are dark gray.
/// - Pixels painted only in A are red, only in B are blue, otherwise magenta.
pub fn generate_diff_image(a: &PixelBuffer, b: &PixelBuffer, background: [u8; 4]) -> PixelBuffer {
    assert_eq!(a.width, b.width);
    assert_eq!(a.height, b.height);

    let mut diff = PixelBuffer::new(a.width, a.height);
    for y in 0..a.height {
        for x in 0..a.width {
            let pa = a.pixel(x, y);
            let pb = b.pixel(x, y);
            let out = if pa == pb {
                [40, 40, 40, 255]
            } else if pb == background {
                [255, 0, 0, 255]
            } else if pa == background {
                [0, 0, 255, 255]
            } else {
                [255, 0, 255, 255]
            };
            let i = diff.offset(x, y);
            diff.data[i..i + 4].copy_from_slice(&out);
        }
    }
    diff
}

/// Generate a side-by-side comparison image: [A | Diff | B]
pub fn generate_sidebyside(a: &PixelBuffer, b: &PixelBuffer, background: [u8; 4]) -> PixelBuffer {
    let diff = generate_diff_image(a, b, background);
    let total_width = a.width * 3;
    let mut out = PixelBuffer::new(total_width, a.height);

    let len = a.width as usize * 4;
    for y in 0..a.height {
        for (panel, src) in [a, &diff, b].into_iter().enumerate() {
            let src_row = src.offset(0, y);
            let dst_row = out.offset(0, y) + panel * len;
            out.data[dst_row..dst_row + len].copy_from_slice(&src.data[src_row..src_row + len]);
        }
    }
    out
}

// ============================================================================
// BMP I/O (32-bit BGRA, top-down)
// ============================================================================

/// Save a pixel buffer as a 32-bit BMP file (top-down, BGRA).
pub fn save_bmp(path: &Path, buf: &PixelBuffer) -> io::Result<()> {
    let w = buf.width;
    let h = buf.height;
    let too_large = || io::Error::new(io::ErrorKind::InvalidInput, "Image too large for BMP");
    let row_size = w.checked_mul(4).ok_or_else(too_large)?;
    let image_size = row_size.checked_mul(h).ok_or_else(too_large)?;
    let file_size = image_size.checked_add(14 + 40).ok_or_else(too_large)?;
    let height = i32::try_from(h).map_err(|_| too_large())?;

    let mut f = BufWriter::new(File::create(path)?);

    // BMP file header (14 bytes)
    f.write_all(b"BM")?;
    f.write_all(&file_size.to_le_bytes())?;
    f.write_all(&[0u8; 4])?; // reserved
    f.write_all(&(14u32 + 40).to_le_bytes())?; // pixel data offset

    // BITMAPINFOHEADER (40 bytes)
    f.write_all(&40u32.to_le_bytes())?;
    f.write_all(&w.to_le_bytes())?;
    f.write_all(&(-height).to_le_bytes())?; // negative height = top-down
    f.write_all(&1u16.to_le_bytes())?; // planes
    f.write_all(&32u16.to_le_bytes())?; // bits per pixel
    f.write_all(&0u32.to_le_bytes())?; // BI_RGB
    f.write_all(&image_size.to_le_bytes())?;
    f.write_all(&[0u8; 8])?; // resolution
    f.write_all(&0u32.to_le_bytes())?; // colors used
    f.write_all(&0u32.to_le_bytes())?; // important colors

    let mut row = vec![0u8; w as usize * 4];
    for y in 0..h {
        for x in 0..w {
            let [r, g, b, a] = buf.pixel(x, y);
            let di = (x * 4) as usize;
            row[di..di + 4].copy_from_slice(&[b, g, r, a]);
        }
        f.write_all(&row)?;
    }
    f.flush()
}

/// Load a 24-bit or 32-bit BMP file.
pub fn load_bmp(path: &Path) -> io::Result<PixelBuffer> {
    let mut data = Vec::new();
    File::open(path)?.read_to_end(&mut data)?;

    if data.len() < 54 || &data[0..2] != b"BM" {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Not a valid BMP file",
        ));
    }

    let pixel_offset = u32::from_le_bytes([data[10], data[11], data[12], data[13]]) as usize;
    let w = i32::from_le_bytes([data[18], data[19], data[20], data[21]]);
    let h = i32::from_le_bytes([data[22], data[23], data[24], data[25]]);
    let bpp = u16::from_le_bytes([data[28], data[29]]) as usize;
    if bpp != 24 && bpp != 32 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Unsupported BMP depth: {bpp} bits"),
        ));
    }

    let width = w.unsigned_abs();
    let height = h.unsigned_abs();
    let top_down = h < 0;
    let bytes_pp = bpp / 8;
    let row_stride = (width as usize * bytes_pp + 3) / 4 * 4;

    let mut buf = PixelBuffer::new(width, height);
    for y in 0..height as usize {
        let src_y = if top_down { y } else { height as usize - 1 - y };
        let row_offset = pixel_offset + src_y * row_stride;
        for x in 0..width as usize {
            let si = row_offset + x * bytes_pp;
            if si + bytes_pp > data.len() {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "Truncated BMP data",
                ));
            }
            let alpha = if bytes_pp == 4 { data[si + 3] } else { 255 };
            let di = buf.offset(x as u32, y as u32);
            buf.data[di..di + 4].copy_from_slice(&[data[si + 2], data[si + 1], data[si], alpha]);
        }
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: [u8; 4] = [255, 255, 255, 255];

    fn buf_with(pixels: &[(u32, u32, [u8; 4])]) -> PixelBuffer {
        let mut b = PixelBuffer::new(4, 4);
        b.data.chunks_mut(4).for_each(|c| c.copy_from_slice(&BG));
        for &(x, y, c) in pixels {
            let i = ((y * 4 + x) * 4) as usize;
            b.data[i..i + 4].copy_from_slice(&c);
        }
        b
    }

    #[test]
    fn test_identical() {
        let a = buf_with(&[(1, 1, [0, 0, 0, 255])]);
        let r = compare_buffers(&a, &a.clone(), BG);
        assert!(r.identical);
        assert_eq!(r.total_pixels, 16);
    }

    #[test]
    fn test_only_in_one_side() {
        let a = buf_with(&[(1, 1, [0, 0, 0, 255]), (2, 2, [0, 0, 0, 255])]);
        let b = buf_with(&[(2, 2, [0, 0, 0, 255]), (3, 0, [0, 0, 0, 255])]);
        let r = compare_buffers(&a, &b, BG);
        assert!(!r.identical);
        assert_eq!(r.different_pixels, 2);
        assert_eq!(r.only_in_a, 1);
        assert_eq!(r.only_in_b, 1);
        let first = r.first_diff.unwrap();
        assert_eq!((first.x, first.y), (3, 0));

        let diff = generate_diff_image(&a, &b, BG);
        assert_eq!(diff.pixel(1, 1), [255, 0, 0, 255]);
        assert_eq!(diff.pixel(3, 0), [0, 0, 255, 255]);
        assert_eq!(diff.pixel(0, 0), [40, 40, 40, 255]);

        let sbs = generate_sidebyside(&a, &b, BG);
        assert_eq!(sbs.width, 12);
        assert_eq!(sbs.pixel(4 + 1, 1), [255, 0, 0, 255]);
        assert_eq!(sbs.pixel(8 + 3, 0), [0, 0, 0, 255]);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_offsets_past_u32() {
        let big = PixelBuffer {
            width: 70_000,
            height: 70_000,
            data: Vec::new(),
        };
        assert_eq!(big.offset(69_999, 69_999), (69_999 * 70_000 + 69_999) * 4);
        assert_eq!(big.offset(0, 1), 280_000);
    }

    #[test]
    fn test_save_refuses_oversized_image() {
        let big = PixelBuffer {
            width: 40_000,
            height: 30_000,
            data: Vec::new(),
        };
        let path = std::env::temp_dir().join("pixel-compare-oversized.bmp");
        let err = save_bmp(&path, &big).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(!path.exists());
    }

    #[test]
    fn test_bmp_round_trip() {
        let a = buf_with(&[(0, 3, [10, 20, 30, 255])]);
        let path = std::env::temp_dir().join(format!("pixel-compare-{}.bmp", std::process::id()));
        save_bmp(&path, &a).unwrap();
        let b = load_bmp(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(compare_buffers(&a, &b, BG).identical);
    }
}
