//! Software line target.
//!
//! An owned RGBA pixel buffer with a clip box. Every drawing operation is
//! clipped before it touches memory, so rectangles and lines may extend
//! past the edges freely.

use crate::basics::{CoordMode, PointI, RectI, Rectangle};
use crate::color::Rgba8;
use crate::line_context::LineContext;
use crate::line_rasterizer::rasterize_poly_line;
use crate::poly_lines::LineTarget;

/// Row-major RGBA8 surface, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
    clip_box: RectI,
}

impl Surface {
    /// A transparent surface, clipped to its full extent.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::transparent(); width as usize * height as usize],
            clip_box: Self::full_box(width, height),
        }
    }

    fn full_box(width: u32, height: u32) -> RectI {
        RectI::new(0, 0, width as i32 - 1, height as i32 - 1)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    // ========================================================================
    // Clipping
    // ========================================================================

    /// Set the clip rectangle (inclusive corners, intersected with the
    /// buffer bounds). Returns false, and clips everything, if the two don't
    /// overlap.
    pub fn clip_box_i(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let mut cb = RectI::new(x1, y1, x2, y2);
        cb.normalize();
        if cb.clip(&Self::full_box(self.width, self.height)) {
            self.clip_box = cb;
            true
        } else {
            self.clip_box = RectI::new(1, 1, 0, 0);
            false
        }
    }

    /// Reset clipping to the full buffer or to nothing.
    pub fn reset_clipping(&mut self, visibility: bool) {
        self.clip_box = if visibility {
            Self::full_box(self.width, self.height)
        } else {
            RectI::new(1, 1, 0, 0)
        };
    }

    pub fn clip_box(&self) -> &RectI {
        &self.clip_box
    }

    #[inline]
    pub fn inbox(&self, x: i32, y: i32) -> bool {
        self.clip_box.hit_test(x, y)
    }

    // ========================================================================
    // Pixel access
    // ========================================================================

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// The pixel at (x, y), or transparent outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Rgba8::transparent();
        }
        self.pixels[self.offset(x, y)]
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Pixel data as `r, g, b, a` bytes.
    pub fn as_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Positions of all pixels that differ from `background`.
    pub fn painted(&self, background: Rgba8) -> Vec<PointI> {
        let w = self.width as usize;
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != background)
            .map(|(i, _)| PointI::new((i % w) as i32, (i / w) as i32))
            .collect()
    }

    // ========================================================================
    // Drawing (clip then write)
    // ========================================================================

    /// Fill the whole buffer, ignoring the clip box.
    pub fn clear(&mut self, c: Rgba8) {
        self.pixels.fill(c);
    }

    /// Write a single pixel (clipped).
    pub fn copy_pixel(&mut self, x: i32, y: i32, c: Rgba8) {
        if self.inbox(x, y) {
            let i = self.offset(x, y);
            self.pixels[i] = c;
        }
    }

    /// Fill the inclusive rectangle (x1, y1)–(x2, y2) (clipped).
    pub fn copy_bar(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, c: Rgba8) {
        let mut rc = RectI::new(x1, y1, x2, y2);
        rc.normalize();
        if !rc.clip(&self.clip_box) {
            return;
        }
        let w = self.width as usize;
        for y in rc.y1..=rc.y2 {
            let row = y as usize * w;
            self.pixels[row + rc.x1 as usize..=row + rc.x2 as usize].fill(c);
        }
    }

    /// Fill one [`Rectangle`] (clipped).
    pub fn copy_rect(&mut self, r: &Rectangle, c: Rgba8) {
        self.copy_bar(r.x, r.y, r.x2(), r.y2(), c);
    }
}

impl LineTarget for Surface {
    type Fill = Rgba8;

    fn fill_rectangles(&mut self, fill: &Rgba8, rects: Vec<Rectangle>) {
        for r in &rects {
            self.copy_rect(r, *fill);
        }
    }

    fn poly_line_fallback(&mut self, ctx: &LineContext<Rgba8>, mode: CoordMode, points: &[PointI]) {
        if !ctx.is_thin_solid() {
            log::warn!(
                "drawing width {} {:?} line as thin solid",
                ctx.line_width(),
                ctx.line_style()
            );
        }
        let c = *ctx.fill();
        rasterize_poly_line(mode, points, |x, y| self.copy_pixel(x, y, c));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly_lines::{poly_lines, PolyLineOutcome};

    const RED: Rgba8 = Rgba8::new_opaque(255, 0, 0);

    #[test]
    fn test_new_is_transparent() {
        let s = Surface::new(4, 3);
        assert_eq!(s.width(), 4);
        assert_eq!(s.height(), 3);
        assert_eq!(s.pixels().len(), 12);
        assert!(s.painted(Rgba8::transparent()).is_empty());
        assert_eq!(*s.clip_box(), RectI::new(0, 0, 3, 2));
    }

    #[test]
    fn test_copy_pixel_clipped() {
        let mut s = Surface::new(4, 4);
        s.copy_pixel(1, 2, RED);
        s.copy_pixel(-1, 0, RED);
        s.copy_pixel(4, 0, RED);
        assert_eq!(s.pixel(1, 2), RED);
        assert_eq!(s.painted(Rgba8::transparent()), vec![PointI::new(1, 2)]);
        assert_eq!(s.pixel(9, 9), Rgba8::transparent());
    }

    #[test]
    fn test_copy_bar_clipped() {
        let mut s = Surface::new(5, 5);
        s.copy_bar(3, 3, 9, -2, RED);
        let painted = s.painted(Rgba8::transparent());
        assert_eq!(painted.len(), 2 * 4);
        assert!(painted.iter().all(|p| p.x >= 3 && p.y <= 3));
    }

    #[test]
    fn test_clip_box() {
        let mut s = Surface::new(10, 10);
        assert!(s.clip_box_i(8, 8, 2, 2));
        s.copy_bar(0, 0, 9, 9, RED);
        assert_eq!(s.painted(Rgba8::transparent()).len(), 49);

        assert!(!s.clip_box_i(20, 20, 30, 30));
        s.clear(Rgba8::white());
        s.copy_pixel(5, 5, RED);
        assert_eq!(s.pixel(5, 5), Rgba8::white());

        s.reset_clipping(true);
        s.copy_pixel(5, 5, RED);
        assert_eq!(s.pixel(5, 5), RED);
        s.reset_clipping(false);
        assert!(!s.inbox(0, 0));
    }

    #[test]
    fn test_copy_rect() {
        let mut s = Surface::new(8, 8);
        s.copy_rect(&Rectangle::new(3, 2, 3, 1), RED);
        assert_eq!(
            s.painted(Rgba8::transparent()),
            vec![PointI::new(3, 2), PointI::new(4, 2), PointI::new(5, 2)]
        );
    }

    #[test]
    fn test_as_rgba() {
        let mut s = Surface::new(2, 1);
        s.copy_pixel(1, 0, RED);
        assert_eq!(s.as_rgba(), vec![0, 0, 0, 0, 255, 0, 0, 255]);
    }

    #[test]
    fn test_accelerated_matches_fallback() {
        let points: Vec<PointI> = [(1, 1), (5, 2), (7, 9), (0, 6), (0, 0)]
            .iter()
            .map(|&(x, y)| PointI::new(x, y))
            .collect();
        let ctx = LineContext::new(RED);

        let mut fast = Surface::new(12, 12);
        let outcome = poly_lines(&mut fast, &ctx, CoordMode::Origin, &points);
        assert!(matches!(outcome, PolyLineOutcome::Filled { .. }));

        let mut slow = Surface::new(12, 12);
        slow.poly_line_fallback(&ctx, CoordMode::Origin, &points);

        assert_eq!(fast, slow);
    }

    #[test]
    fn test_wide_line_drawn_thin() {
        let mut s = Surface::new(6, 6);
        let ctx = LineContext::new(RED).with_line_width(3);
        let points = [PointI::new(0, 0), PointI::new(5, 0)];
        let outcome = poly_lines(&mut s, &ctx, CoordMode::Origin, &points);
        assert!(!outcome.is_accelerated());
        assert_eq!(s.painted(Rgba8::transparent()).len(), 6);
    }
}
