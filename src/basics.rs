//! Foundation types: rounding, points, rectangles and coordinate modes.
//!
//! Everything else in the crate builds on these. Rectangles come in two
//! shapes: [`Rectangle`] is the origin-plus-extent form handed to fill
//! primitives, [`Rect`] is the two-corner form used for clip boxes.

// ============================================================================
// Rounding
// ============================================================================

/// `num / den` rounded to the nearest integer, halves away from zero.
///
/// Exact integer arithmetic; `den` must be positive.
#[inline]
pub fn round_div(num: i128, den: i128) -> i128 {
    debug_assert!(den > 0);
    let q = (2 * num.abs() + den) / (2 * den);
    if num < 0 {
        -q
    } else {
        q
    }
}

/// Cross-axis offset of sample `i` on a line that moves `rise` pixels across
/// over `run` pixels along its dominant axis.
///
/// Both the run decomposer and the reference rasterizer sample through this
/// function, so ties at half-pixel crossings resolve identically. A zero
/// `run` (a single point) has no offset.
#[inline]
pub fn cross_offset(i: u64, rise: i64, run: u64) -> i64 {
    if run == 0 {
        return 0;
    }
    round_div(i as i128 * rise as i128, run as i128) as i64
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// The same point with x and y exchanged.
    #[inline]
    pub fn transposed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

pub type PointI = PointBase<i32>;

impl From<(i32, i32)> for PointI {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// Coordinate mode
// ============================================================================

/// How the points of a polyline are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordMode {
    /// Every point is an absolute position.
    #[default]
    Origin,
    /// Every point after the first is a delta from the previous resolved point.
    Previous,
}

// ============================================================================
// Rectangle (origin + inclusive extent)
// ============================================================================

/// An axis-aligned block of pixels: minimum corner plus width and height.
///
/// `width` and `height` count pixels, so a single pixel is `1 x 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The inclusive bounding box of two pixel positions, in either order.
    ///
    /// A span of the whole `i32` range is one pixel too wide for `u32` and
    /// saturates; the polyline driver refuses such segments.
    #[inline]
    pub fn from_corners(a: PointI, b: PointI) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x).saturating_add(1),
            height: a.y.abs_diff(b.y).saturating_add(1),
        }
    }

    /// Last covered column (inclusive).
    #[inline]
    pub fn x2(&self) -> i32 {
        (self.x as i64 + self.width as i64 - 1) as i32
    }

    /// Last covered row (inclusive).
    #[inline]
    pub fn y2(&self) -> i32 {
        (self.y as i64 + self.height as i64 - 1) as i32
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x <= self.x2() && y <= self.y2()
    }

    /// Iterate every covered pixel, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = PointI> {
        let (x1, x2) = (self.x, self.x2());
        (self.y..=self.y2()).flat_map(move |y| (x1..=x2).map(move |x| PointI::new(x, y)))
    }

    /// Two-corner form of this rectangle.
    pub fn to_rect(&self) -> RectI {
        RectI::new(self.x, self.y, self.x2(), self.y2())
    }
}

// ============================================================================
// Rect (two inclusive corners)
// ============================================================================

/// A rectangle defined by two corner points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Ensure x1 <= x2 and y1 <= y2.
    pub fn normalize(&mut self) -> &Self {
        if self.x1 > self.x2 {
            core::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            core::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }

    /// Clip this rectangle to `r`, returning true if the result is non-empty.
    pub fn clip(&mut self, r: &Self) -> bool {
        if self.x2 > r.x2 {
            self.x2 = r.x2;
        }
        if self.y2 > r.y2 {
            self.y2 = r.y2;
        }
        if self.x1 < r.x1 {
            self.x1 = r.x1;
        }
        if self.y1 < r.y1 {
            self.y1 = r.y1;
        }
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    pub fn hit_test(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

pub type RectI = Rect<i32>;

// ============================================================================
// Tests
// ============================================================================
