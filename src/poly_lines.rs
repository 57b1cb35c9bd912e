//! Polyline driver.
//!
//! Checks whether a polyline request can be drawn as a group of rectangles
//! and, if so, decomposes every segment and hands the whole list to the
//! target's rectangle fill in one call. Anything that can't take that path
//! (wide lines, dashed lines, a decomposition that had to be abandoned) goes
//! to the target's per-pixel fallback with the original points, so a
//! polyline is never painted half one way and half the other.

use crate::basics::{CoordMode, PointI, Rectangle};
use crate::error::DecomposeError;
use crate::line_context::{LineContext, LineStyle};
use crate::line_runs::decompose_diagonal;
use crate::line_segment::{axis_aligned_rect, SegmentKind};
use crate::rect_storage::RectAccumulator;

// ============================================================================
// LineTarget
// ============================================================================

/// A surface that can fill rectangles and rasterize lines the slow way.
pub trait LineTarget {
    /// Fill color or pattern, passed through from the [`LineContext`].
    type Fill;

    /// Paint every rectangle with `fill`. Overlapping rectangles must paint
    /// the same as non-overlapping ones.
    fn fill_rectangles(&mut self, fill: &Self::Fill, rects: Vec<Rectangle>);

    /// Draw the polyline pixel by pixel.
    fn poly_line_fallback(
        &mut self,
        ctx: &LineContext<Self::Fill>,
        mode: CoordMode,
        points: &[PointI],
    );
}

// ============================================================================
// Options and outcome
// ============================================================================

/// What to do with a request the rectangle path can't handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Call the target's fallback rasterizer.
    #[default]
    Rasterize,
    /// Return [`PolyLineOutcome::Deferred`] and leave the target alone, so
    /// the caller can route the request elsewhere. Wide lines are still
    /// rasterized.
    Defer,
}

/// Driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolyLineOptions {
    pub fallback: FallbackPolicy,
    /// Largest rectangle list one polyline may produce. Needing more counts
    /// as running out of storage.
    pub max_rectangles: Option<usize>,
}

impl PolyLineOptions {
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_max_rectangles(mut self, limit: usize) -> Self {
        self.max_rectangles = Some(limit);
        self
    }
}

/// Why a request skipped the rectangle path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Non-zero line width.
    WideLine,
    /// Line style other than [`LineStyle::Solid`].
    NonSolidStyle(LineStyle),
    /// Decomposition started but couldn't finish.
    Abandoned(DecomposeError),
}

/// How a request was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolyLineOutcome {
    /// One `fill_rectangles` call with this many rectangles.
    Filled { rectangles: usize },
    /// One `poly_line_fallback` call.
    FellBack(FallbackReason),
    /// Nothing was drawn; see [`FallbackPolicy::Defer`].
    Deferred(FallbackReason),
}

impl PolyLineOutcome {
    pub fn is_accelerated(&self) -> bool {
        matches!(self, PolyLineOutcome::Filled { .. })
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            PolyLineOutcome::Filled { .. } => None,
            PolyLineOutcome::FellBack(reason) | PolyLineOutcome::Deferred(reason) => Some(reason),
        }
    }
}

// ============================================================================
// Segments
// ============================================================================

/// Absolute segments of a polyline, resolving relative coordinates.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    mode: CoordMode,
    prev: PointI,
    rest: core::iter::Enumerate<core::slice::Iter<'a, PointI>>,
    failed: bool,
}

impl<'a> Segments<'a> {
    pub fn new(mode: CoordMode, points: &'a [PointI]) -> Self {
        let (prev, rest) = match points.split_first() {
            Some((first, rest)) => (*first, rest),
            None => (PointI::default(), points),
        };
        Self {
            mode,
            prev,
            rest: rest.iter().enumerate(),
            failed: false,
        }
    }
}

impl Iterator for Segments<'_> {
    type Item = Result<(PointI, PointI), DecomposeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (i, pt) = self.rest.next()?;
        let end = match self.mode {
            CoordMode::Origin => *pt,
            CoordMode::Previous => {
                match (self.prev.x.checked_add(pt.x), self.prev.y.checked_add(pt.y)) {
                    (Some(x), Some(y)) => PointI::new(x, y),
                    _ => {
                        self.failed = true;
                        return Some(Err(DecomposeError::CoordinateOverflow { index: i + 1 }));
                    }
                }
            }
        };
        let start = self.prev;
        self.prev = end;
        Some(Ok((start, end)))
    }
}

// ============================================================================
// PolyLines
// ============================================================================

/// Turns thin solid polylines into rectangle fills.
#[derive(Debug, Clone, Default)]
pub struct PolyLines {
    options: PolyLineOptions,
}

impl PolyLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: PolyLineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PolyLineOptions {
        &self.options
    }

    /// Decompose a whole polyline, ignoring line width and style.
    ///
    /// The accumulator holds one rectangle per axis-aligned segment and one
    /// per run of every diagonal segment, in segment order.
    pub fn decompose(
        &self,
        mode: CoordMode,
        points: &[PointI],
    ) -> Result<RectAccumulator, DecomposeError> {
        let segments = points.len().saturating_sub(1);
        let mut acc = match self.options.max_rectangles {
            Some(limit) => RectAccumulator::with_limit(segments, limit)?,
            None => RectAccumulator::with_segments(segments)?,
        };

        for (i, segment) in Segments::new(mode, points).enumerate() {
            let (p1, p2) = segment?;
            if p1.x.abs_diff(p2.x) == u32::MAX || p1.y.abs_diff(p2.y) == u32::MAX {
                return Err(DecomposeError::ExtentOverflow { index: i + 1 });
            }
            match SegmentKind::classify(p1, p2) {
                SegmentKind::Diagonal => {
                    decompose_diagonal(p1, p2, &mut acc)?;
                }
                SegmentKind::HorizontalOrPoint | SegmentKind::Vertical => {
                    acc.push(axis_aligned_rect(p1, p2))?;
                }
            }
        }
        Ok(acc)
    }

    /// Draw a polyline on `target`, through its rectangle fill when possible.
    ///
    /// Exactly one of `fill_rectangles` or `poly_line_fallback` is called,
    /// unless the policy is [`FallbackPolicy::Defer`] and the request was
    /// deferred, in which case neither is.
    pub fn decompose_and_fill<T: LineTarget>(
        &self,
        target: &mut T,
        ctx: &LineContext<T::Fill>,
        mode: CoordMode,
        points: &[PointI],
    ) -> PolyLineOutcome {
        if ctx.line_width() != 0 {
            log::debug!(
                "line width {} can't be decomposed, rasterizing",
                ctx.line_width()
            );
            target.poly_line_fallback(ctx, mode, points);
            return PolyLineOutcome::FellBack(FallbackReason::WideLine);
        }
        if ctx.line_style() != LineStyle::Solid {
            log::debug!("non-solid line style {:?}", ctx.line_style());
            return self.fall_back(
                target,
                ctx,
                mode,
                points,
                FallbackReason::NonSolidStyle(ctx.line_style()),
            );
        }

        match self.decompose(mode, points) {
            Ok(acc) => {
                let rects = acc.into_rects();
                let rectangles = rects.len();
                log::trace!(
                    "{} points decomposed into {} rectangles",
                    points.len(),
                    rectangles
                );
                target.fill_rectangles(ctx.fill(), rects);
                PolyLineOutcome::Filled { rectangles }
            }
            Err(err) => {
                log::debug!("abandoning rectangle decomposition: {err}");
                self.fall_back(target, ctx, mode, points, FallbackReason::Abandoned(err))
            }
        }
    }

    fn fall_back<T: LineTarget>(
        &self,
        target: &mut T,
        ctx: &LineContext<T::Fill>,
        mode: CoordMode,
        points: &[PointI],
        reason: FallbackReason,
    ) -> PolyLineOutcome {
        match self.options.fallback {
            FallbackPolicy::Rasterize => {
                target.poly_line_fallback(ctx, mode, points);
                PolyLineOutcome::FellBack(reason)
            }
            FallbackPolicy::Defer => PolyLineOutcome::Deferred(reason),
        }
    }
}

/// Decompose a polyline with default options.
pub fn decompose_polyline(
    mode: CoordMode,
    points: &[PointI],
) -> Result<Vec<Rectangle>, DecomposeError> {
    PolyLines::new()
        .decompose(mode, points)
        .map(RectAccumulator::into_rects)
}

/// Draw a polyline on `target` with default options.
pub fn poly_lines<T: LineTarget>(
    target: &mut T,
    ctx: &LineContext<T::Fill>,
    mode: CoordMode,
    points: &[PointI],
) -> PolyLineOutcome {
    PolyLines::new().decompose_and_fill(target, ctx, mode, points)
}

// ============================================================================
// Tests
// ============================================================================
