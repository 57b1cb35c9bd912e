//! Diagonal segment decomposition into pixel runs.
//!
//! A thin diagonal line is sampled once per unit step along its dominant
//! axis. Consecutive samples that land on the same row (or column, for steep
//! lines) form a run, and each run is one rectangle. E.g. the line
//! (1,1)→(5,2) with a slope of 0.25 splits into two runs:
//!
//! ```text
//!   x:  1 2 3 4 5
//!   y1: # #
//!   y2:     # # #
//! ```
//!
//! The cross coordinate of sample `i` is `start + i * rise / run`, rounded
//! half away from zero in exact integer arithmetic. Steep lines are
//! marched with x and y transposed so the dominant axis always advances by
//! exactly one pixel per sample; the rectangles are transposed back on the
//! way out.

use crate::basics::{cross_offset, PointI, Rectangle};
use crate::error::DecomposeError;
use crate::rect_storage::RectAccumulator;

// ============================================================================
// MarchFrame
// ============================================================================

/// A segment normalized for marching: transposed if steep, and oriented so
/// the dominant coordinate increases from `start`.
#[derive(Debug, Clone, Copy)]
struct MarchFrame {
    start: PointI,
    steps: u64,
    rise: i64,
    steep: bool,
}

impl MarchFrame {
    fn new(p1: PointI, p2: PointI) -> Self {
        let steep = p1.y.abs_diff(p2.y) > p1.x.abs_diff(p2.x);

        let (mut a, mut b) = if steep {
            (p1.transposed(), p2.transposed())
        } else {
            (p1, p2)
        };
        if a.x > b.x {
            core::mem::swap(&mut a, &mut b);
        }

        Self {
            start: a,
            steps: a.x.abs_diff(b.x) as u64,
            rise: b.y as i64 - a.y as i64,
            steep,
        }
    }

    /// Sample `i` in surface coordinates.
    #[inline]
    fn sample(&self, i: u64) -> PointI {
        let major = (self.start.x as i64 + i as i64) as i32;
        // Stays between the two endpoints, so it fits an i32.
        let minor = (self.start.y as i64 + cross_offset(i, self.rise, self.steps)) as i32;
        if self.steep {
            PointI::new(minor, major)
        } else {
            PointI::new(major, minor)
        }
    }
}

// ============================================================================
// RunState
// ============================================================================

/// The run currently being grown: its first sample and the latest one.
#[derive(Debug, Clone, Copy)]
struct RunState {
    run_start: PointI,
    last: PointI,
    steep: bool,
}

impl RunState {
    fn new(first: PointI, steep: bool) -> Self {
        Self {
            run_start: first,
            last: first,
            steep,
        }
    }

    /// Take the next sample. Returns the run it closed, if the cross
    /// coordinate moved.
    #[inline]
    fn advance(&mut self, cur: PointI) -> Option<Rectangle> {
        let moved = if self.steep {
            cur.x != self.last.x
        } else {
            cur.y != self.last.y
        };
        let closed = if moved {
            let run = Rectangle::from_corners(self.run_start, self.last);
            self.run_start = cur;
            Some(run)
        } else {
            None
        };
        self.last = cur;
        closed
    }

    fn finish(self) -> Rectangle {
        Rectangle::from_corners(self.run_start, self.last)
    }
}

// ============================================================================
// DiagonalRuns
// ============================================================================

/// Iterator over the runs of one segment, in marching order.
///
/// Built for diagonal segments, but total: a horizontal, vertical or
/// single-point segment yields its one bounding rectangle.
#[derive(Debug, Clone)]
pub struct DiagonalRuns {
    frame: MarchFrame,
    next: u64,
    state: RunState,
    done: bool,
}

impl DiagonalRuns {
    pub fn new(p1: PointI, p2: PointI) -> Self {
        let frame = MarchFrame::new(p1, p2);
        Self {
            state: RunState::new(frame.sample(0), frame.steep),
            next: 1,
            frame,
            done: false,
        }
    }

    /// True if the segment is marched with x and y transposed.
    pub fn is_steep(&self) -> bool {
        self.frame.steep
    }

    /// Number of pixel samples along the dominant axis.
    pub fn samples(&self) -> u64 {
        self.frame.steps + 1
    }
}

impl Iterator for DiagonalRuns {
    type Item = Rectangle;

    fn next(&mut self) -> Option<Rectangle> {
        if self.done {
            return None;
        }
        while self.next <= self.frame.steps {
            let cur = self.frame.sample(self.next);
            self.next += 1;
            if let Some(run) = self.state.advance(cur) {
                return Some(run);
            }
        }
        self.done = true;
        Some(self.state.finish())
    }
}

impl core::iter::FusedIterator for DiagonalRuns {}

/// Decompose a diagonal segment into `acc`, returning the number of runs.
///
/// The first run takes the slot reserved for this segment; every further
/// run costs the accumulator one more slot.
pub fn decompose_diagonal(
    p1: PointI,
    p2: PointI,
    acc: &mut RectAccumulator,
) -> Result<usize, DecomposeError> {
    let mut runs = 0;
    for run in DiagonalRuns::new(p1, p2) {
        acc.push(run)?;
        runs += 1;
    }
    Ok(runs)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn p(x: i32, y: i32) -> PointI {
        PointI::new(x, y)
    }

    fn runs(a: (i32, i32), b: (i32, i32)) -> Vec<Rectangle> {
        DiagonalRuns::new(p(a.0, a.1), p(b.0, b.1)).collect()
    }

    #[test]
    fn test_shallow_runs_merge() {
        assert_eq!(
            runs((1, 1), (5, 2)),
            vec![Rectangle::new(1, 1, 2, 1), Rectangle::new(3, 2, 3, 1)]
        );
    }

    #[test]
    fn test_steep_is_transposed_shallow() {
        let r = DiagonalRuns::new(p(1, 1), p(2, 5));
        assert!(r.is_steep());
        assert_eq!(
            r.collect::<Vec<_>>(),
            vec![Rectangle::new(1, 1, 1, 2), Rectangle::new(2, 3, 1, 3)]
        );
    }

    #[test]
    fn test_direction_does_not_matter() {
        assert_eq!(runs((5, 2), (1, 1)), runs((1, 1), (5, 2)));
        assert_eq!(runs((2, 5), (1, 1)), runs((1, 1), (2, 5)));
        assert_eq!(runs((1, -4), (0, 0)), runs((0, 0), (1, -4)));
    }

    #[test]
    fn test_unit_slope_never_merges() {
        let r = DiagonalRuns::new(p(0, 0), p(3, 3));
        assert!(!r.is_steep());
        assert_eq!(
            r.collect::<Vec<_>>(),
            vec![
                Rectangle::new(0, 0, 1, 1),
                Rectangle::new(1, 1, 1, 1),
                Rectangle::new(2, 2, 1, 1),
                Rectangle::new(3, 3, 1, 1),
            ]
        );
        assert_eq!(runs((0, 3), (3, 0)).len(), 4);
    }

    #[test]
    fn test_negative_shallow_slope() {
        // slope -0.5: offsets 0, -0.5, -1, -1.5, -2 round to 0, -1, -1, -2, -2
        assert_eq!(
            runs((0, 0), (4, -2)),
            vec![
                Rectangle::new(0, 0, 1, 1),
                Rectangle::new(1, -1, 2, 1),
                Rectangle::new(3, -2, 2, 1),
            ]
        );
    }

    #[test]
    fn test_negative_steep_slope() {
        assert_eq!(
            runs((0, 0), (1, -4)),
            vec![Rectangle::new(1, -4, 1, 2), Rectangle::new(0, -2, 1, 3)]
        );
    }

    #[test]
    fn test_exact_half_rounds_away_from_zero() {
        // Sample 11 of (0,0)->(22,15) sits exactly on y = 7.5.
        let rects = runs((0, 0), (22, 15));
        assert!(rects.iter().any(|r| r.contains(11, 8)));
        assert!(!rects.iter().any(|r| r.contains(11, 7)));
        assert_eq!(runs((22, 15), (0, 0)), rects);

        let rects = runs((0, 0), (22, -15));
        assert!(rects.iter().any(|r| r.contains(11, -8)));

        // Steep: the same tie with the axes swapped.
        let rects = runs((0, 0), (15, 26));
        assert!(rects.iter().any(|r| r.contains(8, 13)));
        assert!(!rects.iter().any(|r| r.contains(7, 13)));
    }

    #[test]
    fn test_full_range_diagonal_ends_on_endpoints() {
        let a = p(i32::MIN, i32::MIN);
        let b = p(i32::MAX, i32::MAX - 1);
        let mut it = DiagonalRuns::new(a, b);
        assert!(!it.is_steep());
        let first = it.next().unwrap();
        assert_eq!((first.x, first.y), (i32::MIN, i32::MIN));
    }

    #[test]
    fn test_axis_aligned_input_yields_one_rect() {
        assert_eq!(runs((2, 2), (6, 2)), vec![Rectangle::new(2, 2, 5, 1)]);
        assert_eq!(runs((2, 6), (2, 2)), vec![Rectangle::new(2, 2, 1, 5)]);
        assert_eq!(runs((3, 3), (3, 3)), vec![Rectangle::new(3, 3, 1, 1)]);
    }

    #[test]
    fn test_runs_partition_samples() {
        let cases = [((0, 0), (17, 5)), ((3, 9), (-4, -2)), ((-6, 1), (2, 20)), ((0, 0), (9, -7))];
        for (a, b) in cases {
            let it = DiagonalRuns::new(p(a.0, a.1), p(b.0, b.1));
            let samples = it.samples();
            let rects: Vec<_> = it.collect();

            let mut seen = HashSet::new();
            for r in &rects {
                assert!(
                    r.width == 1 || r.height == 1,
                    "run {r:?} is not one pixel thick"
                );
                for px in r.pixels() {
                    assert!(seen.insert(px), "pixel {px:?} covered twice");
                }
            }
            assert_eq!(seen.len() as u64, samples);
            assert!(seen.contains(&p(a.0, a.1)));
            assert!(seen.contains(&p(b.0, b.1)));
        }
    }

    #[test]
    fn test_fused() {
        let mut it = DiagonalRuns::new(p(0, 0), p(1, 1));
        assert!(it.next().is_some());
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_decompose_diagonal_counts_runs() {
        let mut acc = RectAccumulator::with_segments(1).unwrap();
        let n = decompose_diagonal(p(1, 1), p(5, 2), &mut acc).unwrap();
        assert_eq!(n, 2);
        assert_eq!(acc.len(), 2);
        assert_eq!(acc.growths(), 1);
    }
}
