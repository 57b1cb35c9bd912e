//! Segment classification and the axis-aligned fast path.
//!
//! A horizontal or vertical segment (or a single point) already is a
//! rectangle; only diagonal segments need the run decomposer in
//! [`line_runs`](crate::line_runs).

use crate::basics::{PointI, Rectangle};

/// Shape class of a segment between two pixel positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Same row. Includes the degenerate single-pixel segment.
    HorizontalOrPoint,
    /// Same column, different rows.
    Vertical,
    /// Both coordinates differ.
    Diagonal,
}

impl SegmentKind {
    #[inline]
    pub fn classify(p1: PointI, p2: PointI) -> Self {
        if p1.y == p2.y {
            SegmentKind::HorizontalOrPoint
        } else if p1.x == p2.x {
            SegmentKind::Vertical
        } else {
            SegmentKind::Diagonal
        }
    }

    #[inline]
    pub fn is_axis_aligned(self) -> bool {
        self != SegmentKind::Diagonal
    }
}

/// The single rectangle covering an axis-aligned segment.
///
/// Only meaningful when [`SegmentKind::classify`] is not `Diagonal`; for a
/// diagonal segment this is the bounding box, not the line.
#[inline]
pub fn axis_aligned_rect(p1: PointI, p2: PointI) -> Rectangle {
    debug_assert!(SegmentKind::classify(p1, p2).is_axis_aligned());
    Rectangle::from_corners(p1, p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> PointI {
        PointI::new(x, y)
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            SegmentKind::classify(p(3, 3), p(3, 3)),
            SegmentKind::HorizontalOrPoint
        );
        assert_eq!(
            SegmentKind::classify(p(2, 2), p(6, 2)),
            SegmentKind::HorizontalOrPoint
        );
        assert_eq!(
            SegmentKind::classify(p(2, 2), p(2, 6)),
            SegmentKind::Vertical
        );
        assert_eq!(
            SegmentKind::classify(p(1, 1), p(5, 2)),
            SegmentKind::Diagonal
        );
        assert_eq!(
            SegmentKind::classify(p(-1, 0), p(0, -1)),
            SegmentKind::Diagonal
        );
    }

    #[test]
    fn test_single_pixel() {
        assert_eq!(
            axis_aligned_rect(p(3, 3), p(3, 3)),
            Rectangle::new(3, 3, 1, 1)
        );
    }

    #[test]
    fn test_vertical() {
        assert_eq!(
            axis_aligned_rect(p(2, 2), p(2, 6)),
            Rectangle::new(2, 2, 1, 5)
        );
        assert_eq!(
            axis_aligned_rect(p(2, 6), p(2, 2)),
            Rectangle::new(2, 2, 1, 5)
        );
    }

    #[test]
    fn test_horizontal() {
        assert_eq!(
            axis_aligned_rect(p(2, 2), p(6, 2)),
            Rectangle::new(2, 2, 5, 1)
        );
        assert_eq!(
            axis_aligned_rect(p(6, 2), p(2, 2)),
            Rectangle::new(2, 2, 5, 1)
        );
    }

    #[test]
    fn test_negative_coordinates() {
        assert_eq!(
            axis_aligned_rect(p(-4, -1), p(-9, -1)),
            Rectangle::new(-9, -1, 6, 1)
        );
    }
}
