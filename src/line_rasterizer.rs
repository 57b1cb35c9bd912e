//! Per-pixel reference line rasterizer.
//!
//! Plots thin solid lines one pixel at a time. It samples exactly like the
//! run decomposer (unit steps along the dominant axis, starting from the end
//! with the smaller dominant coordinate, rounding half away from zero), but
//! never merges anything, which makes it slow and easy to trust. The
//! software [`Surface`](crate::surface::Surface) uses it as its fallback.

use crate::basics::{cross_offset, CoordMode, PointI};

/// Plot every pixel of the segment `p1`–`p2`, both ends included.
pub fn rasterize_line<F: FnMut(i32, i32)>(p1: PointI, p2: PointI, mut plot: F) {
    let dx = p1.x.abs_diff(p2.x) as u64;
    let dy = p1.y.abs_diff(p2.y) as u64;

    if dy > dx {
        // Steep: one pixel per row.
        let (a, b) = if p1.y <= p2.y { (p1, p2) } else { (p2, p1) };
        let rise = b.x as i64 - a.x as i64;
        for i in 0..=dy {
            let y = (a.y as i64 + i as i64) as i32;
            let x = (a.x as i64 + cross_offset(i, rise, dy)) as i32;
            plot(x, y);
        }
    } else {
        // Shallow: one pixel per column.
        let (a, b) = if p1.x <= p2.x { (p1, p2) } else { (p2, p1) };
        let rise = b.y as i64 - a.y as i64;
        for i in 0..=dx {
            let x = (a.x as i64 + i as i64) as i32;
            let y = (a.y as i64 + cross_offset(i, rise, dx)) as i32;
            plot(x, y);
        }
    }
}

/// Plot every segment of a polyline.
///
/// Relative coordinates wrap on overflow; the rasterizer has no way to
/// refuse a request.
pub fn rasterize_poly_line<F: FnMut(i32, i32)>(
    mode: CoordMode,
    points: &[PointI],
    mut plot: F,
) {
    let Some((&first, rest)) = points.split_first() else {
        return;
    };
    let mut prev = first;
    for &pt in rest {
        let next = match mode {
            CoordMode::Origin => pt,
            CoordMode::Previous => {
                PointI::new(prev.x.wrapping_add(pt.x), prev.y.wrapping_add(pt.y))
            }
        };
        rasterize_line(prev, next, &mut plot);
        prev = next;
    }
}
