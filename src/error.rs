//! Errors raised while decomposing a polyline.
//!
//! None of these reach callers of
//! [`PolyLines::decompose_and_fill`](crate::poly_lines::PolyLines::decompose_and_fill):
//! the driver answers every one of them by handing the untouched polyline to
//! the fallback rasterizer. They are visible through
//! [`decompose_polyline`](crate::poly_lines::decompose_polyline).

use std::collections::TryReserveError;

use thiserror::Error;

/// Reasons a decomposition had to be abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecomposeError {
    /// Growing the rectangle storage failed.
    #[error("couldn't grow rectangle storage")]
    Alloc(#[from] TryReserveError),
    /// The polyline needs more rectangles than the configured limit.
    #[error("polyline needs more than {limit} rectangles")]
    CapacityExceeded { limit: usize },
    /// Accumulating relative coordinates left the `i32` range.
    #[error("relative coordinates overflow at point {index}")]
    CoordinateOverflow { index: usize },
    /// A segment spans all 2^32 columns or rows, more than a [`Rectangle`]
    /// extent can hold.
    ///
    /// [`Rectangle`]: crate::basics::Rectangle
    #[error("segment ending at point {index} is too long for a rectangle")]
    ExtentOverflow { index: usize },
}
