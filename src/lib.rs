//! # polyline-rects
//!
//! Draws thin solid polylines as rectangle fills.
//!
//! Many targets fill rectangles far faster than they rasterize lines pixel
//! by pixel. This crate splits a polyline into the smallest set of
//! axis-aligned rectangles whose union is exactly the set of pixels a
//! per-pixel rasterizer would paint, and submits them in one batch:
//!
//! - horizontal and vertical segments (and single points) become one
//!   rectangle each;
//! - diagonal segments are marched one pixel at a time along their dominant
//!   axis, and every run of samples sharing a row (or column) becomes one
//!   rectangle.
//!
//! Requests the rectangle path can't express (wide lines, dashed lines) and
//! decompositions that run out of storage go to the target's fallback
//! rasterizer with the original points instead.
//!
//! ## Layout
//!
//! 1. [`line_segment`]: segment classification, axis-aligned fast path
//! 2. [`line_runs`]: diagonal run decomposition
//! 3. [`rect_storage`]: per-polyline rectangle accumulator
//! 4. [`poly_lines`]: the driver and the [`LineTarget`](poly_lines::LineTarget) seam
//! 5. [`line_rasterizer`], [`surface`]: reference rasterizer and a software target

// Foundation
pub mod basics;
pub mod color;
pub mod error;
pub mod line_context;

// Decomposition
pub mod line_runs;
pub mod line_segment;
pub mod poly_lines;
pub mod rect_storage;

// Reference rendering
pub mod line_rasterizer;
pub mod surface;
