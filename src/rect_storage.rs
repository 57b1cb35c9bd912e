//! Rectangle accumulator for one polyline.
//!
//! Starts with one slot per segment and grows one slot at a time when a
//! diagonal segment splits into more than one run. Growth is fallible: a
//! failed allocation or a configured size limit surfaces as a
//! [`DecomposeError`] so the caller can abandon the polyline instead of
//! submitting a partial result.

use crate::basics::Rectangle;
use crate::error::DecomposeError;

/// Ordered, growable rectangle list owned by a single decomposition.
#[derive(Debug, Default)]
pub struct RectAccumulator {
    rects: Vec<Rectangle>,
    limit: Option<usize>,
    growths: usize,
}

impl RectAccumulator {
    /// Reserve exactly one slot per segment.
    pub fn with_segments(segments: usize) -> Result<Self, DecomposeError> {
        let mut rects = Vec::new();
        rects.try_reserve_exact(segments)?;
        Ok(Self {
            rects,
            limit: None,
            growths: 0,
        })
    }

    /// Like [`with_segments`](Self::with_segments), but refuse to hold more
    /// than `limit` rectangles.
    pub fn with_limit(segments: usize, limit: usize) -> Result<Self, DecomposeError> {
        if segments > limit {
            return Err(DecomposeError::CapacityExceeded { limit });
        }
        let mut acc = Self::with_segments(segments)?;
        acc.limit = Some(limit);
        Ok(acc)
    }

    /// Append a rectangle, growing the storage by exactly one slot if full.
    pub fn push(&mut self, rect: Rectangle) -> Result<(), DecomposeError> {
        if let Some(limit) = self.limit {
            if self.rects.len() >= limit {
                return Err(DecomposeError::CapacityExceeded { limit });
            }
        }
        if self.rects.len() == self.rects.capacity() {
            self.rects.try_reserve_exact(1)?;
            self.growths += 1;
            log::trace!(
                "rect storage grown to {} slots ({} growths)",
                self.rects.capacity(),
                self.growths
            );
        }
        self.rects.push(rect);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Number of times the storage had to grow past its reservation.
    pub fn growths(&self) -> usize {
        self.growths
    }

    pub fn capacity(&self) -> usize {
        self.rects.capacity()
    }

    pub fn as_slice(&self) -> &[Rectangle] {
        &self.rects
    }

    /// Hand over the finished list.
    pub fn into_rects(self) -> Vec<Rectangle> {
        self.rects
    }
}
