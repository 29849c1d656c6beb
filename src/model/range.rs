//! Internal coordinate type: 0-based, half-open, strand-aware.

use super::error::RangeError;
use serde::Serialize;
use std::fmt;

/// Strand orientation of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Forward (top) strand.
    #[default]
    Forward,
    /// Reverse-complement (bottom) strand.
    Reverse,
}

impl Orientation {
    /// The opposite strand.
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Check if this is the reverse strand.
    pub fn is_reverse(self) -> bool {
        self == Self::Reverse
    }
}

/// A 0-based, half-open interval with an explicit strand orientation.
///
/// # Invariants
/// - `start <= end` (enforced at construction, endpoints are swapped if needed)
/// - Orientation is always known after construction
///
/// Ranges are immutable: every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    start: usize,
    end: usize,
    orientation: Orientation,
}

impl Range {
    /// Build a range from already-ordered, non-negative offsets.
    ///
    /// Endpoints are swapped if given out of order; the orientation is kept as supplied.
    pub fn new(start: usize, end: usize, orientation: Orientation) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
            orientation,
        }
    }

    /// Forward range over `start..end`.
    pub fn forward(start: usize, end: usize) -> Self {
        Self::new(start, end, Orientation::Forward)
    }

    /// Reverse range over `start..end`.
    pub fn reverse(start: usize, end: usize) -> Self {
        Self::new(start, end, Orientation::Reverse)
    }

    /// Smart constructor from raw endpoints.
    ///
    /// With no explicit orientation, `start > end` swaps the endpoints and yields a
    /// reverse range; otherwise the range is forward. With an explicit orientation the
    /// endpoints are still normalized but the orientation is kept.
    ///
    /// # Errors
    /// [`RangeError::Negative`] if either endpoint is below zero.
    ///
    /// # Examples
    /// ```
    /// # use seqcanvas::model::{Orientation, Range};
    /// let r = Range::from_endpoints(154, 132, None).unwrap();
    /// assert_eq!((r.start(), r.end(), r.orientation()), (132, 154, Orientation::Reverse));
    /// ```
    pub fn from_endpoints(
        start: i64,
        end: i64,
        orientation: Option<Orientation>,
    ) -> Result<Self, RangeError> {
        if start < 0 || end < 0 {
            return Err(RangeError::Negative { start, end });
        }
        let inferred = if start > end {
            Orientation::Reverse
        } else {
            Orientation::Forward
        };
        let orientation = orientation.unwrap_or(inferred);
        // Both values are known non-negative here.
        Ok(Self::new(start as usize, end as usize, orientation))
    }

    /// Inclusive start offset.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Strand orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Check if the range lies on the reverse strand.
    pub fn is_reverse(&self) -> bool {
        self.orientation.is_reverse()
    }

    /// Number of positions covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the range covers no positions (an insertion point).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if `offset` lies within `start..end`.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check if two ranges share at least one position, ignoring orientation.
    pub fn intersects(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Positions shared with `other`, keeping this range's orientation.
    pub fn intersection(&self, other: &Range) -> Option<Range> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self::new(
            self.start.max(other.start),
            self.end.min(other.end),
            self.orientation,
        ))
    }

    /// Same positions on the opposite strand.
    pub fn flipped(&self) -> Self {
        Self::new(self.start, self.end, self.orientation.flipped())
    }

    /// Range moved by `delta` positions.
    ///
    /// # Errors
    /// [`RangeError::Negative`] if the move would cross offset zero.
    pub fn shifted(&self, delta: i64) -> Result<Self, RangeError> {
        Self::from_endpoints(
            self.start as i64 + delta,
            self.end as i64 + delta,
            Some(self.orientation),
        )
    }

    /// Check the range fits inside a sequence of `len` positions.
    ///
    /// # Errors
    /// [`RangeError::OutOfBounds`] if `end > len`.
    pub fn check_bounds(&self, len: usize) -> Result<(), RangeError> {
        if self.end > len {
            return Err(RangeError::OutOfBounds {
                start: self.start,
                end: self.end,
                len,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strand = match self.orientation {
            Orientation::Forward => '+',
            Orientation::Reverse => '-',
        };
        write!(f, "[{}, {}) {}", self.start, self.end, strand)
    }
}
