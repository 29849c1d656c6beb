//! Core view-state newtypes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// Line index within the document. 0-indexed internally, 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct LineIndex(usize);

impl LineIndex {
    /// Create a new LineIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Get the 1-based index for display purposes.
    pub fn display(&self) -> usize {
        self.0 + 1
    }

    /// Get the next line index.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<usize> for LineIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for LineIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of sequence positions represented per line. Always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize")]
pub struct Zoom(NonZeroUsize);

/// Error returned when attempting to create a zoom level of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("zoom level must be >= 1 position per line")]
pub struct InvalidZoom;

impl Zoom {
    /// Smart constructor that validates zoom is >= 1.
    pub fn new(positions_per_line: usize) -> Result<Self, InvalidZoom> {
        NonZeroUsize::new(positions_per_line)
            .map(Self)
            .ok_or(InvalidZoom)
    }

    /// Positions per line.
    pub fn get(&self) -> usize {
        self.0.get()
    }

    /// Number of lines needed for `len` positions: `ceil(len / zoom)`.
    pub fn line_count(&self, len: usize) -> usize {
        len.div_ceil(self.get())
    }

    /// Line containing sequence offset `offset`.
    pub fn line_of(&self, offset: usize) -> LineIndex {
        LineIndex::new(offset / self.get())
    }

    /// First sequence offset shown on `line`.
    pub fn line_start(&self, line: LineIndex) -> usize {
        line.get().saturating_mul(self.get())
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(NonZeroUsize::new(60).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<usize> for Zoom {
    type Error = InvalidZoom;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Viewport dimensions in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewportDimensions {
    /// Width of the drawable area.
    pub width: u32,
    /// Height of the visible area.
    pub height: u32,
}

impl ViewportDimensions {
    /// Create new viewport dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod zoom {
        use super::*;

        #[test]
        fn zero_is_rejected() {
            assert_eq!(Zoom::new(0), Err(InvalidZoom));
        }

        #[test]
        fn line_count_rounds_up() {
            let zoom = Zoom::new(10).unwrap();
            assert_eq!(zoom.line_count(0), 0);
            assert_eq!(zoom.line_count(1), 1);
            assert_eq!(zoom.line_count(10), 1);
            assert_eq!(zoom.line_count(11), 2);
            assert_eq!(zoom.line_count(100), 10);
        }

        #[test]
        fn line_of_and_line_start_agree() {
            let zoom = Zoom::new(7).unwrap();
            assert_eq!(zoom.line_of(0), LineIndex::new(0));
            assert_eq!(zoom.line_of(6), LineIndex::new(0));
            assert_eq!(zoom.line_of(7), LineIndex::new(1));
            assert_eq!(zoom.line_start(LineIndex::new(3)), 21);
        }

        #[test]
        fn default_is_sixty() {
            assert_eq!(Zoom::default().get(), 60);
        }
    }

    mod line_index {
        use super::*;

        #[test]
        fn display_is_one_based() {
            assert_eq!(LineIndex::new(0).display(), 1);
            assert_eq!(LineIndex::new(4).display(), 5);
        }

        #[test]
        fn next_increments() {
            assert_eq!(LineIndex::new(2).next(), LineIndex::new(3));
        }
    }
}
