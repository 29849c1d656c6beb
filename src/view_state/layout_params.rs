//! Layout configuration and the parameters that decide the line set.

use super::types::Zoom;
use serde::{Deserialize, Serialize};

/// Test string measured to derive the per-character width.
pub const DEFAULT_TEST_STRING: &str = "ACGTACGTAC";

/// Static layout settings supplied by configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Space above the first line.
    pub top_margin: u32,
    /// Space below the last line.
    pub bottom_margin: u32,
    /// Space left of every line.
    pub left_margin: u32,
    /// Space right of every line.
    pub right_margin: u32,
    /// Initial positions per line.
    pub zoom: Zoom,
    /// Height of the stand-in drawn for a line whose plugin failed.
    pub placeholder_height: u32,
    /// Text measured to derive character width.
    pub test_string: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            top_margin: 0,
            bottom_margin: 0,
            left_margin: 0,
            right_margin: 0,
            zoom: Zoom::default(),
            placeholder_height: 1,
            test_string: DEFAULT_TEST_STRING.to_string(),
        }
    }
}

/// Parameters that determine how many lines exist and what each covers.
///
/// Two LayoutParams are equal if they produce the same line set. When the current
/// params differ from the ones the lines were built for, the line array is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    /// Positions per line.
    pub zoom: Zoom,
    /// Sequence length.
    pub sequence_len: usize,
}

impl LayoutParams {
    /// Create new layout params.
    pub fn new(zoom: Zoom, sequence_len: usize) -> Self {
        Self { zoom, sequence_len }
    }

    /// Number of lines these params produce.
    pub fn line_count(&self) -> usize {
        self.zoom.line_count(self.sequence_len)
    }
}
