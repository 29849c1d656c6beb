//! Font metrics and the text-measurement boundary.
//!
//! Per-character width and line width are derived once per viewport change by measuring
//! a test string through a [`TextMeasurer`]. Everything else (column positions, display
//! mode) is computed from the resulting [`Metrics`].

use super::layout_params::LayoutConfig;
use super::types::{ViewportDimensions, Zoom};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// Visual style a piece of text or bar is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleClass {
    /// Forward-strand base letters.
    Sequence,
    /// Complement-strand base letters.
    Complement,
    /// Position labels and ticks.
    Ruler,
    /// Feature bars and labels.
    Feature,
    /// Stand-in for a line that failed to render.
    Placeholder,
}

/// Measured size of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    /// Width in canvas units.
    pub width: f32,
    /// Height in canvas units.
    pub height: u32,
}

/// External collaborator measuring rendered text.
pub trait TextMeasurer {
    /// Measure `text` as drawn with `style`.
    fn measure_width(&self, text: &str, style: StyleClass) -> TextExtent;
}

/// Measurer for fixed-width cells, using terminal column widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    cell_width: f32,
    cell_height: u32,
}

impl MonospaceMeasurer {
    /// Create a measurer with the given cell size.
    pub fn new(cell_width: f32, cell_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }
}

impl Default for MonospaceMeasurer {
    /// One unit per terminal cell.
    fn default() -> Self {
        Self::new(1.0, 1)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_width(&self, text: &str, _style: StyleClass) -> TextExtent {
        TextExtent {
            width: text.width() as f32 * self.cell_width,
            height: self.cell_height,
        }
    }
}

/// How a line's bases are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Individual letters; used when a full line of text fits the line width.
    Text,
    /// Proportional bars; used when letters would not fit.
    Bar,
}

/// Derived per-character and per-line metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    char_width: f32,
    char_height: u32,
    line_width: u32,
    viewport: ViewportDimensions,
}

impl Metrics {
    /// Measure the configured test string and derive metrics for `viewport`.
    pub fn measure(
        measurer: &dyn TextMeasurer,
        viewport: ViewportDimensions,
        config: &LayoutConfig,
    ) -> Self {
        let sample = if config.test_string.is_empty() {
            "M"
        } else {
            config.test_string.as_str()
        };
        let extent = measurer.measure_width(sample, StyleClass::Sequence);
        let char_width = extent.width / sample.chars().count() as f32;
        let line_width = viewport
            .width
            .saturating_sub(config.left_margin)
            .saturating_sub(config.right_margin);
        tracing::debug!(
            char_width,
            char_height = extent.height,
            line_width,
            "metrics recomputed"
        );
        Self {
            char_width,
            char_height: extent.height,
            line_width,
            viewport,
        }
    }

    /// Create metrics from known values.
    pub fn from_parts(char_width: f32, char_height: u32, line_width: u32) -> Self {
        Self {
            char_width,
            char_height,
            line_width,
            viewport: ViewportDimensions::new(line_width, 0),
        }
    }

    /// Width of one character.
    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    /// Height of one row of text.
    pub fn char_height(&self) -> u32 {
        self.char_height
    }

    /// Usable width of a line.
    pub fn line_width(&self) -> u32 {
        self.line_width
    }

    /// Viewport the metrics were derived for.
    pub fn viewport(&self) -> ViewportDimensions {
        self.viewport
    }

    /// Width of `chars` characters, rounded up.
    pub fn text_width(&self, chars: usize) -> u32 {
        (chars as f32 * self.char_width).ceil() as u32
    }

    /// Text mode when a full line of letters fits the line width, bar mode otherwise.
    pub fn display_mode(&self, zoom: Zoom) -> DisplayMode {
        if zoom.get() as f32 * self.char_width <= self.line_width as f32 {
            DisplayMode::Text
        } else {
            DisplayMode::Bar
        }
    }

    /// X position of `column` (0-based position within the line).
    pub fn column_x(&self, column: usize, zoom: Zoom, mode: DisplayMode) -> i32 {
        match mode {
            DisplayMode::Text => (column as f32 * self.char_width).round() as i32,
            DisplayMode::Bar => {
                let x = column as u128 * u128::from(self.line_width) / zoom.get() as u128;
                i32::try_from(x).unwrap_or(i32::MAX)
            }
        }
    }

    /// Column under x position `x`, clamped to the line's zoom window.
    pub fn column_at(&self, x: i32, zoom: Zoom, mode: DisplayMode) -> usize {
        if x <= 0 {
            return 0;
        }
        let column = match mode {
            DisplayMode::Text => {
                if self.char_width <= 0.0 {
                    0
                } else {
                    (x as f32 / self.char_width) as usize
                }
            }
            DisplayMode::Bar => {
                if self.line_width == 0 {
                    0
                } else {
                    let column = x as u128 * zoom.get() as u128 / u128::from(self.line_width);
                    usize::try_from(column).unwrap_or(usize::MAX)
                }
            }
        };
        column.min(zoom.get().saturating_sub(1))
    }
}
