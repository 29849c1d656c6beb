//! Renderer plugin boundary.
//!
//! Plugins produce the elements of a line when the layout engine redraws it. They
//! run in registration order, and each one sees the elements placed by the plugins
//! before it so it can stack below them.
//!
//! A plugin receives a [`RedrawContext`] and nothing else: it cannot reach the engine
//! and so cannot start a nested render pass. Invalidation requests made through the
//! context are queued and take effect after the current pass.

use super::element::Element;
use super::invalidation::InvalidationQueue;
use super::metrics::{DisplayMode, Metrics};
use super::types::{LineIndex, Zoom};
use crate::model::error::PluginError;
use crate::model::range::Range;
use crate::model::sequence::SequenceProvider;

/// Everything a plugin may read while drawing one line.
pub struct RedrawContext<'a> {
    pub(crate) line: LineIndex,
    pub(crate) range: Range,
    pub(crate) slice: &'a str,
    pub(crate) sequence: &'a dyn SequenceProvider,
    pub(crate) metrics: &'a Metrics,
    pub(crate) zoom: Zoom,
    pub(crate) mode: DisplayMode,
    pub(crate) placed: &'a [Element],
    pub(crate) requests: &'a mut InvalidationQueue,
}

impl<'a> RedrawContext<'a> {
    /// Line being drawn.
    pub fn line(&self) -> LineIndex {
        self.line
    }

    /// Forward-strand positions covered by the line.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Forward-strand text of the line.
    pub fn slice(&self) -> &'a str {
        self.slice
    }

    /// Whole sequence, for plugins that need context beyond the line.
    pub fn sequence(&self) -> &'a dyn SequenceProvider {
        self.sequence
    }

    /// Current metrics.
    pub fn metrics(&self) -> &'a Metrics {
        self.metrics
    }

    /// Positions per line.
    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    /// Text or bar drawing.
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Elements placed on this line by earlier plugins, snapped.
    pub fn placed(&self) -> &'a [Element] {
        self.placed
    }

    /// First free y below everything anchored so far.
    pub fn next_top(&self) -> i32 {
        self.placed
            .iter()
            .filter(|e| e.is_anchored())
            .filter_map(Element::bounds)
            .map(|b| b.bottom)
            .max()
            .unwrap_or(0)
            .max(0)
    }

    /// X position of a column within the line, in the current display mode.
    pub fn column_x(&self, column: usize) -> i32 {
        self.metrics.column_x(column, self.zoom, self.mode)
    }

    /// X position of sequence offset `offset`, clamped to this line.
    pub fn offset_x(&self, offset: usize) -> i32 {
        let column = offset.clamp(self.range.start(), self.range.end()) - self.range.start();
        self.column_x(column)
    }

    /// Ask for `line` to be redrawn on the next pass.
    pub fn request_invalidation(&mut self, line: LineIndex) {
        self.requests.push(line);
    }

    /// Ask for every line to be redrawn on the next pass.
    pub fn request_invalidate_all(&mut self) {
        self.requests.push_all();
    }
}

/// Draws part of every line.
pub trait RendererPlugin {
    /// Name used in logs and failure reports.
    fn name(&self) -> &str;

    /// Produce the elements this plugin contributes to `ctx.line()`.
    ///
    /// # Errors
    /// Any [`PluginError`]; the engine draws a placeholder for the line and retries
    /// it on the next pass.
    fn on_redraw(&mut self, ctx: &mut RedrawContext<'_>) -> Result<Vec<Element>, PluginError>;

    /// Called once at the end of every render pass with the new canvas height.
    fn on_render_complete(&mut self, _canvas_height: u32) {}
}
