//! Incremental layout engine.
//!
//! The engine owns one [`Line`] per `zoom` positions of the sequence. A render pass
//! walks the lines top to bottom, redraws the dirty ones through the registered
//! [`RendererPlugin`]s, and re-stacks every line below the running total of the
//! heights above it. Clean lines are never redrawn, only moved.
//!
//! # Invariants
//!
//! - `lines.len() == ceil(sequence_len / zoom)` after every pass.
//! - After a pass that was not cancelled: `lines[0].y == top_margin`,
//!   `lines[i].y == lines[i-1].y + lines[i-1].height`, and the canvas height is
//!   the last line's bottom plus `bottom_margin`.
//! - A line is clean only after a successful redraw; a failed line stays dirty.
//!
//! Plugins cannot reach the engine from inside a callback, so a render pass is
//! never re-entered. Their invalidation requests are applied when the pass ends.

use super::element::Element;
use super::geometry::Translation;
use super::height_index::HeightIndex;
use super::invalidation::{self, InvalidationQueue, InvalidationReason};
use super::layout_params::{LayoutConfig, LayoutParams};
use super::line::{content_height, Line, LineFailure};
use super::metrics::{DisplayMode, Metrics, TextMeasurer};
use super::plugin::{RedrawContext, RendererPlugin};
use super::report::{CancelToken, RenderReport};
use super::surface::Surface;
use super::types::{LineIndex, ViewportDimensions, Zoom};
use crate::model::range::Range;
use crate::model::sequence::SequenceProvider;
use tracing::{debug, trace, warn};

/// Lays out a sequence as a stack of lines on a [`Surface`].
pub struct LayoutEngine<S: Surface> {
    config: LayoutConfig,
    zoom: Zoom,
    measurer: Box<dyn TextMeasurer>,
    metrics: Metrics,
    params: LayoutParams,
    lines: Vec<Line>,
    heights: HeightIndex,
    plugins: Vec<Box<dyn RendererPlugin>>,
    pending: InvalidationQueue,
    surface: S,
    canvas_height: u32,
}

impl<S: Surface> LayoutEngine<S> {
    /// Create an engine with no lines and no plugins.
    pub fn new(
        config: LayoutConfig,
        viewport: ViewportDimensions,
        measurer: Box<dyn TextMeasurer>,
        surface: S,
    ) -> Self {
        let metrics = Metrics::measure(measurer.as_ref(), viewport, &config);
        let zoom = config.zoom;
        Self {
            canvas_height: config.top_margin + config.bottom_margin,
            config,
            zoom,
            measurer,
            metrics,
            params: LayoutParams::new(zoom, 0),
            lines: Vec::new(),
            heights: HeightIndex::default(),
            plugins: Vec::new(),
            pending: InvalidationQueue::new(),
            surface,
        }
    }

    /// Add a plugin after the existing ones. Every line is invalidated.
    pub fn register_plugin(&mut self, plugin: Box<dyn RendererPlugin>) {
        debug!(plugin = plugin.name(), "plugin registered");
        self.plugins.push(plugin);
        self.invalidate_all_because(InvalidationReason::PluginsChanged);
    }

    /// Names of registered plugins in call order.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Layout settings.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Positions per line.
    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    /// Current metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Text or bar drawing at the current zoom and width.
    pub fn display_mode(&self) -> DisplayMode {
        self.metrics.display_mode(self.zoom)
    }

    /// All lines in order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// One line, if it exists.
    pub fn line(&self, index: LineIndex) -> Option<&Line> {
        self.lines.get(index.get())
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of lines awaiting redraw.
    pub fn dirty_count(&self) -> usize {
        invalidation::dirty_count(&self.lines)
    }

    /// Canvas height set by the last pass.
    pub fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The drawing surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give up the engine, keeping the surface.
    pub fn into_surface(mut self) -> S {
        for line in self.lines.drain(..) {
            self.surface.release(line.content());
        }
        self.surface
    }

    /// Mark one line for redraw. Never renders; out-of-range indices are ignored.
    pub fn invalidate(&mut self, index: LineIndex) {
        if invalidation::invalidate(&mut self.lines, index) {
            trace!(line = %index, reason = %InvalidationReason::Explicit, "line invalidated");
        }
    }

    /// Mark every line for redraw. Never renders.
    pub fn invalidate_all(&mut self) {
        self.invalidate_all_because(InvalidationReason::Explicit);
    }

    fn invalidate_all_because(&mut self, reason: InvalidationReason) {
        let marked = invalidation::invalidate_all(&mut self.lines);
        debug!(marked, %reason, "all lines invalidated");
    }

    /// Match the line set to a sequence of `sequence_len` positions.
    ///
    /// Lines beyond the new count are dropped and their content released; new lines
    /// start dirty. When only the length changed, the line that held the old last
    /// position is invalidated too, since its slice may have grown or shrunk.
    pub fn sync_lines(&mut self, sequence_len: usize) {
        let params = LayoutParams::new(self.zoom, sequence_len);
        let target = params.line_count();
        if params == self.params && self.lines.len() == target {
            return;
        }

        if self.lines.len() > target {
            for line in self.lines.drain(target..) {
                self.surface.release(line.content());
            }
        }
        while self.lines.len() < target {
            let index = LineIndex::new(self.lines.len());
            let content = self.surface.acquire(index);
            self.lines.push(Line::new(index, content));
        }
        self.heights.resize(target);

        if params.zoom != self.params.zoom {
            self.invalidate_all_because(InvalidationReason::ZoomChanged);
        } else if self.params.sequence_len > 0 {
            let boundary = self.params.sequence_len.min(sequence_len).max(1) - 1;
            invalidation::invalidate(&mut self.lines, self.zoom.line_of(boundary));
        }

        debug!(
            lines = target,
            sequence_len,
            zoom = self.zoom.get(),
            "line set resized"
        );
        self.params = params;
    }

    /// Redraw every dirty line and re-stack all lines.
    pub fn render(&mut self, sequence: &dyn SequenceProvider) -> RenderReport {
        self.render_with_cancel(sequence, &CancelToken::default())
    }

    /// Like [`render`](Self::render), checking `cancel` before each line.
    ///
    /// A cancelled pass leaves the remaining lines as they were: dirty lines stay
    /// dirty, clean lines keep their old position.
    pub fn render_with_cancel(
        &mut self,
        sequence: &dyn SequenceProvider,
        cancel: &CancelToken,
    ) -> RenderReport {
        self.sync_lines(sequence.len());

        let mode = self.metrics.display_mode(self.zoom);
        let left = self.config.left_margin as i32;
        let mut report = RenderReport::default();
        let mut cumulative_y = self.config.top_margin as i32;

        for index in 0..self.lines.len() {
            if cancel.is_cancelled() {
                debug!(line = index, "render pass cancelled");
                report.cancelled = true;
                break;
            }

            let translation = Translation::new(left, cumulative_y);
            if self.lines[index].is_dirty() {
                self.redraw_line(index, translation, mode, sequence, &mut report);
            } else if self.lines[index].translation() != translation {
                let line = &mut self.lines[index];
                line.set_translation(translation);
                self.surface.translate(line.content(), translation);
            }
            cumulative_y = self.lines[index].bottom();
        }

        let content_bottom = self
            .lines
            .last()
            .map_or(self.config.top_margin as i32, Line::bottom);
        self.canvas_height = content_bottom.max(0) as u32 + self.config.bottom_margin;
        self.surface.set_canvas_height(self.canvas_height);
        for plugin in &mut self.plugins {
            plugin.on_render_complete(self.canvas_height);
        }
        self.pending.apply(&mut self.lines);

        report.line_count = self.lines.len();
        report.canvas_height = self.canvas_height;
        debug!(
            rendered = report.rendered.len(),
            failed = report.failed.len(),
            canvas_height = self.canvas_height,
            cancelled = report.cancelled,
            "render pass complete"
        );
        report
    }

    fn redraw_line(
        &mut self,
        index: usize,
        translation: Translation,
        mode: DisplayMode,
        sequence: &dyn SequenceProvider,
        report: &mut RenderReport,
    ) {
        let line_index = LineIndex::new(index);
        let start = self.zoom.line_start(line_index);
        let end = start.saturating_add(self.zoom.get()).min(sequence.len());
        let slice = sequence.slice(start, end);
        let content = self.lines[index].content();
        self.surface.clear(content);
        self.lines[index].clear_elements();

        let mut elements: Vec<Element> = Vec::new();
        let mut failure = None;
        for plugin in &mut self.plugins {
            let mut ctx = RedrawContext {
                line: line_index,
                range: Range::forward(start, end),
                slice: &slice,
                sequence,
                metrics: &self.metrics,
                zoom: self.zoom,
                mode,
                placed: &elements,
                requests: &mut self.pending,
            };
            match plugin.on_redraw(&mut ctx) {
                Ok(mut produced) => {
                    for element in &mut produced {
                        element.snap();
                    }
                    elements.extend(produced);
                }
                Err(err) => {
                    warn!(
                        line = index,
                        plugin = plugin.name(),
                        error = %err,
                        "line redraw failed, drawing placeholder"
                    );
                    failure = Some(LineFailure {
                        line: line_index,
                        plugin: plugin.name().to_string(),
                        reason: err.to_string(),
                    });
                    break;
                }
            }
        }

        if failure.is_some() {
            elements = vec![Element::placeholder(
                self.metrics.line_width(),
                self.config.placeholder_height,
            )];
        }

        let height = content_height(&elements);
        self.surface.draw(content, translation, &elements);
        trace!(line = index, elements = elements.len(), height, "line redrawn");

        let line = &mut self.lines[index];
        line.set_translation(translation);
        line.finish_redraw(elements, height, failure.clone());
        self.heights.set(index, height);

        report.rendered.push(line_index);
        report.failed.extend(failure);
    }

    /// Change positions per line, invalidate everything and render.
    ///
    /// Setting the current zoom again only renders.
    pub fn on_zoom_changed(&mut self, zoom: Zoom, sequence: &dyn SequenceProvider) -> RenderReport {
        if zoom != self.zoom {
            debug!(from = self.zoom.get(), to = zoom.get(), "zoom changed");
            self.zoom = zoom;
            self.sync_lines(sequence.len());
        }
        self.render(sequence)
    }

    /// Re-measure for a new viewport, invalidate everything and render.
    pub fn on_resize(
        &mut self,
        viewport: ViewportDimensions,
        sequence: &dyn SequenceProvider,
    ) -> RenderReport {
        self.metrics = Metrics::measure(self.measurer.as_ref(), viewport, &self.config);
        self.invalidate_all_because(InvalidationReason::ViewportResized);
        self.render(sequence)
    }

    /// Invalidate the line holding `edited.start()` and every line after it, then render.
    ///
    /// `edited` is in post-edit coordinates; lines before it keep their drawing.
    pub fn on_sequence_edit(
        &mut self,
        edited: &Range,
        sequence: &dyn SequenceProvider,
    ) -> RenderReport {
        self.sync_lines(sequence.len());
        let first = self.zoom.line_of(edited.start());
        let marked = invalidation::invalidate_from(&mut self.lines, first);
        debug!(
            first = %first,
            marked,
            reason = %InvalidationReason::SequenceEdited,
            "lines invalidated"
        );
        self.render(sequence)
    }

    /// Invalidate everything for a new sequence and render.
    pub fn on_sequence_replaced(&mut self, sequence: &dyn SequenceProvider) -> RenderReport {
        self.sync_lines(sequence.len());
        self.invalidate_all_because(InvalidationReason::SequenceReplaced);
        self.render(sequence)
    }

    /// Line drawn at canvas y position `y`.
    ///
    /// Valid once a pass has completed; zero-height lines are never hit.
    pub fn line_at_y(&self, y: i32) -> Option<LineIndex> {
        let offset = y.checked_sub(self.config.top_margin as i32)?;
        let offset = usize::try_from(offset).ok()?;
        self.heights.lower_bound(offset).map(LineIndex::new)
    }

    /// Sequence offset drawn at canvas point `(x, y)`.
    pub fn position_at(&self, x: i32, y: i32) -> Option<usize> {
        let line = self.line_at_y(y)?;
        let start = self.zoom.line_start(line);
        let column = self.metrics.column_at(
            x - self.config.left_margin as i32,
            self.zoom,
            self.display_mode(),
        );
        let last = self.params.sequence_len.checked_sub(1)?;
        Some((start + column).min(last))
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
