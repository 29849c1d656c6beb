//! Invalidation controller: marks lines for redraw.
//!
//! Marking is cheap and never draws; the next render pass redraws exactly the
//! dirty lines. Requests raised by plugins during a pass are queued and applied
//! when the pass ends, so a pass never changes the dirty set it is iterating.

use super::line::Line;
use super::types::LineIndex;
use std::collections::BTreeSet;
use std::fmt;

/// What caused an invalidation, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    /// Caller asked for specific lines.
    Explicit,
    /// Positions per line changed.
    ZoomChanged,
    /// Viewport size changed.
    ViewportResized,
    /// The sequence was edited.
    SequenceEdited,
    /// The sequence was replaced.
    SequenceReplaced,
    /// The plugin set changed.
    PluginsChanged,
    /// A plugin asked for it during a render pass.
    PluginRequest,
}

impl fmt::Display for InvalidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidationReason::Explicit => "explicit",
            InvalidationReason::ZoomChanged => "zoom changed",
            InvalidationReason::ViewportResized => "viewport resized",
            InvalidationReason::SequenceEdited => "sequence edited",
            InvalidationReason::SequenceReplaced => "sequence replaced",
            InvalidationReason::PluginsChanged => "plugins changed",
            InvalidationReason::PluginRequest => "plugin request",
        };
        f.write_str(text)
    }
}

/// Mark one line dirty. Out-of-range indices are ignored.
///
/// Returns true if the line was clean.
pub fn invalidate(lines: &mut [Line], index: LineIndex) -> bool {
    match lines.get_mut(index.get()) {
        Some(line) => line.mark_dirty(),
        None => {
            tracing::trace!(line = %index, count = lines.len(), "invalidate ignored, no such line");
            false
        }
    }
}

/// Mark `first` and every following line dirty. Returns how many were clean.
pub fn invalidate_from(lines: &mut [Line], first: LineIndex) -> usize {
    lines
        .iter_mut()
        .skip(first.get())
        .filter_map(|line| line.mark_dirty().then_some(()))
        .count()
}

/// Mark every line dirty. Returns how many were clean.
pub fn invalidate_all(lines: &mut [Line]) -> usize {
    invalidate_from(lines, LineIndex::new(0))
}

/// Number of lines awaiting redraw.
pub fn dirty_count(lines: &[Line]) -> usize {
    lines.iter().filter(|line| line.is_dirty()).count()
}

/// Invalidations requested during a render pass, applied after it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvalidationQueue {
    lines: BTreeSet<LineIndex>,
    all: bool,
}

impl InvalidationQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one line.
    pub fn push(&mut self, line: LineIndex) {
        if !self.all {
            self.lines.insert(line);
        }
    }

    /// Queue every line.
    pub fn push_all(&mut self) {
        self.all = true;
        self.lines.clear();
    }

    /// Check if nothing is queued.
    pub fn is_empty(&self) -> bool {
        !self.all && self.lines.is_empty()
    }

    /// Apply queued requests to `lines` and empty the queue.
    ///
    /// Returns how many lines went from clean to dirty.
    pub fn apply(&mut self, lines: &mut [Line]) -> usize {
        let marked = if std::mem::take(&mut self.all) {
            invalidate_all(lines)
        } else {
            std::mem::take(&mut self.lines)
                .into_iter()
                .filter(|&index| invalidate(lines, index))
                .count()
        };
        if marked > 0 {
            tracing::debug!(
                marked,
                reason = %InvalidationReason::PluginRequest,
                "queued invalidations applied"
            );
        }
        marked
    }
}
