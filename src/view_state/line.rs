//! One displayed row of the sequence.

use super::element::Element;
use super::geometry::Translation;
use super::surface::ContentHandle;
use super::types::LineIndex;
use serde::Serialize;

/// Why the last redraw of a line fell back to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineFailure {
    /// Failed line.
    pub line: LineIndex,
    /// Name of the plugin that failed.
    pub plugin: String,
    /// Error text reported by the plugin.
    pub reason: String,
}

/// Layout state of one line.
///
/// A line starts dirty. Its elements and height describe what is on the surface only
/// while it is clean; a failed line keeps its placeholder drawn but stays dirty so
/// the next pass retries it.
#[derive(Debug)]
pub struct Line {
    index: LineIndex,
    translation: Translation,
    dirty: bool,
    elements: Vec<Element>,
    content: ContentHandle,
    height: u32,
    failure: Option<LineFailure>,
}

impl Line {
    /// New dirty line drawing into `content`.
    pub fn new(index: LineIndex, content: ContentHandle) -> Self {
        Self {
            index,
            translation: Translation::default(),
            dirty: true,
            elements: Vec::new(),
            content,
            height: 0,
            failure: None,
        }
    }

    /// Position of the line in the line array.
    pub fn index(&self) -> LineIndex {
        self.index
    }

    /// Origin everything on this line is drawn at.
    pub fn translation(&self) -> Translation {
        self.translation
    }

    /// Whether the line must be redrawn on the next pass.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the line for redraw. Returns true if it was clean.
    pub fn mark_dirty(&mut self) -> bool {
        !std::mem::replace(&mut self.dirty, true)
    }

    /// Elements drawn for this line, while it is clean.
    pub fn elements(&self) -> Option<&[Element]> {
        (!self.dirty).then_some(self.elements.as_slice())
    }

    /// Surface handle the line draws into.
    pub fn content(&self) -> ContentHandle {
        self.content
    }

    /// Laid-out height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Failure from the most recent redraw, if it fell back to a placeholder.
    pub fn failure(&self) -> Option<&LineFailure> {
        self.failure.as_ref()
    }

    /// Bottom edge of this line: translation plus height.
    pub fn bottom(&self) -> i32 {
        self.translation.y + self.height as i32
    }

    pub(crate) fn set_translation(&mut self, translation: Translation) {
        self.translation = translation;
    }

    /// Drop the elements of the previous generation, alongside clearing its surface
    /// content. Returns the dropped elements.
    pub(crate) fn clear_elements(&mut self) -> Vec<Element> {
        std::mem::take(&mut self.elements)
    }

    /// Store the result of a redraw.
    ///
    /// The line becomes clean unless the redraw failed.
    pub(crate) fn finish_redraw(
        &mut self,
        elements: Vec<Element>,
        height: u32,
        failure: Option<LineFailure>,
    ) {
        self.elements = elements;
        self.height = height;
        self.dirty = failure.is_some();
        self.failure = failure;
    }
}

/// Height of a line holding `elements`: the lowest bottom edge of any anchored element.
///
/// Elements must be snapped; unsnapped or floating elements are ignored.
pub fn content_height(elements: &[Element]) -> u32 {
    elements
        .iter()
        .filter(|e| e.is_anchored())
        .filter_map(Element::bounds)
        .map(|b| b.bottom.max(0) as u32)
        .max()
        .unwrap_or(0)
}
