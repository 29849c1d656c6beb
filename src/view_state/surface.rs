//! Drawing surface boundary.
//!
//! The layout engine never draws directly. Each line owns one content handle on a
//! [`Surface`]; the engine clears a line's previous content before drawing the next
//! generation and releases the handle when the line is discarded.

use super::element::Element;
use super::geometry::Translation;
use super::types::LineIndex;
use serde::Serialize;
use std::collections::HashMap;

/// Opaque identifier of one line's drawn content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ContentHandle(u64);

impl ContentHandle {
    /// Wrap a raw handle value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw handle value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Destination for drawn lines.
pub trait Surface {
    /// Allocate a content container for `line`.
    fn acquire(&mut self, line: LineIndex) -> ContentHandle;

    /// Drop everything drawn into `handle`, keeping the handle.
    fn clear(&mut self, handle: ContentHandle);

    /// Draw `elements` into `handle` at `origin`.
    fn draw(&mut self, handle: ContentHandle, origin: Translation, elements: &[Element]);

    /// Move already drawn content to a new origin.
    fn translate(&mut self, handle: ContentHandle, origin: Translation);

    /// Free `handle` and anything drawn into it.
    fn release(&mut self, handle: ContentHandle);

    /// Resize the canvas to `height`.
    fn set_canvas_height(&mut self, height: u32);
}

/// Allocates sequential handles for surfaces that keep per-handle state.
#[derive(Debug, Default, Clone)]
pub(crate) struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub(crate) fn allocate(&mut self) -> ContentHandle {
        let handle = ContentHandle(self.next);
        self.next += 1;
        handle
    }
}

/// Surface that discards everything.
#[derive(Debug, Default, Clone)]
pub struct NullSurface {
    handles: HandleAllocator,
}

impl NullSurface {
    /// Create a null surface.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for NullSurface {
    fn acquire(&mut self, _line: LineIndex) -> ContentHandle {
        self.handles.allocate()
    }

    fn clear(&mut self, _handle: ContentHandle) {}

    fn draw(&mut self, _handle: ContentHandle, _origin: Translation, _elements: &[Element]) {}

    fn translate(&mut self, _handle: ContentHandle, _origin: Translation) {}

    fn release(&mut self, _handle: ContentHandle) {}

    fn set_canvas_height(&mut self, _height: u32) {}
}

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    /// `acquire` for a line.
    Acquire(LineIndex, ContentHandle),
    /// `clear`.
    Clear(ContentHandle),
    /// `draw` with the number of elements drawn.
    Draw(ContentHandle, Translation, usize),
    /// `translate`.
    Translate(ContentHandle, Translation),
    /// `release`.
    Release(ContentHandle),
    /// `set_canvas_height`.
    CanvasHeight(u32),
}

/// Content currently held by a live handle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordedContent {
    /// Origin of the drawn content.
    pub origin: Translation,
    /// Elements drawn since the last clear.
    pub elements: Vec<Element>,
}

/// Surface that records every call, for tests and diagnostics.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    handles: HandleAllocator,
    live: HashMap<ContentHandle, RecordedContent>,
    ops: Vec<SurfaceOp>,
    canvas_height: u32,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls in order.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Forget recorded calls, keeping live content.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of handles acquired and not yet released.
    pub fn live_handles(&self) -> usize {
        self.live.len()
    }

    /// Content of a live handle.
    pub fn content(&self, handle: ContentHandle) -> Option<&RecordedContent> {
        self.live.get(&handle)
    }

    /// Last canvas height set.
    pub fn canvas_height(&self) -> u32 {
        self.canvas_height
    }
}

impl Surface for RecordingSurface {
    fn acquire(&mut self, line: LineIndex) -> ContentHandle {
        let handle = self.handles.allocate();
        self.live.insert(handle, RecordedContent::default());
        self.ops.push(SurfaceOp::Acquire(line, handle));
        handle
    }

    fn clear(&mut self, handle: ContentHandle) {
        if let Some(content) = self.live.get_mut(&handle) {
            content.elements.clear();
        }
        self.ops.push(SurfaceOp::Clear(handle));
    }

    fn draw(&mut self, handle: ContentHandle, origin: Translation, elements: &[Element]) {
        if let Some(content) = self.live.get_mut(&handle) {
            content.origin = origin;
            content.elements.extend_from_slice(elements);
        }
        self.ops
            .push(SurfaceOp::Draw(handle, origin, elements.len()));
    }

    fn translate(&mut self, handle: ContentHandle, origin: Translation) {
        if let Some(content) = self.live.get_mut(&handle) {
            content.origin = origin;
        }
        self.ops.push(SurfaceOp::Translate(handle, origin));
    }

    fn release(&mut self, handle: ContentHandle) {
        self.live.remove(&handle);
        self.ops.push(SurfaceOp::Release(handle));
    }

    fn set_canvas_height(&mut self, height: u32) {
        self.canvas_height = height;
        self.ops.push(SurfaceOp::CanvasHeight(height));
    }
}
