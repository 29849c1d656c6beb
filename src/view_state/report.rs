//! Render pass outcome and cancellation.

use super::line::LineFailure;
use super::types::LineIndex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Outcome of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RenderReport {
    /// Lines that were redrawn, in order.
    pub rendered: Vec<LineIndex>,
    /// Lines whose redraw fell back to a placeholder.
    pub failed: Vec<LineFailure>,
    /// Lines in the line set after the pass.
    pub line_count: usize,
    /// Canvas height after the pass.
    pub canvas_height: u32,
    /// Whether the pass stopped early.
    pub cancelled: bool,
}

impl RenderReport {
    /// Check if the pass redrew nothing.
    pub fn is_noop(&self) -> bool {
        self.rendered.is_empty() && !self.cancelled
    }

    /// Check if every redraw succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Shared flag a caller can set to stop a render pass between lines.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// New, unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
