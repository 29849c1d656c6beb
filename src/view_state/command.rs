//! Events the layout engine reacts to.
//!
//! Hosts that receive editor notifications as messages translate them into
//! [`EngineCommand`]s and hand them to [`LayoutEngine::dispatch`].

use super::engine::LayoutEngine;
use super::report::RenderReport;
use super::surface::Surface;
use super::types::{LineIndex, ViewportDimensions, Zoom};
use crate::model::range::Range;
use crate::model::sequence::{SequenceEdit, SequenceProvider};

/// A notification for the layout engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Mark one line dirty.
    Invalidate(LineIndex),
    /// Mark every line dirty.
    InvalidateAll,
    /// Redraw dirty lines.
    Render,
    /// Positions per line changed.
    ZoomChanged(Zoom),
    /// Viewport size changed.
    Resize(ViewportDimensions),
    /// The sequence was edited; the range is in post-edit coordinates.
    SequenceEdited(Range),
    /// The sequence was replaced wholesale.
    SequenceReplaced,
}

impl From<SequenceEdit> for EngineCommand {
    fn from(edit: SequenceEdit) -> Self {
        EngineCommand::SequenceEdited(edit.range)
    }
}

impl EngineCommand {
    /// Whether handling this command runs a render pass.
    pub fn renders(&self) -> bool {
        !matches!(
            self,
            EngineCommand::Invalidate(_) | EngineCommand::InvalidateAll
        )
    }
}

impl<S: Surface> LayoutEngine<S> {
    /// Handle one command. Returns the render report if the command rendered.
    pub fn dispatch(
        &mut self,
        command: EngineCommand,
        sequence: &dyn SequenceProvider,
    ) -> Option<RenderReport> {
        tracing::trace!(?command, "dispatch");
        match command {
            EngineCommand::Invalidate(line) => {
                self.invalidate(line);
                None
            }
            EngineCommand::InvalidateAll => {
                self.invalidate_all();
                None
            }
            EngineCommand::Render => Some(self.render(sequence)),
            EngineCommand::ZoomChanged(zoom) => Some(self.on_zoom_changed(zoom, sequence)),
            EngineCommand::Resize(viewport) => Some(self.on_resize(viewport, sequence)),
            EngineCommand::SequenceEdited(range) => Some(self.on_sequence_edit(&range, sequence)),
            EngineCommand::SequenceReplaced => Some(self.on_sequence_replaced(sequence)),
        }
    }
}
