//! Base letters for the forward strand and its complement.

use crate::model::error::{PluginError, SymbolError};
use crate::model::iupac::complement;
use crate::view_state::element::{Element, Primitive};
use crate::view_state::geometry::BoundingBox;
use crate::view_state::metrics::{DisplayMode, StyleClass};
use crate::view_state::plugin::{RedrawContext, RendererPlugin};

/// Draws the forward strand: letters in text mode, one proportional bar in bar mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequenceGlyphs;

impl RendererPlugin for SequenceGlyphs {
    fn name(&self) -> &str {
        "sequence"
    }

    fn on_redraw(&mut self, ctx: &mut RedrawContext<'_>) -> Result<Vec<Element>, PluginError> {
        if ctx.slice().is_empty() {
            return Ok(Vec::new());
        }
        let top = ctx.next_top();
        let primitive = match ctx.mode() {
            DisplayMode::Text => {
                Primitive::text(0, top, ctx.slice(), StyleClass::Sequence, ctx.metrics())
            }
            DisplayMode::Bar => {
                let right = ctx.column_x(ctx.slice().len()).max(1);
                Primitive::bar(
                    BoundingBox::new(0, top, right, top + ctx.metrics().char_height() as i32),
                    StyleClass::Sequence,
                )
            }
        };
        Ok(vec![Element::with_primitive(primitive)])
    }
}

/// Draws complement letters under the forward strand, in text mode only.
///
/// A symbol without a complement fails the line; the error names its sequence offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComplementStrand;

impl RendererPlugin for ComplementStrand {
    fn name(&self) -> &str {
        "complement"
    }

    fn on_redraw(&mut self, ctx: &mut RedrawContext<'_>) -> Result<Vec<Element>, PluginError> {
        if ctx.mode() != DisplayMode::Text || ctx.slice().is_empty() {
            return Ok(Vec::new());
        }
        let start = ctx.range().start();
        let text = complement(ctx.slice()).map_err(|err| match err {
            SymbolError::Unsupported { symbol, position } => SymbolError::Unsupported {
                symbol,
                position: start + position,
            },
        })?;
        Ok(vec![Element::with_primitive(Primitive::text(
            0,
            ctx.next_top(),
            text,
            StyleClass::Complement,
            ctx.metrics(),
        ))])
    }
}
