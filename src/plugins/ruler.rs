//! Position ruler: the 1-based number of the line's first base plus tick marks.

use crate::model::error::PluginError;
use crate::view_state::element::{Element, Primitive};
use crate::view_state::metrics::StyleClass;
use crate::view_state::plugin::{RedrawContext, RendererPlugin};

/// Minimum horizontal distance between ticks.
const MIN_TICK_SPACING: i32 = 4;

/// Draws a ruler row: start label at the left, `|` at every tick position.
///
/// Ticks mark every tenth base (1-based numbering), or every hundredth and so on
/// when tenth-base ticks would be closer than a few units.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionRuler;

impl PositionRuler {
    fn tick_step(ctx: &RedrawContext<'_>) -> usize {
        let mut step = 10usize;
        while ctx.column_x(step) - ctx.column_x(0) < MIN_TICK_SPACING && step < ctx.zoom().get() {
            match step.checked_mul(10) {
                Some(next) => step = next,
                None => break,
            }
        }
        step
    }
}

impl RendererPlugin for PositionRuler {
    fn name(&self) -> &str {
        "ruler"
    }

    fn on_redraw(&mut self, ctx: &mut RedrawContext<'_>) -> Result<Vec<Element>, PluginError> {
        let range = ctx.range();
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let top = ctx.next_top();
        let metrics = ctx.metrics();
        let label = (range.start() + 1).to_string();
        let label_right = metrics.text_width(label.chars().count()) as i32;

        let mut element = Element::new();
        element.push(Primitive::text(0, top, label, StyleClass::Ruler, metrics));

        let step = Self::tick_step(ctx);
        if let Some(first_tick) = (range.start() / step + 1).checked_mul(step) {
            for tick in (first_tick..=range.end()).step_by(step) {
                // Tick sits on the base numbered `tick`, i.e. offset tick - 1.
                let x = ctx.offset_x(tick - 1);
                if x > label_right {
                    element.push(Primitive::text(x, top, "|", StyleClass::Ruler, metrics));
                }
            }
        }
        Ok(vec![element])
    }
}
