//! Annotation bars, stacked so that no two bars on a line overlap.

use crate::model::annotation::Annotation;
use crate::model::error::PluginError;
use crate::view_state::element::{Element, Primitive};
use crate::view_state::geometry::BoundingBox;
use crate::view_state::metrics::{DisplayMode, StyleClass};
use crate::view_state::plugin::{RedrawContext, RendererPlugin};

/// Draws one bar per annotation crossing the line.
///
/// Bars start on the first free row below earlier plugins' output and move down a
/// row until they overlap no bar already placed on this line. The strand is marked
/// with `>` at the end of a forward feature and `<` at the start of a reverse one.
/// In text mode the feature name is written on the bar when it fits.
#[derive(Debug, Clone, Default)]
pub struct FeatureBars {
    features: Vec<Annotation>,
}

impl FeatureBars {
    /// Plugin drawing `features`, in the given order.
    pub fn new(features: Vec<Annotation>) -> Self {
        Self { features }
    }

    /// Features drawn by this plugin.
    pub fn features(&self) -> &[Annotation] {
        &self.features
    }
}

impl RendererPlugin for FeatureBars {
    fn name(&self) -> &str {
        "features"
    }

    fn on_redraw(&mut self, ctx: &mut RedrawContext<'_>) -> Result<Vec<Element>, PluginError> {
        let line = ctx.range();
        let metrics = ctx.metrics();
        let row_height = metrics.char_height().max(1) as i32;
        let base = ctx.next_top();
        let mut placed: Vec<BoundingBox> = Vec::new();
        let mut elements = Vec::new();

        for feature in &self.features {
            let Some(visible) = feature.range().intersection(&line) else {
                continue;
            };
            if visible.is_empty() {
                continue;
            }
            let left = ctx.offset_x(visible.start());
            let right = ctx.offset_x(visible.end()).max(left + 1);

            let mut top = base;
            let mut bounds = BoundingBox::new(left, top, right, top + row_height);
            while placed.iter().any(|other| other.overlaps(&bounds)) {
                top += row_height;
                bounds = BoundingBox::new(left, top, right, top + row_height);
            }
            placed.push(bounds);

            let mut element = Element::with_primitive(Primitive::bar(bounds, StyleClass::Feature));
            let reverse = feature.range().is_reverse();
            let width = (right - left) as usize;
            if reverse && visible.start() == feature.range().start() {
                element.push(Primitive::text(left, top, "<", StyleClass::Feature, metrics));
            }
            if !reverse && visible.end() == feature.range().end() {
                element.push(Primitive::text(right - 1, top, ">", StyleClass::Feature, metrics));
            }
            let name_len = feature.name().chars().count();
            if ctx.mode() == DisplayMode::Text && name_len + 2 <= width {
                let x = left + metrics.text_width(1) as i32;
                element.push(Primitive::text(x, top, feature.name(), StyleClass::Feature, metrics));
            }
            elements.push(element);
        }

        tracing::trace!(line = %ctx.line(), bars = elements.len(), "feature bars placed");
        Ok(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::range::Range;
    use crate::model::sequence::Sequence;
    use crate::plugins::SequenceGlyphs;
    use crate::view::AsciiSurface;
    use crate::view_state::engine::LayoutEngine;
    use crate::view_state::layout_params::LayoutConfig;
    use crate::view_state::metrics::MonospaceMeasurer;
    use crate::view_state::types::{ViewportDimensions, Zoom};

    fn engine(features: Vec<Annotation>) -> LayoutEngine<AsciiSurface> {
        let mut engine = LayoutEngine::new(
            LayoutConfig {
                zoom: Zoom::new(10).unwrap(),
                ..LayoutConfig::default()
            },
            ViewportDimensions::new(10, 10),
            Box::new(MonospaceMeasurer::default()),
            AsciiSurface::new(10),
        );
        engine.register_plugin(Box::new(SequenceGlyphs));
        engine.register_plugin(Box::new(FeatureBars::new(features)));
        engine
    }

    #[test]
    fn forward_feature_gets_arrow_and_label() {
        let mut engine = engine(vec![Annotation::new("lac", Range::forward(1, 9))]);
        engine.render(&Sequence::new("ACGTACGTAC").unwrap());
        assert_eq!(engine.surface().rows(), vec!["ACGTACGTAC", " #lac###>"]);
    }

    #[test]
    fn reverse_feature_arrow_at_start() {
        let mut engine = engine(vec![Annotation::new("r", Range::reverse(2, 6))]);
        engine.render(&Sequence::new("ACGTACGTAC").unwrap());
        assert_eq!(engine.surface().rows(), vec!["ACGTACGTAC", "  <r##"]);
    }

    #[test]
    fn overlapping_features_stack_touching_features_share_a_row() {
        let mut engine = engine(vec![
            Annotation::new("a", Range::forward(0, 4)),
            Annotation::new("b", Range::forward(2, 6)),
            Annotation::new("c", Range::forward(4, 8)),
        ]);
        engine.render(&Sequence::new("ACGTACGTAC").unwrap());
        assert_eq!(
            engine.surface().rows(),
            vec!["ACGTACGTAC", "#a#>#c#>", "  #b#>"]
        );
        assert_eq!(engine.lines()[0].height(), 3);
    }

    #[test]
    fn feature_crossing_lines_is_split() {
        let mut engine = engine(vec![Annotation::new("span", Range::forward(6, 14))]);
        engine.render(&Sequence::new("ACGTACGTACGTACGTACGT").unwrap());
        assert_eq!(
            engine.surface().rows(),
            vec!["ACGTACGTAC", "      ####", "ACGTACGTAC", "###>"]
        );
    }

    #[test]
    fn features_outside_line_add_no_height() {
        let mut engine = engine(vec![Annotation::new("far", Range::forward(15, 18))]);
        engine.render(&Sequence::new("ACGTACGTACGTACGTACGT").unwrap());
        assert_eq!(engine.lines()[0].height(), 1);
        assert_eq!(engine.lines()[1].height(), 2);
    }
}
