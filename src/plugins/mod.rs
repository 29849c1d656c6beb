//! Built-in renderer plugins.
//!
//! Registration order is draw order: each plugin stacks its output below what the
//! previous ones placed on the line.

mod features;
mod glyphs;
mod ruler;

pub use features::FeatureBars;
pub use glyphs::{ComplementStrand, SequenceGlyphs};
pub use ruler::PositionRuler;

use crate::model::annotation::Annotation;
use crate::view_state::plugin::RendererPlugin;

/// The standard plugin stack: ruler, forward strand, complement strand, features.
pub fn standard(features: Vec<Annotation>) -> Vec<Box<dyn RendererPlugin>> {
    vec![
        Box::new(PositionRuler),
        Box::new(SequenceGlyphs),
        Box::new(ComplementStrand),
        Box::new(FeatureBars::new(features)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::range::Range;
    use crate::model::sequence::Sequence;
    use crate::view::AsciiSurface;
    use crate::view_state::engine::LayoutEngine;
    use crate::view_state::layout_params::LayoutConfig;
    use crate::view_state::metrics::MonospaceMeasurer;
    use crate::view_state::types::{ViewportDimensions, Zoom};

    #[test]
    fn standard_stack_order() {
        let names: Vec<String> = standard(Vec::new())
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, ["ruler", "sequence", "complement", "features"]);
    }

    #[test]
    fn standard_stack_survives_huge_zoom() {
        // GIVEN: a zoom far beyond the sequence length, forcing bar mode
        let mut engine = LayoutEngine::new(
            LayoutConfig {
                zoom: Zoom::new(usize::MAX / 2).unwrap(),
                ..LayoutConfig::default()
            },
            ViewportDimensions::new(40, 10),
            Box::new(MonospaceMeasurer::default()),
            AsciiSurface::new(40),
        );
        let feature = Annotation::new("lacZ", Range::forward(2, 9));
        for plugin in standard(vec![feature]) {
            engine.register_plugin(plugin);
        }

        // WHEN: rendering
        let report = engine.render(&Sequence::new("ACGTACGTACGT").unwrap());

        // THEN: one line, no placeholder
        assert!(report.is_clean(), "{:?}", report.failed);
        assert_eq!(report.line_count, 1);
    }
}
