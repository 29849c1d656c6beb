//! Text rendering of laid-out lines (impure shell)

pub mod ascii;
pub mod styles;

pub use ascii::AsciiSurface;
pub use styles::{ColorConfig, GlyphStyles};
