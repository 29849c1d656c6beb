//! Domain model types (pure).
//!
//! Coordinates, location text conversion, the IUPAC complement table and the
//! sequence/annotation values the layout engine draws.

pub mod annotation;
pub mod error;
pub mod iupac;
pub mod location;
pub mod range;
pub mod sequence;

// Re-export for convenience
pub use annotation::Annotation;
pub use error::{AppError, EditError, LocationError, PluginError, RangeError, SymbolError};
pub use location::{parse_external_location, to_external_location, ExternalLocation};
pub use range::{Orientation, Range};
pub use sequence::{EditKind, Sequence, SequenceEdit, SequenceProvider};
