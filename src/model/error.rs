//! Error types for seqcanvas.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Coordinate and parsing errors compose via `?` and `From` conversions
//! and are returned to the immediate caller (typically an import pipeline).
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error used by the binary
//!   - [`RangeError`] - Unconstructible coordinates (negative endpoints, out of bounds)
//!   - [`LocationError`] - External location text outside the supported grammar
//!   - [`SymbolError`] - Sequence symbol outside the IUPAC complement alphabet
//!   - [`EditError`] - Sequence edit outside the current sequence
//!   - `std::io::Error` - Reading stdin / writing the canvas
//!
//! # Recovery Strategy
//!
//! Render-pass failures are **not** part of this hierarchy as `Err` values: a failing
//! renderer-plugin produces a [`PluginError`] that the layout engine contains per line
//! and reports through its `RenderReport`. `render()` itself never fails.

use thiserror::Error;

/// Top-level application error encompassing all failure modes of the binary.
///
/// Library-level errors convert into `AppError` via `From`, so the binary can use `?`
/// throughout.
///
/// # Examples
///
/// ```
/// use seqcanvas::model::error::{AppError, RangeError};
///
/// fn build() -> Result<(), AppError> {
///     Err(RangeError::Negative { start: -1, end: 4 })?
/// }
/// assert!(build().unwrap_err().to_string().contains("-1"));
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Coordinates could not be turned into a range.
    #[error("Invalid range: {0}")]
    Range(#[from] RangeError),

    /// External location text could not be parsed.
    #[error("Malformed location: {0}")]
    Location(#[from] LocationError),

    /// Sequence text contains a symbol without a complement.
    #[error("Invalid symbol: {0}")]
    Symbol(#[from] SymbolError),

    /// Sequence edit could not be applied.
    #[error("Invalid edit: {0}")]
    Edit(#[from] EditError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Report serialization failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when constructing a [`Range`](crate::model::Range).
///
/// Coordinates are rejected at construction and never silently clamped.
///
/// # Examples
///
/// ```
/// use seqcanvas::model::Range;
/// use seqcanvas::model::error::RangeError;
///
/// let err = Range::from_endpoints(-3, 10, None).unwrap_err();
/// assert_eq!(err, RangeError::Negative { start: -3, end: 10 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// One of the endpoints is negative.
    #[error("range endpoints must be non-negative (got {start}..{end})")]
    Negative {
        /// Raw start endpoint as supplied.
        start: i64,
        /// Raw end endpoint as supplied.
        end: i64,
    },

    /// The range extends past the end of the sequence it addresses.
    #[error("range {start}..{end} exceeds sequence length {len}")]
    OutOfBounds {
        /// Internal start offset.
        start: usize,
        /// Internal end offset (exclusive).
        end: usize,
        /// Length of the addressed sequence.
        len: usize,
    },
}

/// Errors raised by the strict external location parser.
///
/// At the import boundary these are recovered by keeping the text as an opaque
/// `ExternalLocation::Unparsed` value, so unknown location forms can still be carried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The text is empty (after trimming and stripping a complement wrapper).
    #[error("location text is empty")]
    Empty,

    /// An endpoint is missing, e.g. `"12.."`.
    #[error("missing endpoint in location {text:?}")]
    MissingEndpoint {
        /// The offending location text.
        text: String,
    },

    /// An endpoint is not a decimal integer.
    #[error("non-numeric endpoint {endpoint:?} in location {text:?}")]
    NonNumeric {
        /// The offending location text.
        text: String,
        /// The endpoint that failed to parse.
        endpoint: String,
    },

    /// A 1-based endpoint of zero, which has no internal counterpart.
    #[error("external positions are 1-based, got 0 in {text:?}")]
    ZeroPosition {
        /// The offending location text.
        text: String,
    },

    /// A between location (`A^B`) whose endpoints are not adjacent.
    #[error("between location {text:?} must name adjacent positions")]
    NonAdjacentBetween {
        /// The offending location text.
        text: String,
    },

    /// An endpoint too large to address a sequence position.
    #[error("position out of range in location {text:?}")]
    OutOfRange {
        /// The offending location text.
        text: String,
    },

    /// The text uses a form outside the single-span grammar (join, order, fuzzy ends...).
    #[error("unsupported location form {text:?}")]
    Unsupported {
        /// The offending location text.
        text: String,
    },
}

/// Error raised by reverse-complement when a symbol has no IUPAC complement.
///
/// The module-wide policy is to reject: output length always equals input length,
/// and unknown symbols are never dropped or passed through.
///
/// # Examples
///
/// ```
/// use seqcanvas::model::iupac::reverse_complement;
/// use seqcanvas::model::error::SymbolError;
///
/// let err = reverse_complement("AC!G").unwrap_err();
/// assert_eq!(err, SymbolError::Unsupported { symbol: '!', position: 2 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// A symbol outside the supported alphabet.
    #[error("unsupported sequence symbol {symbol:?} at position {position}")]
    Unsupported {
        /// The offending character.
        symbol: char,
        /// 0-based character position in the input text.
        position: usize,
    },
}

/// Errors raised when editing a [`Sequence`](crate::model::Sequence).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The edit addresses positions past the end of the sequence.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Inserted text must be ASCII so offsets stay byte-addressable.
    #[error("inserted text must be ASCII")]
    NonAscii,
}

/// Failure reported by a renderer-plugin for one line.
///
/// Returned from `RendererPlugin::on_redraw`; the layout engine contains it, keeps the
/// line dirty and lists it in the render report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    /// The line's sequence slice contains a symbol the plugin cannot draw.
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    /// Any other plugin-specific failure.
    #[error("{0}")]
    Other(String),
}
