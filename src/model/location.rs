//! Conversion between internal ranges and GenBank-style external locations.
//!
//! External locations are 1-based and inclusive; internal ranges are 0-based and
//! half-open:
//!
//! - `internal_start = external_start - 1`
//! - `internal_end = external_end`
//! - `complement(...)` ⇔ [`Orientation::Reverse`]
//!
//! Supported single-span grammar:
//!
//! ```text
//! location := "complement(" location ")" | span
//! span     := INT ".." INT | INT | INT "^" INT
//! ```
//!
//! Anything else (joins, fuzzy ends, remote references) is outside the grammar. The
//! strict parser reports it as [`LocationError::Unsupported`]; [`ExternalLocation::parse`]
//! keeps such text verbatim as [`ExternalLocation::Unparsed`].

use super::error::LocationError;
use super::range::{Orientation, Range};
use std::fmt;

const COMPLEMENT_OPEN: &str = "complement(";

/// Characters that only appear in location forms outside the single-span grammar.
const COMPOUND_MARKERS: &[char] = &['(', ')', '<', '>', ',', ':'];

/// Parse a single-span external location into an internal range.
///
/// Reversed endpoints (`"154..133"`) are accepted and yield a reverse range, mirroring
/// how raw endpoints are handled by [`Range::from_endpoints`]. A `complement(...)`
/// wrapper flips the orientation.
///
/// # Errors
/// A [`LocationError`] describing why the text is outside the supported grammar.
///
/// # Examples
/// ```
/// # use seqcanvas::model::{location::parse_external_location, Range};
/// assert_eq!(parse_external_location("133..154").unwrap(), Range::forward(132, 154));
/// assert_eq!(parse_external_location("complement(133..154)").unwrap(), Range::reverse(132, 154));
/// assert_eq!(parse_external_location("7").unwrap(), Range::forward(6, 7));
/// ```
pub fn parse_external_location(text: &str) -> Result<Range, LocationError> {
    let mut body = text.trim();
    let mut complemented = false;

    while let Some(inner) = body
        .strip_prefix(COMPLEMENT_OPEN)
        .and_then(|rest| rest.strip_suffix(')'))
    {
        complemented = !complemented;
        body = inner.trim();
    }

    if body.is_empty() {
        return Err(LocationError::Empty);
    }
    if body.contains(COMPOUND_MARKERS) {
        return Err(LocationError::Unsupported {
            text: text.to_string(),
        });
    }

    let range = if let Some((left, right)) = body.split_once('^') {
        parse_between(text, left, right)?
    } else {
        let (left, right) = match body.split_once("..") {
            Some((left, right)) => (left, right),
            None => (body, body),
        };
        parse_span(text, left, right)?
    };

    Ok(if complemented { range.flipped() } else { range })
}

fn parse_position(text: &str, endpoint: &str) -> Result<u128, LocationError> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(LocationError::MissingEndpoint {
            text: text.to_string(),
        });
    }
    if !endpoint.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LocationError::NonNumeric {
            text: text.to_string(),
            endpoint: endpoint.to_string(),
        });
    }
    endpoint.parse().map_err(|_| LocationError::OutOfRange {
        text: text.to_string(),
    })
}

fn to_offset(text: &str, value: u128) -> Result<usize, LocationError> {
    usize::try_from(value).map_err(|_| LocationError::OutOfRange {
        text: text.to_string(),
    })
}

fn parse_span(text: &str, left: &str, right: &str) -> Result<Range, LocationError> {
    let first = parse_position(text, left)?;
    let second = parse_position(text, right)?;
    if first == 0 || second == 0 {
        return Err(LocationError::ZeroPosition {
            text: text.to_string(),
        });
    }
    let orientation = if first > second {
        Orientation::Reverse
    } else {
        Orientation::Forward
    };
    let low = to_offset(text, first.min(second) - 1)?;
    let high = to_offset(text, first.max(second))?;
    Ok(Range::new(low, high, orientation))
}

fn parse_between(text: &str, left: &str, right: &str) -> Result<Range, LocationError> {
    let before = parse_position(text, left)?;
    let after = parse_position(text, right)?;
    if before.checked_add(1) != Some(after) {
        return Err(LocationError::NonAdjacentBetween {
            text: text.to_string(),
        });
    }
    let offset = to_offset(text, before)?;
    Ok(Range::forward(offset, offset))
}

/// Render an internal range as external location text.
///
/// - Multi-position ranges use `A..B`
/// - Single positions use a bare `A`
/// - Empty ranges (insertion points) use the between form `A^B`
/// - Reverse ranges are wrapped in `complement(...)`
///
/// # Examples
/// ```
/// # use seqcanvas::model::{location::to_external_location, Range};
/// assert_eq!(to_external_location(&Range::forward(132, 154)), "133..154");
/// assert_eq!(to_external_location(&Range::reverse(132, 154)), "complement(133..154)");
/// ```
pub fn to_external_location(range: &Range) -> String {
    let span = if range.is_empty() {
        // Widened so the position after usize::MAX can still be written.
        format!("{}^{}", range.start(), range.start() as u128 + 1)
    } else if range.len() == 1 {
        format!("{}", range.end())
    } else {
        format!("{}..{}", range.start() + 1, range.end())
    };

    if range.is_reverse() {
        format!("{COMPLEMENT_OPEN}{span})")
    } else {
        span
    }
}

/// A location as seen at the import/export boundary.
///
/// Simple spans are translated into ranges. Every other form is carried verbatim so it
/// can still be displayed and written back out; callers can tell the two apart with
/// [`ExternalLocation::is_passthrough`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalLocation {
    /// A single span translated into internal coordinates.
    Span(Range),
    /// Text outside the supported grammar, kept unchanged.
    Unparsed(String),
}

impl ExternalLocation {
    /// Lenient parse: never fails, falls back to [`ExternalLocation::Unparsed`].
    pub fn parse(text: &str) -> Self {
        match parse_external_location(text) {
            Ok(range) => Self::Span(range),
            Err(err) => {
                tracing::debug!(location = text, error = %err, "keeping location as opaque text");
                Self::Unparsed(text.to_string())
            }
        }
    }

    /// Check if the location was carried verbatim instead of translated.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Unparsed(_))
    }

    /// The translated range, if any.
    pub fn range(&self) -> Option<&Range> {
        match self {
            Self::Span(range) => Some(range),
            Self::Unparsed(_) => None,
        }
    }
}

impl From<Range> for ExternalLocation {
    fn from(range: Range) -> Self {
        Self::Span(range)
    }
}

impl fmt::Display for ExternalLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Span(range) => f.write_str(&to_external_location(range)),
            Self::Unparsed(text) => f.write_str(text),
        }
    }
}
