//! Named sequence features drawn as bars.

use super::error::LocationError;
use super::location::{parse_external_location, to_external_location};
use super::range::Range;

/// A named feature covering a single span of the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    name: String,
    range: Range,
}

impl Annotation {
    /// Create an annotation from an internal range.
    pub fn new(name: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    /// Create an annotation from GenBank location text.
    ///
    /// Only single-span locations can be drawn; compound locations are rejected so the
    /// import pipeline can report them instead of drawing a guessed extent.
    ///
    /// # Errors
    /// [`LocationError`] from the strict location parser.
    pub fn from_location(name: impl Into<String>, location: &str) -> Result<Self, LocationError> {
        let name = name.into();
        let range = parse_external_location(location).inspect_err(|err| {
            tracing::warn!(
                feature = %name,
                location,
                error = %err,
                "feature location not drawable"
            );
        })?;
        Ok(Self { name, range })
    }

    /// Parse a `NAME=LOCATION` pair as given on the command line.
    ///
    /// # Errors
    /// [`LocationError::Empty`] if there is no `=` or no location after it, otherwise
    /// the error from [`Annotation::from_location`].
    pub fn parse_pair(pair: &str) -> Result<Self, LocationError> {
        let (name, location) = pair.split_once('=').ok_or(LocationError::Empty)?;
        Self::from_location(name.trim(), location)
    }

    /// Feature name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Covered positions.
    pub fn range(&self) -> &Range {
        &self.range
    }

    /// Location text for export.
    pub fn location(&self) -> String {
        to_external_location(&self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_location_translates_coordinates() {
        let feature = Annotation::from_location("lacZ", "complement(10..20)").unwrap();
        assert_eq!(feature.name(), "lacZ");
        assert_eq!(feature.range(), &Range::reverse(9, 20));
        assert_eq!(feature.location(), "complement(10..20)");
    }

    #[test]
    fn compound_location_is_rejected() {
        assert!(Annotation::from_location("cds", "join(1..3,5..9)").is_err());
    }

    #[test]
    fn parse_pair_splits_on_equals() {
        let feature = Annotation::parse_pair("promoter=1..35").unwrap();
        assert_eq!(feature.name(), "promoter");
        assert_eq!(feature.range(), &Range::forward(0, 35));
    }

    #[test]
    fn parse_pair_without_equals_is_rejected() {
        assert_eq!(Annotation::parse_pair("promoter"), Err(LocationError::Empty));
    }
}
