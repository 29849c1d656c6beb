//! Sequence provider boundary and the in-memory forward-strand sequence.

use super::error::{EditError, RangeError, SymbolError};
use super::iupac::reverse_complement;
use super::range::Range;
use std::borrow::Cow;

/// Read access to a sequence's forward strand.
///
/// Implementations are queried by the layout engine during a render pass; any I/O
/// needed to obtain the data must have happened before the pass starts.
pub trait SequenceProvider {
    /// Number of positions in the sequence.
    fn len(&self) -> usize;

    /// Forward-strand text for `start..end`, clamped to the sequence length.
    fn slice(&self, start: usize, end: usize) -> Cow<'_, str>;

    /// Check if the sequence has no positions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Kind of change applied to a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Positions were inserted; the range covers the new positions.
    Insert,
    /// Positions were removed; the range is an insertion point at the cut.
    Delete,
}

/// Description of an applied edit, handed to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceEdit {
    /// Affected positions, in post-edit coordinates.
    pub range: Range,
    /// What happened.
    pub kind: EditKind,
    /// Sequence length after the edit.
    pub new_len: usize,
}

/// An in-memory forward strand.
///
/// Symbols are stored as ASCII text so that offsets are byte offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    bases: String,
}

impl Sequence {
    /// Wrap sequence text.
    ///
    /// # Errors
    /// [`SymbolError::Unsupported`] naming the first non-ASCII character; offsets
    /// are byte offsets, so only ASCII symbols can be stored.
    pub fn new(bases: impl Into<String>) -> Result<Self, SymbolError> {
        let bases: String = bases.into();
        if let Some((position, symbol)) = bases.chars().enumerate().find(|(_, c)| !c.is_ascii()) {
            return Err(SymbolError::Unsupported { symbol, position });
        }
        Ok(Self { bases })
    }

    /// Full forward-strand text.
    pub fn as_str(&self) -> &str {
        &self.bases
    }

    /// Text of `range` read along its own strand.
    ///
    /// Reverse ranges yield the reverse-complement of the forward slice.
    ///
    /// # Errors
    /// [`SymbolError`] if a reverse range covers a symbol without a complement.
    pub fn strand_text(&self, range: &Range) -> Result<String, SymbolError> {
        let forward = self.slice(range.start(), range.end());
        if range.is_reverse() {
            reverse_complement(&forward)
        } else {
            Ok(forward.into_owned())
        }
    }

    /// Insert `text` before `offset`.
    ///
    /// # Errors
    /// [`EditError::Range`] if `offset` is past the end, [`EditError::NonAscii`] if the
    /// text is not ASCII.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<SequenceEdit, EditError> {
        if offset > self.bases.len() {
            return Err(RangeError::OutOfBounds {
                start: offset,
                end: offset,
                len: self.bases.len(),
            }
            .into());
        }
        if !text.is_ascii() {
            return Err(EditError::NonAscii);
        }
        self.bases.insert_str(offset, text);
        Ok(SequenceEdit {
            range: Range::forward(offset, offset + text.len()),
            kind: EditKind::Insert,
            new_len: self.bases.len(),
        })
    }

    /// Remove the positions covered by `range` (orientation is ignored).
    ///
    /// # Errors
    /// [`EditError::Range`] if the range extends past the end.
    pub fn delete(&mut self, range: &Range) -> Result<SequenceEdit, EditError> {
        range.check_bounds(self.bases.len())?;
        self.bases.replace_range(range.start()..range.end(), "");
        Ok(SequenceEdit {
            range: Range::forward(range.start(), range.start()),
            kind: EditKind::Delete,
            new_len: self.bases.len(),
        })
    }
}

impl SequenceProvider for Sequence {
    fn len(&self) -> usize {
        self.bases.len()
    }

    fn slice(&self, start: usize, end: usize) -> Cow<'_, str> {
        let end = end.min(self.bases.len());
        let start = start.min(end);
        Cow::Borrowed(&self.bases[start..end])
    }
}

impl TryFrom<&str> for Sequence {
    type Error = SymbolError;

    fn try_from(bases: &str) -> Result<Self, Self::Error> {
        Self::new(bases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_is_clamped() {
        let seq = Sequence::new("ACGTACGT").unwrap();
        assert_eq!(seq.slice(2, 5), "GTA");
        assert_eq!(seq.slice(6, 100), "GT");
        assert_eq!(seq.slice(50, 100), "");
    }

    #[test]
    fn non_ascii_is_rejected() {
        assert_eq!(
            Sequence::new("ACé"),
            Err(SymbolError::Unsupported {
                symbol: 'é',
                position: 2
            })
        );
        assert_eq!(Sequence::try_from("ACGT").unwrap().len(), 4);
    }

    #[test]
    fn strand_text_reverse_is_reverse_complement() {
        let seq = Sequence::new("AAACCCGGG").unwrap();
        assert_eq!(seq.strand_text(&Range::forward(0, 4)).unwrap(), "AAAC");
        assert_eq!(seq.strand_text(&Range::reverse(0, 4)).unwrap(), "GTTT");
    }

    #[test]
    fn strand_text_reverse_rejects_unknown_symbol() {
        let seq = Sequence::new("AC*T").unwrap();
        assert!(seq.strand_text(&Range::reverse(0, 4)).is_err());
        assert_eq!(seq.strand_text(&Range::forward(0, 4)).unwrap(), "AC*T");
    }

    #[test]
    fn insert_reports_new_positions() {
        let mut seq = Sequence::new("AAAA").unwrap();
        let edit = seq.insert(2, "GG").unwrap();
        assert_eq!(seq.as_str(), "AAGGAA");
        assert_eq!(edit.range, Range::forward(2, 4));
        assert_eq!(edit.kind, EditKind::Insert);
        assert_eq!(edit.new_len, 6);
    }

    #[test]
    fn insert_past_end_is_rejected() {
        let mut seq = Sequence::new("AAAA").unwrap();
        assert!(matches!(seq.insert(5, "G"), Err(EditError::Range(_))));
        assert_eq!(seq.insert(1, "é"), Err(EditError::NonAscii));
    }

    #[test]
    fn delete_reports_cut_point() {
        let mut seq = Sequence::new("ACGTACGT").unwrap();
        let edit = seq.delete(&Range::reverse(2, 5)).unwrap();
        assert_eq!(seq.as_str(), "ACCGT");
        assert_eq!(edit.range, Range::forward(2, 2));
        assert_eq!(edit.kind, EditKind::Delete);
        assert_eq!(edit.new_len, 5);
    }

    #[test]
    fn delete_out_of_bounds_is_rejected() {
        let mut seq = Sequence::new("ACGT").unwrap();
        assert!(seq.delete(&Range::forward(2, 9)).is_err());
        assert_eq!(seq.as_str(), "ACGT");
    }
}
