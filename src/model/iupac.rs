//! IUPAC nucleotide complement table and reverse-complement.
//!
//! Supported alphabet (either case): `A C G T U R Y S W K M B D H V N X` plus the gap
//! symbols `-` and `.`. Anything else is rejected with [`SymbolError`]; symbols are never
//! dropped, so a successful result always has the same length as its input.

use super::error::SymbolError;

/// Complement of a single uppercase IUPAC symbol.
#[inline(always)]
fn complement_upper(symbol: u8) -> Option<u8> {
    let complement = match symbol {
        b'A' => b'T',
        b'T' => b'A',
        b'U' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'R' => b'Y',
        b'Y' => b'R',
        b'M' => b'K',
        b'K' => b'M',
        b'S' => b'S',
        b'W' => b'W',
        b'H' => b'D',
        b'D' => b'H',
        b'B' => b'V',
        b'V' => b'B',
        b'N' => b'N',
        b'X' => b'X',
        b'-' => b'-',
        b'.' => b'.',
        _ => return None,
    };
    Some(complement)
}

/// Complement of one symbol, preserving case.
///
/// Returns `None` for symbols outside the supported alphabet.
///
/// ```
/// # use seqcanvas::model::iupac::complement_symbol;
/// assert_eq!(complement_symbol('a'), Some('t'));
/// assert_eq!(complement_symbol('R'), Some('Y'));
/// assert_eq!(complement_symbol('Z'), None);
/// ```
pub fn complement_symbol(symbol: char) -> Option<char> {
    if !symbol.is_ascii() {
        return None;
    }
    let byte = symbol as u8;
    let complement = complement_upper(byte.to_ascii_uppercase())?;
    if byte.is_ascii_lowercase() {
        Some(complement.to_ascii_lowercase() as char)
    } else {
        Some(complement as char)
    }
}

/// Check if a symbol belongs to the supported alphabet.
#[inline(always)]
pub fn is_supported_symbol(symbol: char) -> bool {
    complement_symbol(symbol).is_some()
}

/// Complement every symbol in place order (no reversal).
///
/// # Errors
/// [`SymbolError::Unsupported`] naming the first unsupported symbol.
pub fn complement(text: &str) -> Result<String, SymbolError> {
    text.chars()
        .enumerate()
        .map(|(position, symbol)| {
            complement_symbol(symbol).ok_or(SymbolError::Unsupported { symbol, position })
        })
        .collect()
}

/// Reverse-complement of a sequence, case preserving.
///
/// The reported position of an unsupported symbol is its index in the input text.
///
/// # Errors
/// [`SymbolError::Unsupported`] for the last unsupported symbol in the input (the first
/// one met while walking backwards).
///
/// ```
/// # use seqcanvas::model::iupac::reverse_complement;
/// assert_eq!(reverse_complement("ATCGatcg").unwrap(), "cgatCGAT");
/// assert_eq!(reverse_complement("ATNGCr").unwrap(), "yGCNAT");
/// ```
pub fn reverse_complement(text: &str) -> Result<String, SymbolError> {
    let symbols: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (position, &symbol) in symbols.iter().enumerate().rev() {
        let complement =
            complement_symbol(symbol).ok_or(SymbolError::Unsupported { symbol, position })?;
        out.push(complement);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watson_crick_pairs() {
        assert_eq!(complement_symbol('A'), Some('T'));
        assert_eq!(complement_symbol('T'), Some('A'));
        assert_eq!(complement_symbol('C'), Some('G'));
        assert_eq!(complement_symbol('G'), Some('C'));
        assert_eq!(complement_symbol('U'), Some('A'));
    }

    #[test]
    fn ambiguity_codes() {
        assert_eq!(complement_symbol('R'), Some('Y'));
        assert_eq!(complement_symbol('Y'), Some('R'));
        assert_eq!(complement_symbol('M'), Some('K'));
        assert_eq!(complement_symbol('K'), Some('M'));
        assert_eq!(complement_symbol('S'), Some('S'));
        assert_eq!(complement_symbol('W'), Some('W'));
        assert_eq!(complement_symbol('H'), Some('D'));
        assert_eq!(complement_symbol('D'), Some('H'));
        assert_eq!(complement_symbol('B'), Some('V'));
        assert_eq!(complement_symbol('V'), Some('B'));
        assert_eq!(complement_symbol('N'), Some('N'));
        assert_eq!(complement_symbol('X'), Some('X'));
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(complement_symbol('r'), Some('y'));
        assert_eq!(complement_symbol('n'), Some('n'));
        assert_eq!(complement_symbol('g'), Some('c'));
    }

    #[test]
    fn gaps_map_to_themselves() {
        assert_eq!(complement_symbol('-'), Some('-'));
        assert_eq!(complement_symbol('.'), Some('.'));
    }

    #[test]
    fn unsupported_symbols_have_no_complement() {
        for symbol in ['Z', 'z', 'E', ' ', '*', 'é', '1'] {
            assert_eq!(complement_symbol(symbol), None, "{symbol:?}");
            assert!(!is_supported_symbol(symbol));
        }
    }

    #[test]
    fn reverse_complement_examples() {
        assert_eq!(reverse_complement("ATCGatcg").unwrap(), "cgatCGAT");
        assert_eq!(reverse_complement("ATNGCr").unwrap(), "yGCNAT");
    }

    #[test]
    fn reverse_complement_of_empty_is_empty() {
        assert_eq!(reverse_complement("").unwrap(), "");
    }

    #[test]
    fn reverse_complement_rejects_instead_of_dropping() {
        assert_eq!(
            reverse_complement("ACGZ"),
            Err(SymbolError::Unsupported {
                symbol: 'Z',
                position: 3
            })
        );
    }

    #[test]
    fn reverse_complement_is_an_involution() {
        let text = "ACGTRYMKSWBDHVNXacgtn-.";
        let twice = reverse_complement(&reverse_complement(text).unwrap()).unwrap();
        assert_eq!(twice, text);
    }

    #[test]
    fn complement_keeps_order() {
        assert_eq!(complement("AAcG").unwrap(), "TTgC");
        assert!(complement("A?").is_err());
    }
}
