//! Code <-> bit sequence conversion.
//!
//! Each symbol becomes the 5-bit big-endian binary form of its rank, and the
//! symbol patterns are concatenated in code order. The mapping is lossless:
//! [`to_code`] inverts [`to_bits`] for every valid, normalized code.

use crate::alphabet::{self, BITS_PER_SYMBOL};
use crate::code::{BitSequence, Code};
use crate::error::{ConvertError, Result};

/// True iff `code` is non-empty (after trimming) and every symbol is in the alphabet.
pub fn validate(code: &str) -> bool {
    Code::parse(code).is_ok()
}

/// Convert a code string to its bit sequence.
pub fn to_bits(code: &str) -> Result<BitSequence> {
    let parsed = Code::parse(code).inspect_err(|e| log::debug!("rejected code {code:?}: {e}"))?;
    Ok(code_to_bits(&parsed))
}

/// Convert an already-validated [`Code`]. Infallible.
pub fn code_to_bits(code: &Code) -> BitSequence {
    let mut bits = Vec::with_capacity(code.len() * BITS_PER_SYMBOL);
    for c in code.as_str().chars() {
        // Code guarantees every symbol has a rank.
        let rank = alphabet::rank_of(c).unwrap_or_default();
        for shift in (0..BITS_PER_SYMBOL).rev() {
            bits.push((rank >> shift) & 1);
        }
    }
    BitSequence::from_normalized(bits)
}

/// Convert a bit vector back to a code. Nonzero values are read as 1.
pub fn to_code(bits: &[u8]) -> Result<Code> {
    if bits.is_empty() {
        return Err(ConvertError::Empty);
    }
    if bits.len() % BITS_PER_SYMBOL != 0 {
        return Err(ConvertError::InvalidLength { length: bits.len() });
    }
    let mut out = String::with_capacity(bits.len() / BITS_PER_SYMBOL);
    for chunk in bits.chunks_exact(BITS_PER_SYMBOL) {
        let rank = chunk
            .iter()
            .fold(0u8, |acc, &b| (acc << 1) | u8::from(b != 0));
        // Five bits always fit in the 32-symbol table.
        if let Some(symbol) = alphabet::symbol_of(rank) {
            out.push(symbol);
        }
    }
    Ok(Code::from_canonical(out))
}

/// Parse a textual bit string such as `"0100001001"`.
///
/// Any character other than `'0'`/`'1'` is reported as
/// [`ConvertError::InvalidCharacter`]; surrounding whitespace is ignored.
pub fn parse_bit_string(s: &str) -> Result<BitSequence> {
    let trimmed = s.trim();
    let mut bits = Vec::with_capacity(trimmed.len());
    for (position, character) in trimmed.chars().enumerate() {
        match character {
            '0' => bits.push(0),
            '1' => bits.push(1),
            _ => {
                return Err(ConvertError::InvalidCharacter {
                    character,
                    position,
                });
            }
        }
    }
    Ok(BitSequence::from_normalized(bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ALPHABET;
    use crate::code::normalize;

    #[test]
    fn test_all_twos_is_all_zero() {
        let bits = to_bits("2222222222").unwrap();
        assert_eq!(bits.len(), 50);
        assert!(bits.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_known_symbol_patterns() {
        assert_eq!(to_bits("3").unwrap().as_slice(), &[0, 0, 0, 0, 1]);
        assert_eq!(to_bits("A").unwrap().as_slice(), &[0, 1, 0, 0, 0]);
        assert_eq!(to_bits("Z").unwrap().as_slice(), &[1, 1, 1, 1, 1]);
        assert_eq!(to_bits("ab").unwrap().to_bit_string(), "0100001001");
    }

    #[test]
    fn test_round_trip_every_symbol() {
        let bits = to_bits(ALPHABET).unwrap();
        assert_eq!(bits.len(), 160);
        assert_eq!(to_code(bits.as_slice()).unwrap().as_str(), ALPHABET);
    }

    #[test]
    fn test_round_trip_normalizes_case() {
        for raw in ["abcdef2345", "  xyz9  ", "HjKmNp"] {
            let code = to_code(to_bits(raw).unwrap().as_slice()).unwrap();
            assert_eq!(code.as_str(), normalize(raw));
        }
    }

    #[test]
    fn test_alphabet_closure() {
        for bad in ["ABi", "o22", "2220", "1ZZ", "I", "O"] {
            assert!(!validate(bad), "{bad} should be invalid");
            assert!(to_bits(bad).is_err());
        }
        assert!(validate("23456789ABCDEFGHJKLMNPQRSTUVWXYZ"));
        assert!(validate("abcdefghjklmnpqrstuvwxyz"));
        assert!(!validate(""));
    }

    #[test]
    fn test_to_code_rejects_bad_length() {
        assert_eq!(
            to_code(&[0, 1, 0]),
            Err(ConvertError::InvalidLength { length: 3 })
        );
        assert_eq!(to_code(&[]), Err(ConvertError::Empty));
    }

    #[test]
    fn test_parse_bit_string() {
        let bits = parse_bit_string(" 0100001001 ").unwrap();
        assert_eq!(to_code(bits.as_slice()).unwrap().as_str(), "AB");
        assert_eq!(
            parse_bit_string("01x1"),
            Err(ConvertError::InvalidCharacter {
                character: 'x',
                position: 2
            })
        );
    }
}
