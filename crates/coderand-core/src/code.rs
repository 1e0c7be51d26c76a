//! Validated codes and the bit sequences they map to.

use serde::Serialize;

use crate::alphabet;
use crate::error::{ConvertError, Result};

/// Trim surrounding whitespace and fold to the canonical (upper) case.
pub fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// A non-empty, case-normalized code whose every symbol is in the alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Code(String);

impl Code {
    /// Normalize and validate `raw`.
    ///
    /// Positions in [`ConvertError::InvalidCharacter`] are 0-based character
    /// offsets into the trimmed input.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(ConvertError::Empty);
        }
        if let Some((position, character)) = normalized
            .chars()
            .enumerate()
            .find(|&(_, c)| !alphabet::contains(c))
        {
            // Report the character as the caller wrote it, not upper-cased.
            let character = raw.trim().chars().nth(position).unwrap_or(character);
            return Err(ConvertError::InvalidCharacter {
                character,
                position,
            });
        }
        Ok(Self(normalized))
    }

    /// Build from symbols already known to be canonical.
    pub(crate) fn from_canonical(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Code {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An ordered sequence of bits, one `u8` (0 or 1) per bit.
///
/// Sequences produced by the converter are always a multiple of 5 long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    /// Wrap an existing bit vector. Any nonzero value is read as 1.
    pub fn from_raw(mut bits: Vec<u8>) -> Self {
        for b in &mut bits {
            *b = u8::from(*b != 0);
        }
        Self { bits }
    }

    pub(crate) fn from_normalized(bits: Vec<u8>) -> Self {
        debug_assert!(bits.iter().all(|&b| b <= 1));
        Self { bits }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of 1 bits.
    pub fn ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }

    /// Render as a string of `'0'`/`'1'` characters.
    pub fn to_bit_string(&self) -> String {
        self.bits
            .iter()
            .map(|&b| if b == 1 { '1' } else { '0' })
            .collect()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bits
    }
}

impl std::fmt::Display for BitSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

impl AsRef<[u8]> for BitSequence {
    fn as_ref(&self) -> &[u8] {
        &self.bits
    }
}
