//! The 32-symbol code alphabet.
//!
//! Digits `2`-`9` followed by the Latin letters without `I` and `O`. The four
//! symbols that are easy to confuse on a printed label (`0`, `1`, `I`, `O`)
//! are excluded, which leaves exactly 32 symbols, so each one carries 5 bits.

/// Canonical (upper-case) alphabet. A symbol's rank is its index.
pub const ALPHABET: &str = "23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Number of bits each symbol encodes.
pub const BITS_PER_SYMBOL: usize = 5;

const SYMBOLS: &[u8; 32] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Rank (0-31) of a symbol, case-insensitive. `None` if it is not in the alphabet.
pub fn rank_of(c: char) -> Option<u8> {
    let upper = c.to_ascii_uppercase();
    match upper {
        '2'..='9' => Some(upper as u8 - b'2'),
        'A'..='H' => Some(upper as u8 - b'A' + 8),
        'J'..='N' => Some(upper as u8 - b'J' + 16),
        'P'..='Z' => Some(upper as u8 - b'P' + 21),
        _ => None,
    }
}

/// Canonical symbol for a rank, or `None` if `rank >= 32`.
pub fn symbol_of(rank: u8) -> Option<char> {
    SYMBOLS.get(rank as usize).map(|&b| b as char)
}

/// Whether `c` (any case) belongs to the alphabet.
pub fn contains(c: char) -> bool {
    rank_of(c).is_some()
}
