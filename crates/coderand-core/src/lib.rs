//! # coderand-core
//!
//! Alphabet, validation and the lossless code-to-bit mapping for short base-32
//! codes, plus the [`TestConfiguration`] consumed by the randomness battery in
//! `coderand-tests`.
//!
//! ```
//! use coderand_core::converter;
//!
//! let bits = converter::to_bits("abcdef2345").unwrap();
//! assert_eq!(bits.len(), 50);
//! assert_eq!(converter::to_code(bits.as_slice()).unwrap().as_str(), "ABCDEF2345");
//! ```

pub mod alphabet;
pub mod code;
pub mod config;
pub mod converter;
pub mod error;

pub use alphabet::{ALPHABET, BITS_PER_SYMBOL};
pub use code::{BitSequence, Code, normalize};
pub use config::{DEFAULT_ALPHA, SerialPValue, TestConfiguration};
pub use converter::{code_to_bits, parse_bit_string, to_bits, to_code, validate};
pub use error::{ConvertError, Result};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
