use thiserror::Error;

/// Errors raised while converting between codes and bit sequences.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("bit sequence length {length} is not a multiple of 5")]
    InvalidLength { length: usize },

    #[error("code is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, ConvertError>;
