//! Error handling for extrinsic decoding and transaction construction
//!
//! Every codec, parse, build and sign step returns one of these kinds
//! immediately. Nothing inside the crate turns a failure into a default value.

use std::fmt;

/// Result type alias for extrinsic operations
pub type Result<T> = std::result::Result<T, ExtrinsicError>;

/// Error kinds surfaced by the codec, the parser and the transaction builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtrinsicError {
    /// Hex decode failure, truncated buffer, empty input where bytes are required
    MalformedInput(String),
    /// Declared extrinsic length disagrees with the bytes actually present
    LengthMismatch { declared: usize, actual: usize },
    /// Version byte outside the supported `0x01` / `0x81` profile
    UnsupportedVersion(u8),
    /// Era byte other than the immortal marker `0x00`
    UnsupportedEra(u8),
    /// Fixed-width field (key, hash, signature) with the wrong byte length
    InvalidFieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Transfer amount of zero at build time
    ZeroAmount,
    /// Compact integer too large for the target scalar
    RangeOverflow(String),
    /// Key rejection or signature primitive failure
    Crypto(String),
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(String),
}

impl fmt::Display for ExtrinsicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtrinsicError::MalformedInput(msg) => write!(f, "Malformed input: {msg}"),
            ExtrinsicError::LengthMismatch { declared, actual } => {
                write!(
                    f,
                    "Extrinsic length mismatch: declared {declared}, actual {actual}"
                )
            }
            ExtrinsicError::UnsupportedVersion(v) => {
                write!(f, "Extrinsic version {v:02x} is not supported")
            }
            ExtrinsicError::UnsupportedEra(era) => {
                write!(f, "Era {era:02x} is not supported, expected immortal era 00")
            }
            ExtrinsicError::InvalidFieldLength {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid {field} length: expected {expected} bytes, got {actual}"
                )
            }
            ExtrinsicError::ZeroAmount => write!(f, "Transfer amount must be non-zero"),
            ExtrinsicError::RangeOverflow(msg) => write!(f, "Range overflow: {msg}"),
            ExtrinsicError::Crypto(msg) => write!(f, "Cryptographic error: {msg}"),
            ExtrinsicError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ExtrinsicError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ExtrinsicError {}

impl From<std::io::Error> for ExtrinsicError {
    fn from(err: std::io::Error) -> Self {
        ExtrinsicError::Io(err.to_string())
    }
}

impl From<data_encoding::DecodeError> for ExtrinsicError {
    fn from(err: data_encoding::DecodeError) -> Self {
        ExtrinsicError::MalformedInput(format!("Invalid hex: {err}"))
    }
}

impl From<toml::de::Error> for ExtrinsicError {
    fn from(err: toml::de::Error) -> Self {
        ExtrinsicError::Config(err.to_string())
    }
}
