//! Disassembly error types.

use thiserror::Error;

/// Error type for instruction decoding.
///
/// Decode errors never abort a listing: the word is skipped and the stream
/// continues at the next address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The word is not a 32-bit encoding (compressed or longer formats).
    #[error("not a 32-bit encoding at {address:#x}: {word:#010x}")]
    NotFullWidth { address: u32, word: u32 },

    /// Unknown major opcode.
    #[error("unknown opcode at {address:#x}: {word:#010x}")]
    UnknownOpcode { address: u32, word: u32 },

    /// Known opcode with a reserved funct3/funct7 combination.
    #[error("invalid encoding at {address:#x}: {reason}")]
    InvalidEncoding { address: u32, reason: String },
}

impl DecodeError {
    /// Creates a new NotFullWidth error.
    pub fn not_full_width(address: u32, word: u32) -> Self {
        Self::NotFullWidth { address, word }
    }

    /// Creates a new UnknownOpcode error.
    pub fn unknown_opcode(address: u32, word: u32) -> Self {
        Self::UnknownOpcode { address, word }
    }

    /// Creates a new InvalidEncoding error.
    pub fn invalid_encoding(address: u32, reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            address,
            reason: reason.into(),
        }
    }
}
