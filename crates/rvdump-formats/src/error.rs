//! Error types for container parsing.

use thiserror::Error;

/// Error type for reading and extracting the ELF container.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A byte of the identification prefix does not match.
    #[error("invalid identification byte at offset {offset}: expected {expected:#04x}, got {actual:#04x}")]
    InvalidIdent {
        offset: usize,
        expected: u8,
        actual: u8,
    },

    /// Source is too short to contain required data.
    #[error("file too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    /// Truncated data while reading a table.
    #[error("truncated data: expected {expected} bytes at offset {offset:#x}, got {actual} while reading {context}")]
    TruncatedData {
        offset: u64,
        expected: usize,
        actual: usize,
        context: &'static str,
    },

    /// Invalid section or table layout.
    #[error("invalid {kind} at offset {offset:#x}: {reason}")]
    InvalidStructure {
        kind: &'static str,
        offset: u64,
        reason: String,
    },

    /// A section the disassembler needs is not present.
    #[error("no {name} section")]
    MissingSection { name: &'static str },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The identification prefix was rejected.
    Validation,
    /// A read, seek or layout failure while loading a table.
    Io,
    /// A required section is absent.
    MissingSection,
}

impl ParseError {
    /// Creates a new InvalidIdent error.
    pub fn invalid_ident(offset: usize, expected: u8, actual: u8) -> Self {
        Self::InvalidIdent {
            offset,
            expected,
            actual,
        }
    }

    /// Creates a new TooShort error.
    pub fn too_short(expected: usize, actual: usize) -> Self {
        Self::TooShort { expected, actual }
    }

    /// Creates a new TruncatedData error.
    pub fn truncated(offset: u64, expected: usize, actual: usize, context: &'static str) -> Self {
        Self::TruncatedData {
            offset,
            expected,
            actual,
            context,
        }
    }

    /// Creates a new InvalidStructure error.
    pub fn invalid_structure(kind: &'static str, offset: u64, reason: impl Into<String>) -> Self {
        Self::InvalidStructure {
            kind,
            offset,
            reason: reason.into(),
        }
    }

    /// Creates a new MissingSection error.
    pub fn missing_section(name: &'static str) -> Self {
        Self::MissingSection { name }
    }

    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIdent { .. } => ErrorKind::Validation,
            Self::MissingSection { .. } => ErrorKind::MissingSection,
            Self::TooShort { .. }
            | Self::TruncatedData { .. }
            | Self::InvalidStructure { .. }
            | Self::Io(_) => ErrorKind::Io,
        }
    }
}
