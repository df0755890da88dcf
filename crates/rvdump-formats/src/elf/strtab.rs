//! String tables.

use crate::{ByteSource, ParseError};
use std::borrow::Cow;

/// A blob of NUL-terminated strings addressed by byte offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    data: Vec<u8>,
}

impl StringTable {
    /// Wraps raw string table bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Loads `size` bytes at `offset` from `source`.
    pub fn read<S: ByteSource + ?Sized>(
        source: &mut S,
        offset: u64,
        size: usize,
        context: &'static str,
    ) -> Result<Self, ParseError> {
        source.read_at(offset, size, context).map(Self::new)
    }

    /// Returns the raw bytes of the string starting at `offset`, without the
    /// terminator. An unterminated string runs to the end of the table.
    pub fn get_bytes(&self, offset: u32) -> Option<&[u8]> {
        let remaining = self.data.get(offset as usize..)?;
        let end = remaining
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(remaining.len());
        Some(&remaining[..end])
    }

    /// Returns the string starting at `offset`. Invalid UTF-8 is replaced.
    pub fn get(&self, offset: u32) -> Option<Cow<'_, str>> {
        self.get_bytes(offset).map(String::from_utf8_lossy)
    }

    /// Returns true if the string at `offset` equals `name`.
    pub fn matches(&self, offset: u32, name: &str) -> bool {
        self.get_bytes(offset) == Some(name.as_bytes())
    }

    /// Size of the table in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the table holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
