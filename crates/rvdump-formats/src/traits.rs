//! Traits for positioned reads and fixed-size records.

use crate::ParseError;
use std::io::{Read, Seek, SeekFrom};

/// A byte-addressable input that can be read at arbitrary offsets.
///
/// Implemented for every `Read + Seek` type, so a `File`, a `BufReader<File>`
/// or a `Cursor<&[u8]>` can all back the container reader.
pub trait ByteSource {
    /// Reads exactly `len` bytes starting at `offset`.
    ///
    /// `context` names the structure being read and is carried into the
    /// error on a short read.
    fn read_at(
        &mut self,
        offset: u64,
        len: usize,
        context: &'static str,
    ) -> Result<Vec<u8>, ParseError>;
}

impl<T: Read + Seek> ByteSource for T {
    fn read_at(
        &mut self,
        offset: u64,
        len: usize,
        context: &'static str,
    ) -> Result<Vec<u8>, ParseError> {
        self.seek(SeekFrom::Start(offset))?;
        // `len` is file-controlled; never preallocate it.
        let mut buf = Vec::new();
        let read = self.by_ref().take(len as u64).read_to_end(&mut buf)?;
        if read < len {
            return Err(ParseError::truncated(offset, len, read, context));
        }
        Ok(buf)
    }
}

/// A fixed-size little-endian record.
pub trait Record: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Parse one record from the start of `data`.
    fn parse(data: &[u8]) -> Result<Self, ParseError>;
}

impl Record for u32 {
    const SIZE: usize = 4;

    fn parse(data: &[u8]) -> Result<Self, ParseError> {
        match data {
            [a, b, c, d, ..] => Ok(u32::from_le_bytes([*a, *b, *c, *d])),
            _ => Err(ParseError::too_short(Self::SIZE, data.len())),
        }
    }
}

/// Reads `count` consecutive records starting at `offset`.
///
/// This is a typed raw-bytes loader: no field is interpreted beyond its
/// byte layout. Any short read fails the whole table.
pub fn read_table<T, S>(
    source: &mut S,
    offset: u64,
    count: usize,
    context: &'static str,
) -> Result<Vec<T>, ParseError>
where
    T: Record,
    S: ByteSource + ?Sized,
{
    let len = count.checked_mul(T::SIZE).ok_or_else(|| {
        ParseError::invalid_structure(context, offset, format!("{count} entries overflow"))
    })?;
    let bytes = source.read_at(offset, len, context)?;
    bytes.chunks_exact(T::SIZE).map(T::parse).collect()
}
