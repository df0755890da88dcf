//! ELF program header (segment) parsing.
//!
//! Segments are loaded with the rest of the container so the image is
//! complete, but the disassembler works purely from sections.

use super::u32_at;
use crate::{ParseError, Record};

// Segment types
pub const PT_NULL: u32 = 0;
pub const PT_LOAD: u32 = 1;
pub const PT_DYNAMIC: u32 = 2;
pub const PT_INTERP: u32 = 3;
pub const PT_NOTE: u32 = 4;
pub const PT_PHDR: u32 = 6;
pub const PT_TLS: u32 = 7;
pub const PT_RISCV_ATTRIBUTES: u32 = 0x7000_0003;

// Segment flags
pub const PF_X: u32 = 0x1; // Execute
pub const PF_W: u32 = 0x2; // Write
pub const PF_R: u32 = 0x4; // Read

/// A parsed ELF32 program header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramHeader {
    /// Segment type.
    pub p_type: u32,
    /// Offset in file.
    pub p_offset: u32,
    /// Virtual address in memory.
    pub p_vaddr: u32,
    /// Physical address (usually same as vaddr).
    pub p_paddr: u32,
    /// Size in file.
    pub p_filesz: u32,
    /// Size in memory.
    pub p_memsz: u32,
    /// Segment flags.
    pub p_flags: u32,
    /// Alignment.
    pub p_align: u32,
}

impl ProgramHeader {
    /// Returns true for a loadable segment.
    pub fn is_load(&self) -> bool {
        self.p_type == PT_LOAD
    }

    /// Returns true if the segment is mapped executable.
    pub fn is_executable(&self) -> bool {
        self.p_flags & PF_X != 0
    }
}

impl Record for ProgramHeader {
    const SIZE: usize = 32;

    fn parse(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < Self::SIZE {
            return Err(ParseError::too_short(Self::SIZE, data.len()));
        }

        Ok(Self {
            p_type: u32_at(data, 0),
            p_offset: u32_at(data, 4),
            p_vaddr: u32_at(data, 8),
            p_paddr: u32_at(data, 12),
            p_filesz: u32_at(data, 16),
            p_memsz: u32_at(data, 20),
            p_flags: u32_at(data, 24),
            p_align: u32_at(data, 28),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_load_segment() {
        let mut data = vec![0u8; 32];
        data[0..4].copy_from_slice(&PT_LOAD.to_le_bytes());
        data[8..12].copy_from_slice(&0x1_0000u32.to_le_bytes());
        data[16..20].copy_from_slice(&0x94u32.to_le_bytes());
        data[24..28].copy_from_slice(&(PF_R | PF_X).to_le_bytes());
        data[28..32].copy_from_slice(&0x1000u32.to_le_bytes());

        let segment = ProgramHeader::parse(&data).unwrap();
        assert!(segment.is_load());
        assert!(segment.is_executable());
        assert_eq!(segment.p_vaddr, 0x1_0000);
        assert_eq!(segment.p_filesz, 0x94);
        assert_eq!(segment.p_align, 0x1000);
    }
}
