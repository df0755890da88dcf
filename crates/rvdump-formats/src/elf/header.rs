//! ELF header parsing.

use super::{u16_at, u32_at};
use crate::{ByteSource, ParseError, Record};

/// ELF magic bytes.
pub const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// Object file type: executable.
pub const ET_EXEC: u16 = 2;

/// Machine type: RISC-V.
pub const EM_RISCV: u16 = 243;

/// The exact prefix every accepted file starts with: `e_ident` for a 32-bit
/// little-endian version-1 file, then `e_type`, `e_machine` and `e_version`.
pub const EXPECTED_IDENT: [u8; 24] = [
    // e_ident: magic, ELFCLASS32, ELFDATA2LSB, EV_CURRENT, padding
    0x7f, b'E', b'L', b'F', 0x01, 0x01, 0x01, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    // e_type = ET_EXEC, e_machine = EM_RISCV, e_version = 1
    0x02, 0x00, 0xf3, 0x00, 0x01, 0x00, 0x00, 0x00,
];

/// Parsed ELF32 header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElfHeader {
    /// Identification bytes.
    pub e_ident: [u8; 16],
    /// File type.
    pub e_type: u16,
    /// Machine architecture.
    pub e_machine: u16,
    /// Object file version.
    pub e_version: u32,
    /// Entry point virtual address.
    pub e_entry: u32,
    /// Program header table file offset.
    pub e_phoff: u32,
    /// Section header table file offset.
    pub e_shoff: u32,
    /// Processor-specific flags.
    pub e_flags: u32,
    /// ELF header size.
    pub e_ehsize: u16,
    /// Program header table entry size.
    pub e_phentsize: u16,
    /// Program header table entry count.
    pub e_phnum: u16,
    /// Section header table entry size.
    pub e_shentsize: u16,
    /// Section header table entry count.
    pub e_shnum: u16,
    /// Section name string table index.
    pub e_shstrndx: u16,
}

impl ElfHeader {
    /// Reads and validates the header at offset 0 of `source`.
    pub fn read<S: ByteSource + ?Sized>(source: &mut S) -> Result<Self, ParseError> {
        // A short file with a bad prefix is still a validation failure.
        let ident = source.read_at(0, EXPECTED_IDENT.len(), "identification")?;
        Self::validate_ident(&ident)?;
        let data = source.read_at(0, Self::SIZE, "file header")?;
        Self::parse(&data)
    }

    /// Checks the 24-byte identification prefix.
    ///
    /// Reports the first byte that differs from [`EXPECTED_IDENT`].
    pub fn validate_ident(data: &[u8]) -> Result<(), ParseError> {
        if data.len() < EXPECTED_IDENT.len() {
            return Err(ParseError::too_short(EXPECTED_IDENT.len(), data.len()));
        }
        match EXPECTED_IDENT
            .iter()
            .zip(data)
            .position(|(expected, actual)| expected != actual)
        {
            Some(offset) => Err(ParseError::invalid_ident(
                offset,
                EXPECTED_IDENT[offset],
                data[offset],
            )),
            None => Ok(()),
        }
    }
}

impl Record for ElfHeader {
    const SIZE: usize = 52;

    fn parse(data: &[u8]) -> Result<Self, ParseError> {
        Self::validate_ident(data)?;

        if data.len() < Self::SIZE {
            return Err(ParseError::too_short(Self::SIZE, data.len()));
        }

        let mut e_ident = [0u8; 16];
        e_ident.copy_from_slice(&data[..16]);

        Ok(Self {
            e_ident,
            e_type: u16_at(data, 16),
            e_machine: u16_at(data, 18),
            e_version: u32_at(data, 20),
            e_entry: u32_at(data, 24),
            e_phoff: u32_at(data, 28),
            e_shoff: u32_at(data, 32),
            e_flags: u32_at(data, 36),
            e_ehsize: u16_at(data, 40),
            e_phentsize: u16_at(data, 42),
            e_phnum: u16_at(data, 44),
            e_shentsize: u16_at(data, 46),
            e_shnum: u16_at(data, 48),
            e_shstrndx: u16_at(data, 50),
        })
    }
}
