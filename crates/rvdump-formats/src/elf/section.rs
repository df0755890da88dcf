//! ELF section header parsing.

use super::u32_at;
use crate::{ParseError, Record};
use bitflags::bitflags;

// Section types
pub const SHT_NULL: u32 = 0;
pub const SHT_PROGBITS: u32 = 1;
pub const SHT_SYMTAB: u32 = 2;
pub const SHT_STRTAB: u32 = 3;
pub const SHT_RELA: u32 = 4;
pub const SHT_HASH: u32 = 5;
pub const SHT_DYNAMIC: u32 = 6;
pub const SHT_NOTE: u32 = 7;
pub const SHT_NOBITS: u32 = 8;
pub const SHT_REL: u32 = 9;
pub const SHT_SHLIB: u32 = 10;
pub const SHT_DYNSYM: u32 = 11;
pub const SHT_INIT_ARRAY: u32 = 14;
pub const SHT_FINI_ARRAY: u32 = 15;
pub const SHT_PREINIT_ARRAY: u32 = 16;
pub const SHT_GROUP: u32 = 17;
pub const SHT_SYMTAB_SHNDX: u32 = 18;

const SHT_LOOS: u32 = 0x6000_0000;
const SHT_LOPROC: u32 = 0x7000_0000;
const SHT_LOUSER: u32 = 0x8000_0000;

/// Section type (`sh_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionType {
    Null,
    /// Program-defined contents, including code.
    ProgBits,
    SymTab,
    StrTab,
    Rela,
    Hash,
    Dynamic,
    Note,
    NoBits,
    Rel,
    ShLib,
    DynSym,
    InitArray,
    FiniArray,
    PreinitArray,
    Group,
    SymTabShndx,
    /// OS-specific type.
    Os(u32),
    /// Processor-specific type.
    Proc(u32),
    /// Application-specific type.
    User(u32),
    /// Any other value.
    Unknown(u32),
}

impl From<u32> for SectionType {
    fn from(value: u32) -> Self {
        match value {
            SHT_NULL => Self::Null,
            SHT_PROGBITS => Self::ProgBits,
            SHT_SYMTAB => Self::SymTab,
            SHT_STRTAB => Self::StrTab,
            SHT_RELA => Self::Rela,
            SHT_HASH => Self::Hash,
            SHT_DYNAMIC => Self::Dynamic,
            SHT_NOTE => Self::Note,
            SHT_NOBITS => Self::NoBits,
            SHT_REL => Self::Rel,
            SHT_SHLIB => Self::ShLib,
            SHT_DYNSYM => Self::DynSym,
            SHT_INIT_ARRAY => Self::InitArray,
            SHT_FINI_ARRAY => Self::FiniArray,
            SHT_PREINIT_ARRAY => Self::PreinitArray,
            SHT_GROUP => Self::Group,
            SHT_SYMTAB_SHNDX => Self::SymTabShndx,
            v if v >= SHT_LOUSER => Self::User(v),
            v if v >= SHT_LOPROC => Self::Proc(v),
            v if v >= SHT_LOOS => Self::Os(v),
            v => Self::Unknown(v),
        }
    }
}

impl SectionType {
    /// Returns the section type as a string, or `None` for ranged and
    /// unknown values.
    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::Null => "NULL",
            Self::ProgBits => "PROGBITS",
            Self::SymTab => "SYMTAB",
            Self::StrTab => "STRTAB",
            Self::Rela => "RELA",
            Self::Hash => "HASH",
            Self::Dynamic => "DYNAMIC",
            Self::Note => "NOTE",
            Self::NoBits => "NOBITS",
            Self::Rel => "REL",
            Self::ShLib => "SHLIB",
            Self::DynSym => "DYNSYM",
            Self::InitArray => "INIT_ARRAY",
            Self::FiniArray => "FINI_ARRAY",
            Self::PreinitArray => "PREINIT_ARRAY",
            Self::Group => "GROUP",
            Self::SymTabShndx => "SYMTAB_SHNDX",
            Self::Os(_) | Self::Proc(_) | Self::User(_) | Self::Unknown(_) => return None,
        })
    }
}

bitflags! {
    /// Section attribute flags (`sh_flags`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SectionFlags: u32 {
        const WRITE = 0x1;
        const ALLOC = 0x2;
        const EXECINSTR = 0x4;
        const MERGE = 0x10;
        const STRINGS = 0x20;

        const _ = !0;
    }
}

/// A parsed ELF32 section header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    /// Section name (index into the section name string table).
    pub sh_name: u32,
    /// Raw section type.
    pub sh_type: u32,
    /// Section flags.
    pub sh_flags: SectionFlags,
    /// Virtual address in memory.
    pub sh_addr: u32,
    /// Offset in file.
    pub sh_offset: u32,
    /// Size in bytes.
    pub sh_size: u32,
    /// Link to another section.
    pub sh_link: u32,
    /// Additional section info.
    pub sh_info: u32,
    /// Address alignment.
    pub sh_addralign: u32,
    /// Entry size (for tables).
    pub sh_entsize: u32,
}

impl SectionHeader {
    /// Returns the decoded section type.
    pub fn section_type(&self) -> SectionType {
        SectionType::from(self.sh_type)
    }
}

impl Record for SectionHeader {
    const SIZE: usize = 40;

    fn parse(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < Self::SIZE {
            return Err(ParseError::too_short(Self::SIZE, data.len()));
        }

        Ok(Self {
            sh_name: u32_at(data, 0),
            sh_type: u32_at(data, 4),
            sh_flags: SectionFlags::from_bits_retain(u32_at(data, 8)),
            sh_addr: u32_at(data, 12),
            sh_offset: u32_at(data, 16),
            sh_size: u32_at(data, 20),
            sh_link: u32_at(data, 24),
            sh_info: u32_at(data, 28),
            sh_addralign: u32_at(data, 32),
            sh_entsize: u32_at(data, 36),
        })
    }
}
