//! ELF symbol table parsing.

use super::{u16_at, u32_at};
use crate::{ParseError, Record};
use rvdump_core::{SectionIndex, SymbolBinding, SymbolKind, SymbolVisibility};

/// A raw ELF32 symbol table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    /// Symbol name (index into the symbol string table).
    pub st_name: u32,
    /// Symbol value (address).
    pub st_value: u32,
    /// Symbol size.
    pub st_size: u32,
    /// Symbol info (type and binding).
    pub st_info: u8,
    /// Symbol visibility.
    pub st_other: u8,
    /// Section index.
    pub st_shndx: u16,
}

impl SymbolEntry {
    /// Returns the symbol type.
    pub fn kind(&self) -> SymbolKind {
        SymbolKind::from_info(self.st_info)
    }

    /// Returns the symbol binding.
    pub fn binding(&self) -> SymbolBinding {
        SymbolBinding::from_info(self.st_info)
    }

    /// Returns the symbol visibility (low two bits of `st_other`).
    pub fn visibility(&self) -> SymbolVisibility {
        SymbolVisibility::from_raw(self.st_other & 0x3)
    }

    /// Returns the section index, with reserved values decoded.
    pub fn section_index(&self) -> SectionIndex {
        SectionIndex::from_raw(self.st_shndx)
    }

    /// Returns true if this symbol names a function.
    pub fn is_function(&self) -> bool {
        self.kind() == SymbolKind::Function
    }
}

impl Record for SymbolEntry {
    const SIZE: usize = 16;

    fn parse(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < Self::SIZE {
            return Err(ParseError::too_short(Self::SIZE, data.len()));
        }

        Ok(Self {
            st_name: u32_at(data, 0),
            st_value: u32_at(data, 4),
            st_size: u32_at(data, 8),
            st_info: data[12],
            st_other: data[13],
            st_shndx: u16_at(data, 14),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_function_symbol() {
        let mut data = vec![0u8; 16];
        data[0..4].copy_from_slice(&9u32.to_le_bytes());
        data[4..8].copy_from_slice(&0x1_0074u32.to_le_bytes());
        data[8..12].copy_from_slice(&28u32.to_le_bytes());
        // GLOBAL FUNC
        data[12] = 0x12;
        // hidden
        data[13] = 0x02;
        data[14..16].copy_from_slice(&1u16.to_le_bytes());

        let sym = SymbolEntry::parse(&data).unwrap();
        assert_eq!(sym.st_name, 9);
        assert_eq!(sym.st_value, 0x1_0074);
        assert_eq!(sym.st_size, 28);
        assert!(sym.is_function());
        assert_eq!(sym.binding(), SymbolBinding::Global);
        assert_eq!(sym.visibility(), SymbolVisibility::Hidden);
        assert_eq!(sym.section_index(), SectionIndex::Index(1));
    }

    #[test]
    fn test_visibility_ignores_high_bits() {
        let mut data = vec![0u8; 16];
        data[13] = 0xf1;
        let sym = SymbolEntry::parse(&data).unwrap();
        assert_eq!(sym.visibility(), SymbolVisibility::Internal);
        assert_eq!(sym.section_index(), SectionIndex::Undefined);
    }

    #[test]
    fn test_absolute_file_symbol() {
        let mut data = vec![0u8; 16];
        data[12] = 0x04;
        data[14..16].copy_from_slice(&0xfff1u16.to_le_bytes());
        let sym = SymbolEntry::parse(&data).unwrap();
        assert_eq!(sym.kind(), SymbolKind::File);
        assert_eq!(sym.binding(), SymbolBinding::Local);
        assert_eq!(sym.section_index(), SectionIndex::Absolute);
    }
}
