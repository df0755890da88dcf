//! ELF (Executable and Linkable Format) reader for 32-bit RISC-V executables.
//!
//! Reading happens in a fixed order: file header, program headers, section
//! headers, section name string table, then the three sections the
//! disassembler needs (`.text`, `.symtab` and `.strtab`). Every table is
//! loaded fully into memory; nothing is read lazily.

mod header;
mod section;
mod segment;
mod strtab;
mod symbol;

pub use header::{ElfHeader, ELF_MAGIC, EM_RISCV, ET_EXEC, EXPECTED_IDENT};
pub use section::{SectionFlags, SectionHeader, SectionType};
pub use section::{SHT_NOBITS, SHT_NULL, SHT_PROGBITS, SHT_STRTAB, SHT_SYMTAB};
pub use segment::{ProgramHeader, PF_R, PF_W, PF_X};
pub use segment::{PT_DYNAMIC, PT_INTERP, PT_LOAD, PT_NOTE, PT_NULL, PT_PHDR, PT_RISCV_ATTRIBUTES, PT_TLS};
pub use strtab::StringTable;
pub use symbol::SymbolEntry;

use crate::{read_table, ByteSource, ParseError, Record};
use log::debug;
use std::borrow::Cow;

/// Reads a little-endian `u16` at `offset`. Callers check the length.
pub(crate) fn u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Reads a little-endian `u32` at `offset`. Callers check the length.
pub(crate) fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Name of the code section.
pub const TEXT: &str = ".text";
/// Name of the symbol table section.
pub const SYMTAB: &str = ".symtab";
/// Name of the symbol string table section.
pub const STRTAB: &str = ".strtab";

/// Indices of the sections the disassembler needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredSections {
    /// `.text`, type `PROGBITS`.
    pub text: usize,
    /// `.symtab`, type `SYMTAB`.
    pub symtab: usize,
    /// `.strtab`, type `STRTAB`.
    pub strtab: usize,
}

/// Finds `.text`, `.symtab` and `.strtab` by name and type.
///
/// Sections are scanned in table order and the first match per category
/// wins. A name match with the wrong type does not count.
pub fn locate_sections(
    sections: &[SectionHeader],
    section_names: &StringTable,
) -> Result<RequiredSections, ParseError> {
    let find = |name: &'static str, sh_type: u32| {
        sections
            .iter()
            .position(|s| s.sh_type == sh_type && section_names.matches(s.sh_name, name))
            .ok_or(ParseError::missing_section(name))
    };

    Ok(RequiredSections {
        text: find(TEXT, SHT_PROGBITS)?,
        symtab: find(SYMTAB, SHT_SYMTAB)?,
        strtab: find(STRTAB, SHT_STRTAB)?,
    })
}

/// The code section as a dense array of instruction words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSection {
    /// Section name as found in the section name table.
    pub name: String,
    /// Virtual address of the first word.
    pub address: u32,
    /// One little-endian word per 4-byte offset. A trailing partial word
    /// is dropped.
    pub words: Vec<u32>,
}

impl CodeSection {
    /// Iterates `(address, word)` pairs in stream order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let base = self.address;
        self.words
            .iter()
            .enumerate()
            .map(move |(i, &word)| (base.wrapping_add((i as u32).wrapping_mul(4)), word))
    }
}

/// A fully loaded RISC-V ELF32 executable.
///
/// All tables are read once by [`Elf::read`] and stay immutable afterwards.
#[derive(Debug, Clone)]
pub struct Elf {
    /// Parsed ELF header.
    pub header: ElfHeader,
    /// Program headers (segments).
    pub segments: Vec<ProgramHeader>,
    /// Section headers, including the null section at index 0.
    pub sections: Vec<SectionHeader>,
    /// Section name string table.
    pub section_names: StringTable,
    /// The `.text` section contents.
    pub text: CodeSection,
    /// Raw `.symtab` records in table order.
    pub symbols: Vec<SymbolEntry>,
    /// `.strtab`, used for symbol names.
    pub symbol_names: StringTable,
}

impl Elf {
    /// Reads and validates an executable from `source`.
    pub fn read<S: ByteSource + ?Sized>(source: &mut S) -> Result<Self, ParseError> {
        let header = ElfHeader::read(source)?;
        debug!(
            "file header: entry={:#x} phnum={} shnum={} shstrndx={}",
            header.e_entry, header.e_phnum, header.e_shnum, header.e_shstrndx
        );

        let segments: Vec<ProgramHeader> = read_table(
            source,
            header.e_phoff as u64,
            header.e_phnum as usize,
            "program headers",
        )?;
        debug!(
            "program headers: {} segments, {} loadable, {} executable",
            segments.len(),
            segments.iter().filter(|s| s.is_load()).count(),
            segments.iter().filter(|s| s.is_executable()).count()
        );

        let sections: Vec<SectionHeader> = read_table(
            source,
            header.e_shoff as u64,
            header.e_shnum as usize,
            "section headers",
        )?;
        debug!("section headers: {} sections", sections.len());

        let section_names = Self::read_section_names(source, &header, &sections)?;
        debug!("section name table: {} bytes", section_names.len());

        let required = locate_sections(&sections, &section_names)?;
        let text_header = &sections[required.text];
        let symtab_header = &sections[required.symtab];
        let strtab_header = &sections[required.strtab];

        let symbol_names = StringTable::read(
            source,
            strtab_header.sh_offset as u64,
            strtab_header.sh_size as usize,
            "symbol string table",
        )?;
        debug!("symbol string table: {} bytes", symbol_names.len());

        let symbols = Self::read_symbols(source, symtab_header)?;
        debug!("symbol table: {} symbols", symbols.len());

        let words: Vec<u32> = read_table(
            source,
            text_header.sh_offset as u64,
            text_header.sh_size as usize / u32::SIZE,
            "code words",
        )?;
        debug!(
            "code: {} words at {:#x}",
            words.len(),
            text_header.sh_addr
        );

        let text = CodeSection {
            name: section_names
                .get(text_header.sh_name)
                .unwrap_or_default()
                .into_owned(),
            address: text_header.sh_addr,
            words,
        };

        Ok(Self {
            header,
            segments,
            sections,
            section_names,
            text,
            symbols,
            symbol_names,
        })
    }

    fn read_section_names<S: ByteSource + ?Sized>(
        source: &mut S,
        header: &ElfHeader,
        sections: &[SectionHeader],
    ) -> Result<StringTable, ParseError> {
        let index = header.e_shstrndx as usize;
        let shstrtab = sections.get(index).ok_or_else(|| {
            ParseError::invalid_structure(
                "section name table",
                header.e_shoff as u64,
                format!("index {index} out of {} sections", sections.len()),
            )
        })?;
        StringTable::read(
            source,
            shstrtab.sh_offset as u64,
            shstrtab.sh_size as usize,
            "section name table",
        )
    }

    fn read_symbols<S: ByteSource + ?Sized>(
        source: &mut S,
        symtab: &SectionHeader,
    ) -> Result<Vec<SymbolEntry>, ParseError> {
        if symtab.sh_entsize == 0 {
            return Err(ParseError::invalid_structure(
                "symbol table",
                symtab.sh_offset as u64,
                "zero entry size",
            ));
        }
        let count = (symtab.sh_size / symtab.sh_entsize) as usize;
        read_table(source, symtab.sh_offset as u64, count, "symbol table")
    }

    /// Returns the name of a section.
    pub fn section_name(&self, section: &SectionHeader) -> Cow<'_, str> {
        self.section_names.get(section.sh_name).unwrap_or_default()
    }

    /// Returns the name of a symbol.
    pub fn symbol_name(&self, symbol: &SymbolEntry) -> Cow<'_, str> {
        self.symbol_names.get(symbol.st_name).unwrap_or_default()
    }
}
