//! # rvdump-formats
//!
//! Container reader for rvdump. Loads 32-bit little-endian RISC-V ELF
//! executables: header validation, program and section header tables,
//! string tables, the symbol table and the `.text` code words.
//!
//! Every read goes through [`ByteSource`], so anything implementing
//! `Read + Seek` can back the reader.

pub mod elf;
pub mod error;
pub mod traits;

pub use elf::{CodeSection, Elf, ElfHeader, SectionHeader, StringTable, SymbolEntry};
pub use error::{ErrorKind, ParseError};
pub use traits::{read_table, ByteSource, Record};
