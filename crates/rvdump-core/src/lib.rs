//! # rvdump-core
//!
//! Core value types shared by the rvdump crates. This crate defines the
//! RV32 register file naming, the decoded instruction model produced by the
//! disassembler, and the classification enums for ELF symbol records.

pub mod instruction;
pub mod register;
pub mod symbol;

pub use instruction::{FenceFlags, FenceOrdering, Format, Instruction};
pub use register::Register;
pub use symbol::{SectionIndex, SymbolBinding, SymbolKind, SymbolVisibility};
