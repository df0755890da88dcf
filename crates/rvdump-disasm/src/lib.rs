//! # rvdump-disasm
//!
//! RISC-V instruction decoding for rvdump.
//!
//! This crate provides:
//! - An RV32IM decoder for 32-bit encodings behind the [`Disassembler`] trait
//! - Bit-field helpers for every RISC-V immediate format
//! - The label table and the jump/branch target pre-pass

pub mod error;
pub mod labels;
pub mod riscv;
pub mod traits;

pub use error::DecodeError;
pub use labels::{collect_symbol_labels, discover_branch_targets, Label, LabelSource, LabelTable};
pub use riscv::RiscVDisassembler;
pub use traits::Disassembler;
