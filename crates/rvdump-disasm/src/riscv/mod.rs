//! RISC-V instruction decoder.
//!
//! Supports the 32-bit base integer encodings of RV32I plus the M extension
//! (multiply/divide). Compressed 16-bit encodings and the floating-point,
//! atomic and CSR extensions are not decoded; such words are reported as
//! errors and skipped by callers.

mod decoder;
pub mod fields;

pub use decoder::RiscVDisassembler;
