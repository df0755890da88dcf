//! Decoded instruction representation.

use crate::Register;
use bitflags::bitflags;
use std::fmt;

/// Instruction format, as far as operand layout and rendering are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    /// Register-register arithmetic (`add`, `mul`, ...).
    R,
    /// Register-immediate arithmetic (`addi`, `slli`, ...).
    I,
    /// Loads; I-type encoding with memory operand rendering.
    L,
    /// Stores.
    S,
    /// Conditional branches.
    B,
    /// Upper-immediate (`lui`, `auipc`).
    U,
    /// `jal`.
    J,
    /// `jalr`.
    Jr,
    /// `fence`.
    Fence,
    /// `ecall` / `ebreak`.
    System,
}

impl Format {
    /// Returns true for formats whose immediate is a PC-relative branch offset.
    pub fn has_target(self) -> bool {
        matches!(self, Self::B | Self::J)
    }
}

bitflags! {
    /// One side of a `fence` ordering: device input/output, memory read/write.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FenceFlags: u8 {
        const I = 0b0001;
        const O = 0b0010;
        const R = 0b0100;
        const W = 0b1000;
    }
}

impl fmt::Display for FenceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, letter) in [
            (Self::I, 'i'),
            (Self::O, 'o'),
            (Self::R, 'r'),
            (Self::W, 'w'),
        ] {
            if self.contains(flag) {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

/// Predecessor and successor sets of a `fence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FenceOrdering {
    pub predecessor: FenceFlags,
    pub successor: FenceFlags,
}

/// A decoded 32-bit instruction.
///
/// Register operands are `None` when the format does not use them. For
/// [`Format::B`] and [`Format::J`] the absolute branch target is resolved at
/// decode time from the instruction address and the sign-extended offset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Instruction {
    /// Address of this instruction.
    pub address: u32,
    /// Raw instruction word.
    pub word: u32,
    /// Mnemonic (e.g., "addi", "beq").
    pub mnemonic: &'static str,
    /// Operand layout.
    pub format: Format,
    /// Destination register.
    pub rd: Option<Register>,
    /// First source register.
    pub rs1: Option<Register>,
    /// Second source register.
    pub rs2: Option<Register>,
    /// Sign-extended immediate; zero for formats without one.
    pub imm: i32,
    /// Absolute branch/jump target.
    pub target: Option<u32>,
    /// Ordering sets, only for `fence`.
    pub ordering: Option<FenceOrdering>,
}

impl Instruction {
    /// Creates a new instruction with no operands.
    pub fn new(address: u32, word: u32, mnemonic: &'static str, format: Format) -> Self {
        Self {
            address,
            word,
            mnemonic,
            format,
            rd: None,
            rs1: None,
            rs2: None,
            imm: 0,
            target: None,
            ordering: None,
        }
    }

    /// Sets the destination register.
    pub fn with_rd(mut self, rd: Register) -> Self {
        self.rd = Some(rd);
        self
    }

    /// Sets the first source register.
    pub fn with_rs1(mut self, rs1: Register) -> Self {
        self.rs1 = Some(rs1);
        self
    }

    /// Sets the second source register.
    pub fn with_rs2(mut self, rs2: Register) -> Self {
        self.rs2 = Some(rs2);
        self
    }

    /// Sets the immediate.
    pub fn with_imm(mut self, imm: i32) -> Self {
        self.imm = imm;
        self
    }

    /// Sets the immediate and derives the absolute target from it.
    pub fn with_offset(mut self, offset: i32) -> Self {
        self.imm = offset;
        self.target = Some(self.address.wrapping_add_signed(offset));
        self
    }

    /// Sets the fence ordering.
    pub fn with_ordering(mut self, ordering: FenceOrdering) -> Self {
        self.ordering = Some(ordering);
        self
    }
}
