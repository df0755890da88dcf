//! RV32 integer register representation.

use std::fmt;

/// ABI names of the integer registers, indexed by register number.
const ABI_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", // x0-x7
    "s0", "s1", "a0", "a1", "a2", "a3", "a4", "a5", // x8-x15
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", // x16-x23
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6", // x24-x31
];

/// An integer register `x0`..`x31`.
///
/// Register fields in the instruction encoding are five bits wide, so every
/// value produced by [`Register::from_field`] is a valid register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Register(u8);

impl Register {
    pub const ZERO: Self = Self(0);
    pub const RA: Self = Self(1);
    pub const SP: Self = Self(2);

    /// Creates a register from a raw 5-bit instruction field.
    ///
    /// Bits above the low five are ignored.
    pub fn from_field(field: u32) -> Self {
        Self((field & 0x1F) as u8)
    }

    /// Returns the ABI name (`zero`, `ra`, `sp`, ...).
    pub fn name(self) -> &'static str {
        ABI_NAMES[self.0 as usize]
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
