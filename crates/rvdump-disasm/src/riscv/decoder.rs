//! RISC-V instruction decoder implementation.
//!
//! Implements decoding for the RV32I base integer instruction set with the
//! M (multiply/divide) extension. Mnemonics come from static tables indexed
//! by funct3; `None` entries are reserved encodings.

use crate::{DecodeError, Disassembler};
use rvdump_core::{FenceFlags, FenceOrdering, Format, Instruction, Register};

use super::fields::{self, *};

// funct7 selectors for OP and OP-IMM shifts
const FUNCT7_BASE: u32 = 0b0000000;
const FUNCT7_ALT: u32 = 0b0100000;
const FUNCT7_MULDIV: u32 = 0b0000001;

const BRANCH: [Option<&str>; 8] = [
    Some("beq"),
    Some("bne"),
    None,
    None,
    Some("blt"),
    Some("bge"),
    Some("bltu"),
    Some("bgeu"),
];

const LOAD: [Option<&str>; 8] = [
    Some("lb"),
    Some("lh"),
    Some("lw"),
    None,
    Some("lbu"),
    Some("lhu"),
    None,
    None,
];

const STORE: [Option<&str>; 8] = [
    Some("sb"),
    Some("sh"),
    Some("sw"),
    None,
    None,
    None,
    None,
    None,
];

// funct3 001 and 101 are the shifts, selected by funct7 below.
const OP_IMM_ARITH: [Option<&str>; 8] = [
    Some("addi"),
    None,
    Some("slti"),
    Some("sltiu"),
    Some("xori"),
    None,
    Some("ori"),
    Some("andi"),
];

const OP_BASE: [Option<&str>; 8] = [
    Some("add"),
    Some("sll"),
    Some("slt"),
    Some("sltu"),
    Some("xor"),
    Some("srl"),
    Some("or"),
    Some("and"),
];

const OP_ALT: [Option<&str>; 8] = [Some("sub"), None, None, None, None, Some("sra"), None, None];

const OP_MULDIV: [Option<&str>; 8] = [
    Some("mul"),
    Some("mulh"),
    Some("mulhsu"),
    Some("mulhu"),
    Some("div"),
    Some("divu"),
    Some("rem"),
    Some("remu"),
];

/// RISC-V RV32IM disassembler.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiscVDisassembler;

impl RiscVDisassembler {
    /// Creates a new RISC-V disassembler.
    pub fn new() -> Self {
        Self
    }

    /// Looks up a mnemonic by funct3, failing on a reserved slot.
    fn select(
        table: &[Option<&'static str>; 8],
        insn: u32,
        address: u32,
        family: &str,
    ) -> Result<&'static str, DecodeError> {
        let funct3 = fields::funct3(insn);
        table[funct3 as usize].ok_or_else(|| {
            DecodeError::invalid_encoding(address, format!("{family} funct3 {funct3:03b}"))
        })
    }

    fn reg_rd(insn: u32) -> Register {
        Register::from_field(fields::rd(insn))
    }

    fn reg_rs1(insn: u32) -> Register {
        Register::from_field(fields::rs1(insn))
    }

    fn reg_rs2(insn: u32) -> Register {
        Register::from_field(fields::rs2(insn))
    }

    /// Decode LUI and AUIPC.
    fn decode_upper(&self, insn: u32, address: u32) -> Instruction {
        // Bit 3 of the major opcode separates LUI (01101) from AUIPC (00101).
        let mnemonic = if opcode(insn) & 0b01000 != 0 {
            "lui"
        } else {
            "auipc"
        };
        Instruction::new(address, insn, mnemonic, Format::U)
            .with_rd(Self::reg_rd(insn))
            .with_imm(imm_u(insn))
    }

    /// Decode JAL.
    fn decode_jal(&self, insn: u32, address: u32) -> Instruction {
        Instruction::new(address, insn, "jal", Format::J)
            .with_rd(Self::reg_rd(insn))
            .with_offset(imm_j(insn))
    }

    /// Decode JALR.
    fn decode_jalr(&self, insn: u32, address: u32) -> Result<Instruction, DecodeError> {
        if funct3(insn) != 0 {
            return Err(DecodeError::invalid_encoding(
                address,
                format!("jalr funct3 {:03b}", funct3(insn)),
            ));
        }
        Ok(Instruction::new(address, insn, "jalr", Format::Jr)
            .with_rd(Self::reg_rd(insn))
            .with_rs1(Self::reg_rs1(insn))
            .with_imm(imm_i(insn)))
    }

    /// Decode branch instructions.
    fn decode_branch(&self, insn: u32, address: u32) -> Result<Instruction, DecodeError> {
        let mnemonic = Self::select(&BRANCH, insn, address, "branch")?;
        Ok(Instruction::new(address, insn, mnemonic, Format::B)
            .with_rs1(Self::reg_rs1(insn))
            .with_rs2(Self::reg_rs2(insn))
            .with_offset(imm_b(insn)))
    }

    /// Decode load instructions.
    fn decode_load(&self, insn: u32, address: u32) -> Result<Instruction, DecodeError> {
        let mnemonic = Self::select(&LOAD, insn, address, "load")?;
        Ok(Instruction::new(address, insn, mnemonic, Format::L)
            .with_rd(Self::reg_rd(insn))
            .with_rs1(Self::reg_rs1(insn))
            .with_imm(imm_i(insn)))
    }

    /// Decode store instructions.
    fn decode_store(&self, insn: u32, address: u32) -> Result<Instruction, DecodeError> {
        let mnemonic = Self::select(&STORE, insn, address, "store")?;
        Ok(Instruction::new(address, insn, mnemonic, Format::S)
            .with_rs1(Self::reg_rs1(insn))
            .with_rs2(Self::reg_rs2(insn))
            .with_imm(imm_s(insn)))
    }

    /// Decode OP-IMM instructions.
    ///
    /// Shift amounts keep the full sign-extended I-immediate, so `srai`
    /// carries its funct7 bit in the rendered value.
    fn decode_op_imm(&self, insn: u32, address: u32) -> Result<Instruction, DecodeError> {
        let mnemonic = match (funct3(insn), funct7(insn)) {
            (0b001, FUNCT7_BASE) => "slli",
            (0b101, FUNCT7_BASE) => "srli",
            (0b101, FUNCT7_ALT) => "srai",
            (0b001 | 0b101, funct7) => {
                return Err(DecodeError::invalid_encoding(
                    address,
                    format!("shift funct7 {funct7:07b}"),
                ))
            }
            _ => Self::select(&OP_IMM_ARITH, insn, address, "op-imm")?,
        };
        Ok(Instruction::new(address, insn, mnemonic, Format::I)
            .with_rd(Self::reg_rd(insn))
            .with_rs1(Self::reg_rs1(insn))
            .with_imm(imm_i(insn)))
    }

    /// Decode register-register instructions, including RV32M.
    fn decode_op_reg(&self, insn: u32, address: u32) -> Result<Instruction, DecodeError> {
        let table = match funct7(insn) {
            FUNCT7_BASE => &OP_BASE,
            FUNCT7_ALT => &OP_ALT,
            FUNCT7_MULDIV => &OP_MULDIV,
            funct7 => {
                return Err(DecodeError::invalid_encoding(
                    address,
                    format!("op funct7 {funct7:07b}"),
                ))
            }
        };
        let mnemonic = Self::select(table, insn, address, "op")?;
        Ok(Instruction::new(address, insn, mnemonic, Format::R)
            .with_rd(Self::reg_rd(insn))
            .with_rs1(Self::reg_rs1(insn))
            .with_rs2(Self::reg_rs2(insn)))
    }

    /// Decode FENCE.
    fn decode_fence(&self, insn: u32, address: u32) -> Result<Instruction, DecodeError> {
        if funct3(insn) != 0 {
            return Err(DecodeError::invalid_encoding(
                address,
                format!("fence funct3 {:03b}", funct3(insn)),
            ));
        }
        // pred = bits 27:24, succ = bits 23:20
        let ordering = FenceOrdering {
            predecessor: FenceFlags::from_bits_truncate(((insn >> 24) & 0xF) as u8),
            successor: FenceFlags::from_bits_truncate(((insn >> 20) & 0xF) as u8),
        };
        Ok(Instruction::new(address, insn, "fence", Format::Fence).with_ordering(ordering))
    }

    /// Decode ECALL/EBREAK. Only bit 20 is consulted.
    fn decode_system(&self, insn: u32, address: u32) -> Instruction {
        let mnemonic = if (insn >> 20) & 1 == 0 {
            "ecall"
        } else {
            "ebreak"
        };
        Instruction::new(address, insn, mnemonic, Format::System)
    }
}

impl Disassembler for RiscVDisassembler {
    fn decode(&self, insn: u32, address: u32) -> Result<Instruction, DecodeError> {
        if !is_full_width(insn) {
            return Err(DecodeError::not_full_width(address, insn));
        }

        match opcode(insn) {
            OP_LUI | OP_AUIPC => Ok(self.decode_upper(insn, address)),
            OP_JAL => Ok(self.decode_jal(insn, address)),
            OP_JALR => self.decode_jalr(insn, address),
            OP_BRANCH => self.decode_branch(insn, address),
            OP_LOAD => self.decode_load(insn, address),
            OP_STORE => self.decode_store(insn, address),
            OP_IMM => self.decode_op_imm(insn, address),
            OP_REG => self.decode_op_reg(insn, address),
            OP_FENCE => self.decode_fence(insn, address),
            OP_SYSTEM => Ok(self.decode_system(insn, address)),
            _ => Err(DecodeError::unknown_opcode(address, insn)),
        }
    }
}
