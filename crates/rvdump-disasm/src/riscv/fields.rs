//! Bit-field extraction for 32-bit RISC-V encodings.
//!
//! All immediates are returned sign-extended to `i32` except the U-type
//! immediate, which is already shifted into place.

// Major opcodes (bits 6:2; bits 1:0 are always 11)
pub const OP_LOAD: u32 = 0b00000; // 0x03
pub const OP_FENCE: u32 = 0b00011; // 0x0F
pub const OP_IMM: u32 = 0b00100; // 0x13
pub const OP_AUIPC: u32 = 0b00101; // 0x17
pub const OP_STORE: u32 = 0b01000; // 0x23
pub const OP_REG: u32 = 0b01100; // 0x33
pub const OP_LUI: u32 = 0b01101; // 0x37
pub const OP_BRANCH: u32 = 0b11000; // 0x63
pub const OP_JALR: u32 = 0b11001; // 0x67
pub const OP_JAL: u32 = 0b11011; // 0x6F
pub const OP_SYSTEM: u32 = 0b11100; // 0x73

/// Returns true for a 32-bit encoding: bits 1:0 are `11` and bits 4:2 are
/// not `111`.
pub fn is_full_width(insn: u32) -> bool {
    insn & 0b11 == 0b11 && insn & 0b11100 != 0b11100
}

/// Extract the major opcode (bits 6:2)
pub fn opcode(insn: u32) -> u32 {
    (insn >> 2) & 0x1F
}

/// Extract rd field (bits 11:7)
pub fn rd(insn: u32) -> u32 {
    (insn >> 7) & 0x1F
}

/// Extract rs1 field (bits 19:15)
pub fn rs1(insn: u32) -> u32 {
    (insn >> 15) & 0x1F
}

/// Extract rs2 field (bits 24:20)
pub fn rs2(insn: u32) -> u32 {
    (insn >> 20) & 0x1F
}

/// Extract funct3 field (bits 14:12)
pub fn funct3(insn: u32) -> u32 {
    (insn >> 12) & 0x7
}

/// Extract funct7 field (bits 31:25)
pub fn funct7(insn: u32) -> u32 {
    (insn >> 25) & 0x7F
}

/// Extract I-type immediate (sign-extended)
pub fn imm_i(insn: u32) -> i32 {
    (insn as i32) >> 20
}

/// Extract S-type immediate (sign-extended)
pub fn imm_s(insn: u32) -> i32 {
    let imm11_5 = (insn >> 25) & 0x7F;
    let imm4_0 = (insn >> 7) & 0x1F;
    let imm = (imm11_5 << 5) | imm4_0;
    // Sign-extend from 12 bits
    ((imm as i32) << 20) >> 20
}

/// Extract B-type immediate (sign-extended)
pub fn imm_b(insn: u32) -> i32 {
    let imm12 = (insn >> 31) & 1;
    let imm10_5 = (insn >> 25) & 0x3F;
    let imm4_1 = (insn >> 8) & 0xF;
    let imm11 = (insn >> 7) & 1;
    let imm = (imm12 << 12) | (imm11 << 11) | (imm10_5 << 5) | (imm4_1 << 1);
    // Sign-extend from 13 bits
    ((imm as i32) << 19) >> 19
}

/// Extract U-type immediate (already shifted)
pub fn imm_u(insn: u32) -> i32 {
    (insn & 0xFFFF_F000) as i32
}

/// Extract J-type immediate (sign-extended)
pub fn imm_j(insn: u32) -> i32 {
    let imm20 = (insn >> 31) & 1;
    let imm10_1 = (insn >> 21) & 0x3FF;
    let imm11 = (insn >> 20) & 1;
    let imm19_12 = (insn >> 12) & 0xFF;
    let imm = (imm20 << 20) | (imm19_12 << 12) | (imm11 << 11) | (imm10_1 << 1);
    // Sign-extend from 21 bits
    ((imm as i32) << 11) >> 11
}

/// Returns the PC-relative target of a word that looks like a jump or a
/// branch, judged on bits 6:2 alone.
///
/// Nothing else is checked: a reserved branch funct3 or a non-`11` low
/// pair still yields a target.
pub fn control_target(insn: u32, address: u32) -> Option<u32> {
    let offset = match opcode(insn) {
        OP_JAL => imm_j(insn),
        OP_BRANCH => imm_b(insn),
        _ => return None,
    };
    Some(address.wrapping_add_signed(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_fields() {
        // add t2, s1, a5
        let insn: u32 = (15 << 20) | (9 << 15) | (7 << 7) | 0b0110011;
        assert_eq!(opcode(insn), OP_REG);
        assert_eq!(rd(insn), 7);
        assert_eq!(rs1(insn), 9);
        assert_eq!(rs2(insn), 15);
        assert_eq!(funct3(insn), 0);
        assert_eq!(funct7(insn), 0);
    }

    #[test]
    fn test_imm_i_sign() {
        assert_eq!(imm_i(0xFFF0_0013), -1);
        assert_eq!(imm_i(0x7FF0_0013), 2047);
        assert_eq!(imm_i(0x8000_0013), -2048);
    }

    #[test]
    fn test_imm_s() {
        // sw a0, -4(sp): imm[11:5]=0x7f, imm[4:0]=0x1c
        let insn: u32 = (0x7F << 25) | (10 << 20) | (2 << 15) | (0b010 << 12) | (0x1C << 7) | 0x23;
        assert_eq!(imm_s(insn), -4);
    }

    #[test]
    fn test_imm_b_extremes() {
        // Only imm[12] set: -4096
        assert_eq!(imm_b(0x8000_0063), -4096);
        // imm[11] via bit 7
        assert_eq!(imm_b(0x0000_0080 | 0x63), 2048);
        // imm[4:1] all set
        assert_eq!(imm_b(0x0000_0F00 | 0x63), 30);
    }

    #[test]
    fn test_imm_j_extremes() {
        assert_eq!(imm_j(0x8000_006F), -(1 << 20));
        assert_eq!(imm_j(0x0010_006F), 2048);
        assert_eq!(imm_j(0x000F_F06F), 0xFF000);
        assert_eq!(imm_j(0x7FE0_006F), 2046);
    }

    #[test]
    fn test_imm_u() {
        assert_eq!(imm_u(0x1234_5537), 0x1234_5000);
        assert_eq!(imm_u(0xFFFF_F537), -4096);
    }

    #[test]
    fn test_full_width() {
        assert!(is_full_width(0x0000_0013));
        // Compressed: low bits 01
        assert!(!is_full_width(0x0000_0001));
        // 48-bit and longer prefixes: bits 4:2 = 111
        assert!(!is_full_width(0x0000_001F));
        assert!(!is_full_width(0x0000_007F));
    }

    #[test]
    fn test_control_target_ignores_low_bits() {
        // jal zero, -8 with the low pair cleared is still treated as a jump
        let jal: u32 = 0xFF9F_F06F;
        assert_eq!(control_target(jal, 0x100), Some(0xF8));
        assert_eq!(control_target(jal & !0b11, 0x100), Some(0xF8));
        assert_eq!(control_target(0x0000_0013, 0x100), None);
    }
}
