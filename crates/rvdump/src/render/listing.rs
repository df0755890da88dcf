//! Instruction listing.

use log::trace;
use rvdump_core::{Format, Instruction, Register};
use rvdump_disasm::{Disassembler, LabelTable};
use rvdump_formats::CodeSection;
use std::fmt::{self, Write};

/// Writes the section name line, then one line per decoded word, each
/// preceded by its label line if the address is named.
///
/// Words that fail to decode produce no instruction line but still get
/// their label line.
pub fn write_listing<W, D>(
    out: &mut W,
    text: &CodeSection,
    labels: &LabelTable,
    disasm: &D,
) -> fmt::Result
where
    W: Write,
    D: Disassembler + ?Sized,
{
    writeln!(out, "{}", text.name)?;

    for (address, word) in text.iter() {
        if let Some(name) = labels.name(address) {
            write_label(out, address, name)?;
        }
        match disasm.decode(word, address) {
            Ok(inst) => write_instruction(out, &inst, labels)?,
            Err(err) => trace!("skipped: {err}"),
        }
    }

    Ok(())
}

/// Writes a label line.
pub fn write_label<W: Write>(out: &mut W, address: u32, name: &str) -> fmt::Result {
    writeln!(out, "{address:08x} \t<{name}>:")
}

/// Writes one instruction line.
pub fn write_instruction<W: Write>(
    out: &mut W,
    inst: &Instruction,
    labels: &LabelTable,
) -> fmt::Result {
    write!(
        out,
        "   {:05x}:\t{:08x}\t\t\t\t{:<7}",
        inst.address, inst.word, inst.mnemonic
    )?;
    if inst.format == Format::System {
        return writeln!(out);
    }
    out.write_char('\t')?;

    let rd = reg(inst.rd);
    let rs1 = reg(inst.rs1);
    let rs2 = reg(inst.rs2);
    let imm = inst.imm;

    match inst.format {
        Format::R => writeln!(out, "{rd}, {rs1}, {rs2}"),
        Format::I => writeln!(out, "{rd}, {rs1}, {imm}"),
        Format::S => writeln!(out, "{rs2}, {imm}({rs1})"),
        Format::L => writeln!(out, "{rd}, {imm}({rs1})"),
        Format::U => writeln!(out, "{rd}, {imm}"),
        Format::B => {
            let target = inst.target.unwrap_or_default();
            let label = labels.name(target).unwrap_or_default();
            writeln!(out, "{rs1}, {rs2}, 0x{target:x} <{label}>")
        }
        Format::J => {
            let target = inst.target.unwrap_or_default();
            let label = labels.name(target).unwrap_or_default();
            writeln!(out, "{rd}, 0x{target:x} <{label}>")
        }
        // Two's complement, no prefix.
        Format::Jr => writeln!(out, "{rd}, {imm:x}({rs1})"),
        Format::Fence => match inst.ordering {
            Some(ordering) => writeln!(out, "{}, {}", ordering.predecessor, ordering.successor),
            None => writeln!(out, ", "),
        },
        Format::System => writeln!(out),
    }
}

fn reg(register: Option<Register>) -> &'static str {
    register.unwrap_or(Register::ZERO).name()
}
