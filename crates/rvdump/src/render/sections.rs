//! Section table listing.

use rvdump_formats::elf::{SectionFlags, SectionType};
use rvdump_formats::{SectionHeader, StringTable};
use std::borrow::Cow;
use std::fmt::{self, Write};

const INDEX_W: usize = 7;
const NAME_W: usize = 18;
const TYPE_W: usize = 13;
const OFFSET_W: usize = 10;
const SIZE_W: usize = 10;

/// Flag letters in column order; the fourth column is always blank.
const FLAG_COLUMNS: [Option<(SectionFlags, char)>; 6] = [
    Some((SectionFlags::WRITE, 'W')),
    Some((SectionFlags::ALLOC, 'A')),
    Some((SectionFlags::EXECINSTR, 'X')),
    None,
    Some((SectionFlags::MERGE, 'M')),
    Some((SectionFlags::STRINGS, 'S')),
];

/// Writes the section table: a heading, a rule, then one row per section
/// with index, name, type, file offset, size, flags and address.
pub fn write_sections<W: Write>(
    out: &mut W,
    sections: &[SectionHeader],
    names: &StringTable,
) -> fmt::Result {
    let flags_w = FLAG_COLUMNS.len();
    writeln!(
        out,
        " {:<INDEX_W$} | {:<NAME_W$} | {:<TYPE_W$} | {:<OFFSET_W$} | {:<SIZE_W$} | {:<flags_w$}",
        "Section", "Name", "Type", "Offset", "Size", "Flags"
    )?;
    writeln!(
        out,
        "-{}-+-{}-+-{}-+-{}-+-{}-+-{}-",
        "-".repeat(INDEX_W),
        "-".repeat(NAME_W),
        "-".repeat(TYPE_W),
        "-".repeat(OFFSET_W),
        "-".repeat(SIZE_W),
        "-".repeat(flags_w)
    )?;

    for (index, section) in sections.iter().enumerate() {
        let name = names.get(section.sh_name).unwrap_or_default();
        writeln!(
            out,
            "   [{:>3}] | {:<NAME_W$} | {:<TYPE_W$} | 0x{:<ow$X} | 0x{:<sw$X} | {} {:X}",
            index,
            name,
            type_name(section.sh_type),
            section.sh_offset,
            section.sh_size,
            flag_letters(section.sh_flags),
            section.sh_addr,
            ow = OFFSET_W - 2,
            sw = SIZE_W - 2,
        )?;
    }

    Ok(())
}

/// Returns the display name of a raw section type.
pub fn type_name(sh_type: u32) -> Cow<'static, str> {
    let ranged = |prefix: &str, value: u32| Cow::Owned(format!("{prefix}_{:07X}", value & 0x0FFF_FFFF));
    match SectionType::from(sh_type) {
        SectionType::Os(value) => ranged("OS", value),
        SectionType::Proc(value) => ranged("PROC", value),
        SectionType::User(value) => ranged("USER", value),
        other => Cow::Borrowed(other.name().unwrap_or("UNKNOWN")),
    }
}

/// Returns the fixed-column flag string, blank where a flag is clear.
pub fn flag_letters(flags: SectionFlags) -> String {
    FLAG_COLUMNS
        .iter()
        .map(|column| match column {
            Some((flag, letter)) if flags.contains(*flag) => *letter,
            _ => ' ',
        })
        .collect()
}
