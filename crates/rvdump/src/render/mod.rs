//! Text report rendering.
//!
//! The report written to the output file is, in order: the code section
//! name, the instruction listing with label lines, a blank line, and the
//! symbol table. The section table is a separate stdout listing.

pub mod listing;
pub mod sections;
pub mod symbols;

use rvdump_disasm::{collect_symbol_labels, discover_branch_targets, LabelTable, RiscVDisassembler};
use rvdump_formats::{CodeSection, Elf, StringTable, SymbolEntry};
use std::fmt::{self, Write};

/// Builds the label table: function symbols first, then the jump and
/// branch target pre-pass over the whole code section.
pub fn resolve_labels(symbols: &[SymbolEntry], names: &StringTable, text: &CodeSection) -> LabelTable {
    let symbol_labels = collect_symbol_labels(symbols.iter().map(|sym| {
        let name = names.get(sym.st_name).unwrap_or_default();
        (sym.kind(), sym.st_value, name)
    }));
    discover_branch_targets(&text.words, text.address, symbol_labels)
}

/// Renders the full output file contents.
pub fn render_report(elf: &Elf) -> Result<String, fmt::Error> {
    let labels = resolve_labels(&elf.symbols, &elf.symbol_names, &elf.text);

    let mut out = String::new();
    listing::write_listing(&mut out, &elf.text, &labels, &RiscVDisassembler::new())?;
    writeln!(out)?;
    symbols::write_symbols(&mut out, &elf.symbols, &elf.symbol_names)?;
    Ok(out)
}
