//! Symbol table listing.

use rvdump_formats::{StringTable, SymbolEntry};
use std::fmt::{self, Write};

const HEADER: &str = "Symbol Value              Size Type     Bind     Vis       Index Name";

/// Writes the `.symtab` heading and one row per symbol in table order.
///
/// Unnamed type, binding and visibility values render as blank columns.
pub fn write_symbols<W: Write>(
    out: &mut W,
    symbols: &[SymbolEntry],
    names: &StringTable,
) -> fmt::Result {
    writeln!(out, ".symtab")?;
    writeln!(out, "{HEADER}")?;

    for (index, sym) in symbols.iter().enumerate() {
        writeln!(
            out,
            "[{:>4}] 0x{:<15x} {:>5} {:<8} {:<8} {:<8} {:>6} {}",
            index,
            sym.st_value,
            sym.st_size,
            sym.kind().name(),
            sym.binding().name(),
            sym.visibility().name(),
            sym.section_index(),
            names.get(sym.st_name).unwrap_or_default(),
        )?;
    }

    Ok(())
}
