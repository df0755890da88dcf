//! Address labels for control-flow targets.
//!
//! Labels come from two places, in this order:
//! 1. Function symbols ([`collect_symbol_labels`]). The first symbol seen
//!    at an address names it.
//! 2. The pre-pass over the code stream ([`discover_branch_targets`]),
//!    which names every unlabelled jump or branch target `L0`, `L1`, ... in
//!    first-encounter order.
//!
//! The pre-pass must finish before any line is rendered, so a backward
//! reference and a forward reference see the same name.

use crate::riscv::fields;
use log::debug;
use rvdump_core::SymbolKind;
use std::collections::btree_map::{BTreeMap, Entry};

/// Where a label name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    /// A function symbol.
    Symbol,
    /// Synthesized for an unnamed jump or branch target.
    Synthesized,
}

/// A named address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub source: LabelSource,
}

/// Mapping from absolute address to display name.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    labels: BTreeMap<u32, Label>,
    synthesized: usize,
}

impl LabelTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a symbol-derived name unless the address is already named.
    ///
    /// Returns true if the name was inserted.
    pub fn insert_symbol(&mut self, address: u32, name: impl Into<String>) -> bool {
        match self.labels.entry(address) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Label {
                    name: name.into(),
                    source: LabelSource::Symbol,
                });
                true
            }
        }
    }

    /// Names `address` with the next synthesized label unless it already
    /// has a name.
    ///
    /// Returns true if a new label was created.
    pub fn insert_synthesized(&mut self, address: u32) -> bool {
        match self.labels.entry(address) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Label {
                    name: format!("L{}", self.synthesized),
                    source: LabelSource::Synthesized,
                });
                self.synthesized += 1;
                true
            }
        }
    }

    /// Returns the label at `address`.
    pub fn get(&self, address: u32) -> Option<&Label> {
        self.labels.get(&address)
    }

    /// Returns the display name at `address`.
    pub fn name(&self, address: u32) -> Option<&str> {
        self.get(address).map(|label| label.name.as_str())
    }

    /// Number of synthesized labels.
    pub fn synthesized_count(&self) -> usize {
        self.synthesized
    }

    /// Total number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no address is named.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Builds the symbol part of the label table.
///
/// `symbols` yields `(kind, address, name)` in symbol table order. Only
/// function symbols produce labels; a later symbol at an already named
/// address is ignored.
pub fn collect_symbol_labels<I, N>(symbols: I) -> LabelTable
where
    I: IntoIterator<Item = (SymbolKind, u32, N)>,
    N: Into<String>,
{
    let mut table = LabelTable::new();
    for (kind, address, name) in symbols {
        if kind == SymbolKind::Function {
            table.insert_symbol(address, name);
        }
    }
    debug!("labels: {} from function symbols", table.len());
    table
}

/// Runs the label pre-pass over `words` located at `base_address`.
///
/// Every word whose major opcode is JAL or BRANCH contributes its target,
/// whether or not the rest of the word decodes.
pub fn discover_branch_targets(words: &[u32], base_address: u32, mut labels: LabelTable) -> LabelTable {
    let mut address = base_address;
    for &word in words {
        if let Some(target) = fields::control_target(word, address) {
            labels.insert_synthesized(target);
        }
        address = address.wrapping_add(4);
    }
    debug!(
        "labels: {} total, {} synthesized",
        labels.len(),
        labels.synthesized_count()
    );
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `jal zero, offset`
    fn jal(offset: i32) -> u32 {
        let imm = offset as u32;
        ((imm >> 20) & 1) << 31
            | ((imm >> 1) & 0x3FF) << 21
            | ((imm >> 11) & 1) << 20
            | ((imm >> 12) & 0xFF) << 12
            | 0x6F
    }

    #[test]
    fn test_first_symbol_wins() {
        let table = collect_symbol_labels([
            (SymbolKind::Function, 0x100, "foo"),
            (SymbolKind::Function, 0x100, "bar"),
            (SymbolKind::Object, 0x200, "data"),
            (SymbolKind::Function, 0x300, "baz"),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.name(0x100), Some("foo"));
        assert_eq!(table.name(0x200), None);
        assert_eq!(table.name(0x300), Some("baz"));
    }

    #[test]
    fn test_symbol_beats_synthesized() {
        let symbols = collect_symbol_labels([(SymbolKind::Function, 0x100, "foo")]);
        // jal zero, +0x100 at 0
        let labels = discover_branch_targets(&[jal(0x100)], 0, symbols);
        assert_eq!(labels.name(0x100), Some("foo"));
        assert_eq!(labels.get(0x100).unwrap().source, LabelSource::Symbol);
        assert_eq!(labels.synthesized_count(), 0);
    }

    #[test]
    fn test_numbering_follows_stream_order() {
        // Forward jump to 0x10c, then a backward jump to 0x100, then the
        // forward target again.
        let words = [jal(0xC), jal(-4), jal(4), 0x0000_0013];
        let labels = discover_branch_targets(&words, 0x100, LabelTable::new());
        assert_eq!(labels.name(0x10C), Some("L0"));
        assert_eq!(labels.name(0x100), Some("L1"));
        assert_eq!(labels.synthesized_count(), 2);
    }

    #[test]
    fn test_skipped_words_still_count() {
        // A compressed-looking word occupies a slot and shifts later targets.
        let words = [0x0000_0001, jal(0)];
        let labels = discover_branch_targets(&words, 0x100, LabelTable::new());
        assert_eq!(labels.name(0x104), Some("L0"));
    }

    #[test]
    fn test_no_targets_no_labels() {
        // auipc a0, 0; jalr ra, 0(a0)
        let labels = discover_branch_targets(&[0x0000_0517, 0x0005_00E7], 0x1_0000, LabelTable::new());
        assert!(labels.is_empty());
    }
}
