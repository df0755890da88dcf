#![no_main]

use libfuzzer_sys::fuzz_target;
use rvdump_disasm::riscv::fields;
use rvdump_disasm::{discover_branch_targets, Disassembler, LabelTable, RiscVDisassembler};

fuzz_target!(|data: &[u8]| {
    let words: Vec<u32> = data
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    if words.is_empty() {
        return;
    }

    let disasm = RiscVDisassembler::new();
    let base = 0xffff_f000;

    // Every word keeps its slot, decoded or not
    let block = disasm.disassemble_block(&words, base);
    assert_eq!(block.len(), words.len());

    let labels = discover_branch_targets(&words, base, LabelTable::new());
    for (i, result) in block.iter().enumerate() {
        if let Ok(inst) = result {
            let address = base.wrapping_add(i as u32 * 4);
            assert_eq!(inst.address, address);
            // Decoded targets are always named by the pre-pass
            if let Some(target) = inst.target {
                assert_eq!(fields::control_target(inst.word, address), Some(target));
                assert!(labels.get(target).is_some());
            }
        }
    }
});
