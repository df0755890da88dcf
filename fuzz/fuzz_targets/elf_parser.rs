#![no_main]

use libfuzzer_sys::fuzz_target;
use rvdump_formats::elf::{Elf, EXPECTED_IDENT};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Raw input is mostly rejected at the identification check; also try it
    // behind a valid prefix so the table readers get exercised.
    let mut prefixed = EXPECTED_IDENT.to_vec();
    prefixed.extend_from_slice(data);

    for input in [data, prefixed.as_slice()] {
        // Should never panic
        if let Ok(elf) = Elf::read(&mut Cursor::new(input)) {
            for section in &elf.sections {
                let _ = elf.section_name(section);
            }
            for symbol in &elf.symbols {
                let _ = elf.symbol_name(symbol);
                let _ = symbol.section_index().to_string();
            }
            let _ = elf.text.iter().count();
        }
    }
});
