//! Property-based tests for the ELF container reader.
//!
//! These tests verify that the reader handles arbitrary input safely and
//! that header validation is exact.

use proptest::prelude::*;
use std::io::Cursor;

use rvdump_formats::elf::{Elf, ElfHeader, EXPECTED_IDENT};
use rvdump_formats::{ErrorKind, ParseError};

/// A 52-byte header with the accepted prefix and no tables.
fn valid_header() -> Vec<u8> {
    let mut data = vec![0u8; 52];
    data[..24].copy_from_slice(&EXPECTED_IDENT);
    data
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(5000))]

    /// Reading never panics on arbitrary input.
    #[test]
    fn elf_read_never_panics(data in prop::collection::vec(any::<u8>(), 0..1024)) {
        let _ = Elf::read(&mut Cursor::new(data));
    }

    /// Reading never panics once the prefix is accepted.
    #[test]
    fn elf_read_never_panics_after_ident(rest in prop::collection::vec(any::<u8>(), 0..1024)) {
        let mut data = EXPECTED_IDENT.to_vec();
        data.extend_from_slice(&rest);
        let _ = Elf::read(&mut Cursor::new(data));
    }

    /// Reading is deterministic.
    #[test]
    fn elf_read_is_deterministic(data in prop::collection::vec(any::<u8>(), 52..512)) {
        let first = Elf::read(&mut Cursor::new(data.clone())).map(|elf| elf.text);
        let second = Elf::read(&mut Cursor::new(data)).map(|elf| elf.text);

        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.kind(), b.kind()),
            _ => prop_assert!(false, "results should be consistent"),
        }
    }
}

proptest! {
    /// Any single-byte change in the prefix is rejected at that offset.
    #[test]
    fn ident_single_byte_deviation_rejected(offset in 0usize..24, delta in 1u8..=255) {
        let mut data = valid_header();
        data[offset] = data[offset].wrapping_add(delta);

        let err = ElfHeader::read(&mut Cursor::new(data)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Validation);
        match err {
            ParseError::InvalidIdent { offset: reported, .. } => prop_assert_eq!(reported, offset),
            other => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    /// The bytes after the prefix never affect validation.
    #[test]
    fn ident_accepts_any_header_tail(tail in prop::collection::vec(any::<u8>(), 28)) {
        let mut data = valid_header();
        data[24..].copy_from_slice(&tail);
        prop_assert!(ElfHeader::read(&mut Cursor::new(data)).is_ok());
    }
}

#[test]
fn header_only_file_has_no_text() {
    // No section headers: the name table index is out of range.
    let err = Elf::read(&mut Cursor::new(valid_header())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
