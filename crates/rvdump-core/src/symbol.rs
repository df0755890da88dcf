//! Symbol classification types.
//!
//! The ELF symbol record packs its type and binding into one `st_info` byte
//! and overloads `st_shndx` with a handful of reserved values. These enums
//! give every encoding a variant, with an explicit catch-all for values that
//! have no name, so rendering never has to range-check raw integers.

use std::fmt;

/// Symbol type (low nibble of `st_info`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    /// No type (unspecified).
    NoType,
    /// Data object (variable, array, etc.).
    Object,
    /// Function or other executable code.
    Function,
    /// Section symbol.
    Section,
    /// File name symbol.
    File,
    /// Common data object.
    Common,
    /// Thread-local storage object.
    Tls,
    /// Start of the OS-specific range.
    LoOs,
    /// End of the OS-specific range.
    HiOs,
    /// Start of the processor-specific range.
    LoProc,
    /// End of the processor-specific range.
    HiProc,
    /// Any other value.
    Other(u8),
}

impl SymbolKind {
    /// Decodes the type from an `st_info` byte.
    pub fn from_info(info: u8) -> Self {
        match info & 0xF {
            0 => Self::NoType,
            1 => Self::Object,
            2 => Self::Function,
            3 => Self::Section,
            4 => Self::File,
            5 => Self::Common,
            6 => Self::Tls,
            10 => Self::LoOs,
            12 => Self::HiOs,
            13 => Self::LoProc,
            15 => Self::HiProc,
            other => Self::Other(other),
        }
    }

    /// Returns the conventional upper-case name, or `""` for unnamed values.
    pub fn name(self) -> &'static str {
        match self {
            Self::NoType => "NOTYPE",
            Self::Object => "OBJECT",
            Self::Function => "FUNC",
            Self::Section => "SECTION",
            Self::File => "FILE",
            Self::Common => "COMMON",
            Self::Tls => "TLS",
            Self::LoOs => "LOOS",
            Self::HiOs => "HIOS",
            Self::LoProc => "LOPROC",
            Self::HiProc => "HIPROC",
            Self::Other(_) => "",
        }
    }
}

/// Symbol binding (high nibble of `st_info`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolBinding {
    /// Local symbol (not visible outside object file).
    Local,
    /// Global symbol (visible to all object files).
    Global,
    /// Weak symbol (like global but can be overridden).
    Weak,
    LoOs,
    HiOs,
    LoProc,
    HiProc,
    /// Any other value.
    Other(u8),
}

impl SymbolBinding {
    /// Decodes the binding from an `st_info` byte.
    pub fn from_info(info: u8) -> Self {
        match info >> 4 {
            0 => Self::Local,
            1 => Self::Global,
            2 => Self::Weak,
            10 => Self::LoOs,
            12 => Self::HiOs,
            13 => Self::LoProc,
            15 => Self::HiProc,
            other => Self::Other(other),
        }
    }

    /// Returns the conventional upper-case name, or `""` for unnamed values.
    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::Global => "GLOBAL",
            Self::Weak => "WEAK",
            Self::LoOs => "LOOS",
            Self::HiOs => "HIOS",
            Self::LoProc => "LOPROC",
            Self::HiProc => "HIPROC",
            Self::Other(_) => "",
        }
    }
}

/// Symbol visibility (`st_other`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolVisibility {
    Default,
    Internal,
    Hidden,
    Protected,
    Exported,
    Singleton,
    Eliminate,
    /// Any other value.
    Other(u8),
}

impl SymbolVisibility {
    /// Decodes a raw visibility value.
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::Default,
            1 => Self::Internal,
            2 => Self::Hidden,
            3 => Self::Protected,
            4 => Self::Exported,
            5 => Self::Singleton,
            6 => Self::Eliminate,
            other => Self::Other(other),
        }
    }

    /// Returns the conventional upper-case name, or `""` for unnamed values.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Internal => "INTERNAL",
            Self::Hidden => "HIDDEN",
            Self::Protected => "PROTECTED",
            Self::Exported => "EXPORTED",
            Self::Singleton => "SINGLETON",
            Self::Eliminate => "ELIMINATE",
            Self::Other(_) => "",
        }
    }
}

/// Section index of a symbol (`st_shndx`).
///
/// Several reserved names share a value (`LORESERVE`, `LOPROC` and `BEFORE`
/// are all `0xff00`); the first name in table order is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionIndex {
    /// `0`: undefined symbol.
    Undefined,
    /// `0xff00`.
    LoReserve,
    /// `0xff01`.
    After,
    /// `0xff02`.
    Amd64LargeCommon,
    /// `0xff1f`.
    HiProc,
    /// `0xff20`.
    LoOs,
    /// `0xff3f`.
    LoSunw,
    /// `0xfff1`: absolute value, not relative to a section.
    Absolute,
    /// `0xfff2`: common block.
    Common,
    /// `0xffff`: real index lives in `SHT_SYMTAB_SHNDX`.
    XIndex,
    /// An ordinary section index.
    Index(u16),
}

impl SectionIndex {
    /// Decodes a raw `st_shndx` value.
    pub fn from_raw(value: u16) -> Self {
        match value {
            0x0000 => Self::Undefined,
            0xff00 => Self::LoReserve,
            0xff01 => Self::After,
            0xff02 => Self::Amd64LargeCommon,
            0xff1f => Self::HiProc,
            0xff20 => Self::LoOs,
            0xff3f => Self::LoSunw,
            0xfff1 => Self::Absolute,
            0xfff2 => Self::Common,
            0xffff => Self::XIndex,
            other => Self::Index(other),
        }
    }

    /// Returns the reserved name, or `None` for an ordinary index.
    pub fn special_name(self) -> Option<&'static str> {
        Some(match self {
            Self::Undefined => "UNDEF",
            Self::LoReserve => "LORESERVE",
            Self::After => "AFTER",
            Self::Amd64LargeCommon => "AMD64_LCOMMON",
            Self::HiProc => "HIPROC",
            Self::LoOs => "LOOS",
            Self::LoSunw => "LOSUNW",
            Self::Absolute => "ABS",
            Self::Common => "COMMON",
            Self::XIndex => "XINDEX",
            Self::Index(_) => return None,
        })
    }
}

impl fmt::Display for SectionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.special_name(), self) {
            (Some(name), _) => f.pad(name),
            (None, Self::Index(index)) => f.pad(&index.to_string()),
            (None, _) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_nibbles() {
        // GLOBAL FUNC
        let info = 0x12;
        assert_eq!(SymbolKind::from_info(info), SymbolKind::Function);
        assert_eq!(SymbolBinding::from_info(info), SymbolBinding::Global);
    }

    #[test]
    fn test_unnamed_values_render_blank() {
        assert_eq!(SymbolKind::from_info(0x07).name(), "");
        assert_eq!(SymbolKind::from_info(0x0e).name(), "");
        assert_eq!(SymbolBinding::from_info(0x30).name(), "");
        assert_eq!(SymbolVisibility::from_raw(7).name(), "");
        assert_eq!(SymbolKind::from_info(0x0d).name(), "LOPROC");
    }

    #[test]
    fn test_shared_reserved_values_use_first_name() {
        assert_eq!(SectionIndex::from_raw(0xff00).to_string(), "LORESERVE");
        assert_eq!(SectionIndex::from_raw(0xff3f).to_string(), "LOSUNW");
        assert_eq!(SectionIndex::from_raw(0xffff).to_string(), "XINDEX");
        assert_eq!(SectionIndex::from_raw(0).to_string(), "UNDEF");
    }

    #[test]
    fn test_ordinary_index_is_numeric_and_padded() {
        let index = SectionIndex::from_raw(7);
        assert_eq!(index, SectionIndex::Index(7));
        assert_eq!(format!("{index:>6}"), "     7");
        assert_eq!(format!("{:>6}", SectionIndex::Absolute), "   ABS");
    }
}
