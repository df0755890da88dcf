//! Minimal RISC-V ELF32 image builder for CLI tests.

#![allow(dead_code)]

const SHT_PROGBITS: u32 = 1;
const SHT_SYMTAB: u32 = 2;
const SHT_STRTAB: u32 = 3;

pub const STT_FUNC: u8 = 2;
pub const STB_GLOBAL: u8 = 1;

/// A symbol to place in `.symtab`.
pub struct Sym {
    pub name: &'static str,
    pub value: u32,
    pub size: u32,
    pub info: u8,
    pub shndx: u16,
}

impl Sym {
    /// A global function symbol in section 1.
    pub fn func(name: &'static str, value: u32, size: u32) -> Self {
        Self {
            name,
            value,
            size,
            info: (STB_GLOBAL << 4) | STT_FUNC,
            shndx: 1,
        }
    }
}

/// Builds a small executable with `.text`, `.symtab`, `.strtab` and
/// `.shstrtab`.
pub struct ElfBuilder {
    text_addr: u32,
    code: Vec<u32>,
    symbols: Vec<Sym>,
    omit: Option<&'static str>,
}

impl ElfBuilder {
    pub fn new(text_addr: u32) -> Self {
        Self {
            text_addr,
            code: Vec::new(),
            symbols: Vec::new(),
            omit: None,
        }
    }

    pub fn code(mut self, words: &[u32]) -> Self {
        self.code.extend_from_slice(words);
        self
    }

    pub fn symbol(mut self, sym: Sym) -> Self {
        self.symbols.push(sym);
        self
    }

    /// Leaves out one of `.text`, `.symtab` or `.strtab`.
    pub fn without(mut self, section: &'static str) -> Self {
        self.omit = Some(section);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut shstrtab = vec![0u8];
        let mut add_name = |name: &str| {
            let offset = shstrtab.len() as u32;
            shstrtab.extend_from_slice(name.as_bytes());
            shstrtab.push(0);
            offset
        };
        let text_name = add_name(".text");
        let symtab_name = add_name(".symtab");
        let strtab_name = add_name(".strtab");
        let shstrtab_name = add_name(".shstrtab");
        let other_name = add_name(".comment");

        let mut strtab = vec![0u8];
        let mut symtab = vec![0u8; 16];
        for sym in &self.symbols {
            let name = strtab.len() as u32;
            strtab.extend_from_slice(sym.name.as_bytes());
            strtab.push(0);

            symtab.extend_from_slice(&name.to_le_bytes());
            symtab.extend_from_slice(&sym.value.to_le_bytes());
            symtab.extend_from_slice(&sym.size.to_le_bytes());
            symtab.push(sym.info);
            symtab.push(0);
            symtab.extend_from_slice(&sym.shndx.to_le_bytes());
        }

        let code: Vec<u8> = self.code.iter().flat_map(|w| w.to_le_bytes()).collect();

        let mut file = vec![0u8; 52];
        let text_off = append(&mut file, &code);
        let symtab_off = append(&mut file, &symtab);
        let strtab_off = append(&mut file, &strtab);
        let shstrtab_off = append(&mut file, &shstrtab);
        let shoff = file.len() as u32;

        let pick = |name: &'static str, index: u32| {
            if self.omit == Some(name) {
                other_name
            } else {
                index
            }
        };

        let sections = [
            [0u32; 10],
            [
                pick(".text", text_name),
                SHT_PROGBITS,
                0x6,
                self.text_addr,
                text_off,
                code.len() as u32,
                0,
                0,
                4,
                0,
            ],
            [
                pick(".symtab", symtab_name),
                SHT_SYMTAB,
                0,
                0,
                symtab_off,
                symtab.len() as u32,
                3,
                1,
                4,
                16,
            ],
            [
                pick(".strtab", strtab_name),
                SHT_STRTAB,
                0,
                0,
                strtab_off,
                strtab.len() as u32,
                0,
                0,
                1,
                0,
            ],
            [
                shstrtab_name,
                SHT_STRTAB,
                0,
                0,
                shstrtab_off,
                shstrtab.len() as u32,
                0,
                0,
                1,
                0,
            ],
        ];
        for section in &sections {
            for field in section {
                file.extend_from_slice(&field.to_le_bytes());
            }
        }

        // e_ident, e_type = EXEC, e_machine = RISCV, e_version = 1
        file[..24].copy_from_slice(&[
            0x7f, b'E', b'L', b'F', 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0xf3, 0, 1, 0, 0, 0,
        ]);
        file[24..28].copy_from_slice(&self.text_addr.to_le_bytes());
        file[32..36].copy_from_slice(&shoff.to_le_bytes());
        file[40..42].copy_from_slice(&52u16.to_le_bytes());
        file[42..44].copy_from_slice(&32u16.to_le_bytes());
        file[46..48].copy_from_slice(&40u16.to_le_bytes());
        file[48..50].copy_from_slice(&(sections.len() as u16).to_le_bytes());
        file[50..52].copy_from_slice(&4u16.to_le_bytes());
        file
    }
}

fn append(file: &mut Vec<u8>, data: &[u8]) -> u32 {
    let offset = file.len() as u32;
    file.extend_from_slice(data);
    offset
}
