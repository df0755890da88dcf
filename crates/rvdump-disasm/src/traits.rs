//! Disassembler traits.

use crate::DecodeError;
use rvdump_core::Instruction;

/// Trait for fixed-width instruction decoders.
pub trait Disassembler {
    /// Decode a single instruction word located at `address`.
    ///
    /// # Arguments
    /// * `word` - The raw little-endian instruction word
    /// * `address` - The virtual address of the word, used for PC-relative targets
    fn decode(&self, word: u32, address: u32) -> Result<Instruction, DecodeError>;

    /// Returns the instruction size in bytes.
    fn instruction_size(&self) -> u32 {
        4
    }

    /// Disassemble a block of words starting at `start_address`.
    ///
    /// Every word keeps its own address slot, including the ones that fail
    /// to decode.
    fn disassemble_block(
        &self,
        words: &[u32],
        start_address: u32,
    ) -> Vec<Result<Instruction, DecodeError>> {
        let step = self.instruction_size();
        let mut address = start_address;
        let mut instructions = Vec::with_capacity(words.len());

        for &word in words {
            instructions.push(self.decode(word, address));
            address = address.wrapping_add(step);
        }

        instructions
    }
}
