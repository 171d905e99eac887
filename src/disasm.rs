use std::collections::BTreeMap;

use crate::instruction::Instruction;

/// address -> mnemonic, in address order
pub type Disassembly = BTreeMap<u16, String>;

/// Decode every big-endian word in `[start, end]` without running any of it.
///
/// Words are taken two bytes at a time from `start`; a trailing half word at
/// `end` or at the end of `memory` is left out.
pub fn disassemble(memory: &[u8], start: u16, end: u16) -> Disassembly {
    words(memory, start, end)
        .map(|(address, instruction)| (address, instruction.to_string()))
        .collect()
}

/// `$0200: LD V1, 0A` lines, optionally without words that aren't
/// instructions (data, padding).
pub fn listing(memory: &[u8], start: u16, end: u16, skip_unknown: bool) -> Vec<String> {
    words(memory, start, end)
        .filter(|(_, instruction)| !(skip_unknown && instruction.is_unknown()))
        .map(|(address, instruction)| format!("${:04X}: {}", address, instruction))
        .collect()
}

fn words(memory: &[u8], start: u16, end: u16) -> impl Iterator<Item = (u16, Instruction)> + '_ {
    let last = (end as usize).min(memory.len().saturating_sub(1));
    (start as usize..last).step_by(2).map(move |address| {
        let opcode = (memory[address] as u16) << 8 | memory[address + 1] as u16;
        (address as u16, Instruction::decode(opcode))
    })
}
