use std::fmt;

use crate::error::{Chip8Error, Result};
use crate::memory::PROGRAM_START;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_DEPTH: usize = 16;
/// VF, the carry / borrow / collision flag
pub const FLAG: usize = 0xF;

/// Register file. Only the interpreter mutates it.
pub struct Registers {
    pub v: [u8; REGISTER_COUNT],
    /// holds a 12 bit address, but FX1E can push it past 0xFFF
    pub i: u16,
    pub pc: u16,
    pub(crate) stack: Vec<u16>,
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl Default for Registers {
    fn default() -> Self {
        Registers {
            v: [0u8; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: Vec::with_capacity(STACK_DEPTH),
            delay_timer: 0,
            sound_timer: 0,
        }
    }
}

impl Registers {
    pub fn reset(&mut self) {
        self.v = [0u8; REGISTER_COUNT];
        self.i = 0;
        self.pc = PROGRAM_START;
        self.stack.clear();
        self.delay_timer = 0;
        self.sound_timer = 0;
    }

    pub fn stack(&self) -> &[u16] {
        &self.stack
    }

    /// Called with PC already past the CALL, so the error reports PC - 2.
    pub(crate) fn push_stack(&mut self, address: u16) -> Result<()> {
        if self.stack.len() >= STACK_DEPTH {
            return Err(Chip8Error::StackOverflow {
                pc: self.pc.wrapping_sub(2),
                depth: self.stack.len(),
            });
        }
        self.stack.push(address);
        Ok(())
    }

    pub(crate) fn pop_stack(&mut self) -> Result<u16> {
        self.stack.pop().ok_or(Chip8Error::StackUnderflow {
            pc: self.pc.wrapping_sub(2),
        })
    }

    /// One line per V register, `V[0]: 1F` style.
    pub fn dump_v(&self) -> String {
        self.v
            .iter()
            .enumerate()
            .map(|(n, value)| format!("V[{:X}]: {:02X}\n", n, value))
            .collect()
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PC: {:03X}\nStack: ", self.pc)?;
        if self.stack.is_empty() {
            write!(f, "NONE")?;
        } else {
            // innermost return address first
            for address in self.stack.iter().rev() {
                write!(f, "{:04X} ", address)?;
            }
        }
        write!(
            f,
            "\nI: {:03X}\nDT: {}\nST: {}",
            self.i, self.delay_timer, self.sound_timer
        )
    }
}
