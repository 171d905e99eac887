use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Everything that can go wrong while loading or running a program.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("can't find rom file {path:?}")]
    RomNotFound { path: PathBuf },

    #[error("rom file {path:?} must end with .ch8")]
    RomInvalidFormat { path: PathBuf },

    #[error("rom is too large ({size} bytes at {offset:#05X}), max size is {max_size} bytes")]
    RomTooLarge {
        size: usize,
        offset: u16,
        max_size: usize,
    },

    #[error("can't read rom: {0}")]
    Io(#[from] io::Error),

    #[error("can't decode program text: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("stack overflow: CALL at {pc:#05X} with {depth} return addresses already pushed")]
    StackOverflow { pc: u16, depth: usize },

    #[error("stack underflow: RET at {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("key {0:#X} is not on the hex keypad")]
    InvalidKey(u8),
}

impl Chip8Error {
    /// Stack faults stop the program; every other per-instruction problem is
    /// logged and skipped.
    pub fn is_stack_fault(&self) -> bool {
        matches!(
            self,
            Chip8Error::StackOverflow { .. } | Chip8Error::StackUnderflow { .. }
        )
    }
}
