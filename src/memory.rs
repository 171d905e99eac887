//! Flat 4K store.
//!
//! ```text
//! 0x000-0x1FF  reserved for the interpreter (font table at 0x000)
//! 0x200-0xFFF  program / data space
//! ```

use crate::error::{Chip8Error, Result};

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const FONT_START: u16 = 0x000;
/// bytes per hex digit glyph
pub const GLYPH_HEIGHT: u16 = 5;

pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        let mut memory = Memory {
            bytes: [0u8; MEMORY_SIZE],
        };
        memory.reset();
        memory
    }
}

impl Memory {
    /// Zero everything and put the font back.
    pub fn reset(&mut self) {
        self.bytes = [0u8; MEMORY_SIZE];
        let font_start = FONT_START as usize;
        self.bytes[font_start..font_start + FONT.len()].copy_from_slice(&FONT);
    }

    /// Copy `data` in starting at `offset`, overwriting whatever is there.
    /// Nothing is written if the data would run past the end of memory.
    pub fn load(&mut self, data: &[u8], offset: u16) -> Result<()> {
        let start = offset as usize;
        let end = start + data.len();
        if end > MEMORY_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: data.len(),
                offset,
                max_size: MEMORY_SIZE.saturating_sub(start),
            });
        }
        self.bytes[start..end].copy_from_slice(data);
        Ok(())
    }

    /// Out of range reads yield 0.
    pub fn read_byte(&self, address: usize) -> u8 {
        self.bytes.get(address).copied().unwrap_or(0)
    }

    /// Out of range writes are dropped; the error lets the caller warn about it.
    pub fn write_byte(&mut self, address: usize, value: u8) -> Result<()> {
        match self.bytes.get_mut(address) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(Chip8Error::MemoryOutOfBounds { address }),
        }
    }

    /// Big-endian: the byte at `address` is the high byte, same as opcodes.
    pub fn read_short(&self, address: usize) -> u16 {
        (self.read_byte(address) as u16) << 8 | self.read_byte(address + 1) as u16
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_loads_font_and_zeroes_the_rest() {
        let mut m = Memory::default();
        m.load(&[0xAA; 16], 0x300).unwrap();
        m.reset();
        assert_eq!(&m.as_slice()[..80], &FONT[..]);
        assert!(m.as_slice()[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn load_at_offset() {
        let mut m = Memory::default();
        m.load(&[0, 1, 2, 3, 4, 5, 6, 7], 0x208).unwrap();
        assert_eq!(
            m.as_slice()[0x200..0x210],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn load_fills_memory_exactly() {
        let mut m = Memory::default();
        m.load(&[0x11; 0xE00], PROGRAM_START).unwrap();
        assert_eq!(m.read_byte(0xFFF), 0x11);
    }

    #[test]
    fn load_too_much_leaves_memory_alone() {
        let mut m = Memory::default();
        let err = m.load(&[0xFF; 8], 4089).unwrap_err();
        assert!(matches!(
            err,
            Chip8Error::RomTooLarge {
                size: 8,
                max_size: 7,
                ..
            }
        ));
        assert!(m.as_slice()[4089..].iter().all(|&b| b == 0));
    }

    #[test]
    fn read_short_is_big_endian() {
        let mut m = Memory::default();
        m.load(&[0, 1, 2, 3, 4, 5, 6, 7], 0x200).unwrap();
        assert_eq!(m.read_short(0x204), 0x0405);
    }

    #[test]
    fn out_of_range_access() {
        let mut m = Memory::default();
        m.write_byte(0xFFF, 0x12).unwrap();
        assert_eq!(m.read_byte(0x1000), 0);
        assert_eq!(m.read_short(0xFFF), 0x1200);
        assert!(matches!(
            m.write_byte(0x1000, 1),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
        ));
    }
}
