use std::fs;
use std::path::Path;

use crate::error::{Chip8Error, Result};

pub const ROM_EXTENSION: &str = "ch8";

/// Read a program image from disk. The path must end in `.ch8`; that is
/// checked before the file is looked at.
pub fn read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    if path.extension().and_then(|e| e.to_str()) != Some(ROM_EXTENSION) {
        return Err(Chip8Error::RomInvalidFormat {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(Chip8Error::RomNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read(path)?)
}

/// Program written out as hex text, e.g. `"611E620EA21C"`. Whitespace is
/// ignored so programs can be laid out one opcode per line.
pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    let digits: String = text.split_whitespace().collect();
    Ok(hex::decode(digits)?)
}
