use crate::error::{Chip8Error, Result};

pub const KEY_COUNT: usize = 16;

/// Hex keypad state plus the FX0A wait flag.
///
/// The instruction waiting for input is the one at PC: FX0A rewinds PC onto
/// itself before setting the flag.
#[derive(Default)]
pub struct InputLatch {
    keys: [bool; KEY_COUNT],
    waiting_for_key_press: bool,
}

impl InputLatch {
    pub fn reset(&mut self) {
        self.keys = [false; KEY_COUNT];
        self.waiting_for_key_press = false;
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<()> {
        let slot = self
            .keys
            .get_mut(key as usize)
            .ok_or(Chip8Error::InvalidKey(key))?;
        *slot = pressed;
        Ok(())
    }

    /// Keys past F (a register can hold anything) are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    pub fn keys(&self) -> &[bool; KEY_COUNT] {
        &self.keys
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting_for_key_press
    }

    pub(crate) fn begin_wait(&mut self) {
        self.waiting_for_key_press = true;
    }

    pub(crate) fn end_wait(&mut self) {
        self.waiting_for_key_press = false;
    }
}
