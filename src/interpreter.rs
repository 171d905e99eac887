use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::config::Config;
use crate::disasm::{self, Disassembly};
use crate::error::{Chip8Error, Result};
use crate::input::InputLatch;
use crate::instruction::Instruction;
use crate::log::{Level, Logger, NullLogger};
use crate::memory::{Memory, FONT_START, GLYPH_HEIGHT};
use crate::rom;
use crate::screen::{PixelArray, Screen};
use crate::sound::{Mute, Sound};
use crate::state::{Registers, FLAG};
use crate::timer::{Clock, SystemClock, Timers};

/// What a call to [`Interpreter::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Executed(Instruction),
    /// FX0A is pending; nothing ran until a key goes down.
    AwaitingKey,
}

/// Fetch / decode / execute engine. Owns all machine state; collaborators
/// (clock, random source, logger, sound) are injected.
pub struct Interpreter {
    config: Config,
    memory: Memory,
    registers: Registers,
    screen: Screen,
    input: InputLatch,
    timers: Timers,
    clock: Box<dyn Clock>,
    rng: Box<dyn RngCore>,
    logger: Box<dyn Logger>,
    sound: Box<dyn Sound>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new(Config::default())
    }
}

impl Interpreter {
    pub fn new(config: Config) -> Self {
        let clock = SystemClock::default();
        let timers = Timers::new(config.timer_period(), clock.now());
        Interpreter {
            registers: Registers {
                pc: config.load_address,
                ..Registers::default()
            },
            config,
            memory: Memory::default(),
            screen: Screen::default(),
            input: InputLatch::default(),
            timers,
            clock: Box::new(clock),
            rng: Box::new(StdRng::from_entropy()),
            logger: Box::new(NullLogger),
            sound: Box::new(Mute),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.timers.restart(clock.now());
        self.clock = Box::new(clock);
        self
    }

    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    pub fn with_sound(mut self, sound: impl Sound + 'static) -> Self {
        self.sound = Box::new(sound);
        self
    }

    /// Back to power-on: registers cleared, PC at the load address (0x200
    /// unless configured otherwise), memory wiped with the font reloaded,
    /// screen and keys cleared.
    pub fn reset(&mut self) {
        self.registers.reset();
        self.registers.pc = self.config.load_address;
        self.memory.reset();
        self.screen.clear_screen();
        self.input.reset();
        self.timers.restart(self.clock.now());
    }

    /// Install a program image at the configured load address.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.load_at(program, self.config.load_address)
    }

    pub fn load_at(&mut self, program: &[u8], offset: u16) -> Result<()> {
        self.memory.load(program, offset)?;
        self.log(
            Level::Info,
            format!("loaded {} bytes at {:#05X}", program.len(), offset),
        );
        Ok(())
    }

    pub fn load_rom(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let program = rom::read(path)?;
        self.load(&program)
    }

    pub fn load_hex(&mut self, text: &str) -> Result<()> {
        let program = rom::from_hex(text)?;
        self.load(&program)
    }

    /// Run one instruction, or nothing while FX0A waits. Timers tick either
    /// way.
    ///
    /// Stack faults come back as errors with PC left on the faulting
    /// instruction; everything else that goes wrong is logged and skipped.
    pub fn step(&mut self) -> Result<Step> {
        let now = self.clock.now();
        let regs = &mut self.registers;
        if self
            .timers
            .tick(now, &mut regs.delay_timer, &mut regs.sound_timer)
        {
            self.sound.beep();
        }

        if self.input.is_waiting() {
            return Ok(Step::AwaitingKey);
        }

        let pc = self.registers.pc;
        let opcode = self.memory.read_short(pc as usize);
        let instruction = Instruction::decode(opcode);
        self.log(
            Level::Trace,
            format!("{:04X}: {:04X} {}", pc, opcode, instruction),
        );

        self.registers.pc = pc.wrapping_add(2);
        if let Err(err) = self.execute(instruction) {
            self.registers.pc = pc;
            self.log(Level::Error, err.to_string());
            return Err(err);
        }
        Ok(Step::Executed(instruction))
    }

    /// Press a key. If FX0A is waiting, the key lands in its register and
    /// execution moves past it.
    pub fn deliver_key_down(&mut self, key: u8) -> Result<()> {
        self.input.set_key(key, true)?;
        if self.input.is_waiting() {
            let pc = self.registers.pc;
            let opcode = self.memory.read_short(pc as usize);
            let x = ((opcode & 0x0F00) >> 8) as usize;
            self.registers.v[x] = key;
            self.input.end_wait();
            self.registers.pc = pc.wrapping_add(2);
        }
        Ok(())
    }

    pub fn deliver_key_up(&mut self, key: u8) -> Result<()> {
        self.input.set_key(key, false)
    }

    /// Copy of the current screen.
    pub fn read_framebuffer(&self) -> PixelArray {
        *self.screen.pixels()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn input(&self) -> &InputLatch {
        &self.input
    }

    pub fn is_waiting_for_key(&self) -> bool {
        self.input.is_waiting()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn disassemble(&self, start: u16, end: u16) -> Disassembly {
        disasm::disassemble(self.memory.as_slice(), start, end)
    }

    fn execute(&mut self, instruction: Instruction) -> Result<()> {
        use Instruction::*;

        let v = &mut self.registers.v;
        match instruction {
            Cls => self.screen.clear_screen(),
            Ret => self.registers.pc = self.registers.pop_stack()?,
            Jp { nnn } => self.registers.pc = nnn,
            Call { nnn } => {
                let return_address = self.registers.pc;
                self.registers.push_stack(return_address)?;
                self.registers.pc = nnn;
            }
            SeByte { x, nn } => {
                let skip = v[x] == nn;
                self.skip_if(skip);
            }
            SneByte { x, nn } => {
                let skip = v[x] != nn;
                self.skip_if(skip);
            }
            SeReg { x, y } => {
                let skip = v[x] == v[y];
                self.skip_if(skip);
            }
            SneReg { x, y } => {
                let skip = v[x] != v[y];
                self.skip_if(skip);
            }
            LdByte { x, nn } => v[x] = nn,
            AddByte { x, nn } => v[x] = v[x].wrapping_add(nn),
            LdReg { x, y } => v[x] = v[y],
            Or { x, y } => v[x] |= v[y],
            And { x, y } => v[x] &= v[y],
            Xor { x, y } => v[x] ^= v[y],
            // the flag is written after the result, so VF as a target ends up
            // holding the flag
            AddReg { x, y } => {
                let (sum, carry) = v[x].overflowing_add(v[y]);
                v[x] = sum;
                v[FLAG] = carry as u8;
            }
            Sub { x, y } => {
                let no_borrow = (v[x] > v[y]) as u8;
                v[x] = v[x].wrapping_sub(v[y]);
                v[FLAG] = no_borrow;
            }
            Subn { x, y } => {
                let no_borrow = (v[y] > v[x]) as u8;
                v[x] = v[y].wrapping_sub(v[x]);
                v[FLAG] = no_borrow;
            }
            // shifts work on VX in place, VY is ignored
            Shr { x, .. } => {
                let dropped_bit = v[x] & 1;
                v[x] >>= 1;
                v[FLAG] = dropped_bit;
            }
            Shl { x, .. } => {
                let dropped_bit = v[x] >> 7;
                v[x] <<= 1;
                v[FLAG] = dropped_bit;
            }
            LdI { nnn } => self.registers.i = nnn,
            // not masked: an odd V0 leaves PC odd and fetch carries on from there
            JpV0 { nnn } => self.registers.pc = v[0] as u16 + nnn,
            Rnd { x, nn } => v[x] = self.rng.gen_range(0, 256u16) as u8 & nn,
            Drw { x, y, n } => {
                let (x, y) = (v[x] as usize, v[y] as usize);
                let start = self.registers.i as usize;
                let sprite: Vec<u8> = (start..start + n as usize)
                    .map(|address| self.memory.read_byte(address))
                    .collect();
                let collided =
                    self.screen
                        .render_sprite(x, y, &sprite, self.config.draw_policy);
                self.registers.v[FLAG] = collided as u8;
            }
            Skp { x } => {
                let skip = self.input.is_pressed(v[x]);
                self.skip_if(skip);
            }
            Sknp { x } => {
                let skip = !self.input.is_pressed(v[x]);
                self.skip_if(skip);
            }
            LdVxDt { x } => v[x] = self.registers.delay_timer,
            LdVxK { .. } => {
                self.input.begin_wait();
                self.registers.pc = self.registers.pc.wrapping_sub(2);
            }
            LdDtVx { x } => self.registers.delay_timer = v[x],
            LdStVx { x } => self.registers.sound_timer = v[x],
            AddI { x } => self.registers.i = self.registers.i.wrapping_add(v[x] as u16),
            LdF { x } => self.registers.i = FONT_START + v[x] as u16 * GLYPH_HEIGHT,
            LdB { x } => {
                let value = v[x];
                let i = self.registers.i as usize;
                self.write_byte(i, value / 100);
                self.write_byte(i + 1, value / 10 % 10);
                self.write_byte(i + 2, value % 10);
            }
            LdIVx { x } => {
                let i = self.registers.i as usize;
                for r in 0..=x {
                    let value = self.registers.v[r];
                    self.write_byte(i + r, value);
                }
            }
            LdVxI { x } => {
                let i = self.registers.i as usize;
                for r in 0..=x {
                    self.registers.v[r] = self.memory.read_byte(i + r);
                }
            }
            Unknown(opcode) => {
                let err = Chip8Error::UnknownOpcode { opcode };
                self.log(Level::Warn, err.to_string());
            }
        }
        Ok(())
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.registers.pc = self.registers.pc.wrapping_add(2);
        }
    }

    fn write_byte(&mut self, address: usize, value: u8) {
        if let Err(err) = self.memory.write_byte(address, value) {
            self.log(Level::Warn, err.to_string());
        }
    }

    fn log(&self, level: Level, message: impl AsRef<str>) {
        self.logger.log(level, message.as_ref());
    }
}
