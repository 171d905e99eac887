//! CHIP-8 virtual machine core.
//!
//! The [`Interpreter`] owns memory, registers, the 64x32 framebuffer and the
//! hex keypad latch. A host loads a program, calls [`Interpreter::step`] as
//! fast as it likes, reads the framebuffer between steps and feeds key
//! transitions in. Delay and sound timers follow wall-clock time (60 Hz by
//! default) no matter how many instructions run.
//!
//! ```
//! use chip8_vm::Interpreter;
//!
//! let mut cpu = Interpreter::default().with_seed(1);
//! cpu.load_hex("6005 F029 D115 1206").unwrap();
//! for _ in 0..4 {
//!     cpu.step().unwrap();
//! }
//! assert!(cpu.screen().pixel(0, 0));
//! ```

pub mod config;
pub mod disasm;
pub mod error;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod log;
pub mod memory;
pub mod rom;
pub mod screen;
pub mod sound;
pub mod state;
pub mod timer;

pub use crate::config::{Config, DrawPolicy};
pub use crate::disasm::Disassembly;
pub use crate::error::{Chip8Error, Result};
pub use crate::instruction::Instruction;
pub use crate::interpreter::{Interpreter, Step};
pub use crate::screen::{PixelArray, SCREEN_HEIGHT, SCREEN_WIDTH};
