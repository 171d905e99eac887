use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::style::Print;
use crossterm::{cursor, terminal, ExecutableCommand, QueueableCommand};

use chip8_vm::input::KEY_COUNT;
use chip8_vm::screen::PIXEL_COUNT;
use chip8_vm::sound::Sound;
use chip8_vm::{Instruction, Interpreter, PixelArray, SCREEN_HEIGHT, SCREEN_WIDTH};

/// left-hand side of a qwerty keyboard laid out like the COSMAC VIP pad:
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// q w e r      4 5 6 D
/// a s d f  ->  7 8 9 E
/// z x c v      A 0 B F
/// ```
const KEY_MAP: [(char, u8); KEY_COUNT] = [
    ('x', 0x0),
    ('1', 0x1),
    ('2', 0x2),
    ('3', 0x3),
    ('q', 0x4),
    ('w', 0x5),
    ('e', 0x6),
    ('a', 0x7),
    ('s', 0x8),
    ('d', 0x9),
    ('z', 0xA),
    ('c', 0xB),
    ('4', 0xC),
    ('r', 0xD),
    ('f', 0xE),
    ('v', 0xF),
];

/// Terminals only report presses, so a key counts as released once it
/// hasn't repeated for this long.
const KEY_HOLD: Duration = Duration::from_millis(150);

const DEBUG_COLUMN: u16 = SCREEN_WIDTH as u16 + 2;
const STATUS_ROW: u16 = SCREEN_HEIGHT as u16 + 1;

pub enum Action {
    Quit,
    Key(u8),
    ToggleRun,
    StepOnce,
}

fn keypad(c: char) -> Option<u8> {
    KEY_MAP
        .iter()
        .find(|(k, _)| *k == c.to_ascii_lowercase())
        .map(|(_, key)| *key)
}

/// Raw-mode terminal that shows the framebuffer and collects key presses.
pub struct Terminal {
    stdout: Stdout,
    shown: PixelArray,
    first_render: bool,
    held: [Option<Instant>; KEY_COUNT],
}

impl Terminal {
    pub fn open() -> crossterm::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = stdout();
        stdout
            .execute(terminal::EnterAlternateScreen)?
            .execute(cursor::Hide)?
            .execute(terminal::Clear(terminal::ClearType::All))?;
        Ok(Terminal {
            stdout,
            shown: [false; PIXEL_COUNT],
            first_render: true,
            held: [None; KEY_COUNT],
        })
    }

    /// Only cells that changed since the last frame are redrawn.
    pub fn render_pixels(&mut self, cpu: &Interpreter) -> crossterm::Result<()> {
        let pixels = cpu.screen().pixels();
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                let index = x + y * SCREEN_WIDTH;
                if !self.first_render && self.shown[index] == pixels[index] {
                    continue;
                }
                self.stdout.queue(cursor::MoveTo(x as u16, y as u16))?;
                self.stdout
                    .queue(Print(if pixels[index] { "█" } else { " " }))?;
                self.shown[index] = pixels[index];
            }
        }
        self.stdout.flush()?;
        self.first_render = false;
        Ok(())
    }

    /// Current opcode, its mnemonic and the register file, next to the screen.
    pub fn render_debug(&mut self, cpu: &Interpreter, running: bool) -> crossterm::Result<()> {
        let registers = cpu.registers();
        let pc = registers.pc;
        let opcode = cpu.memory().read_short(pc as usize);
        let mnemonic = cpu
            .disassemble(pc, pc.saturating_add(1))
            .remove(&pc)
            .unwrap_or_else(|| Instruction::decode(opcode).to_string());

        let mut lines = vec![
            format!("Opcode: {:04X}", opcode),
            mnemonic,
            String::from(if running {
                "RUN  (n: step mode)"
            } else {
                "STEP (space: next, n: run)"
            }),
            String::from("CPU Info:"),
        ];
        lines.extend(registers.to_string().lines().map(String::from));
        lines.extend(registers.dump_v().lines().map(String::from));

        for (row, line) in lines.iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(DEBUG_COLUMN, row as u16))?;
            self.stdout.queue(Print(format!("{:<40}", line)))?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    pub fn status(&mut self, message: &str) -> crossterm::Result<()> {
        self.stdout.queue(cursor::MoveTo(0, STATUS_ROW))?;
        self.stdout.queue(Print(format!("{:<64}", message)))?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Drain pending terminal events without blocking.
    pub fn poll_actions(&mut self, debug: bool) -> crossterm::Result<Vec<Action>> {
        let mut actions = Vec::new();
        while poll(Duration::from_millis(0))? {
            let event = match read()? {
                Event::Key(event) => event,
                _ => continue,
            };
            match event.code {
                KeyCode::Esc => actions.push(Action::Quit),
                KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                    actions.push(Action::Quit)
                }
                KeyCode::Char('n') if debug => actions.push(Action::ToggleRun),
                KeyCode::Char(' ') if debug => actions.push(Action::StepOnce),
                KeyCode::Char(c) => {
                    if let Some(key) = keypad(c) {
                        self.held[key as usize] = Some(Instant::now());
                        actions.push(Action::Key(key));
                    }
                }
                _ => {}
            }
        }
        Ok(actions)
    }

    /// Keys that haven't repeated recently.
    pub fn released_keys(&mut self) -> Vec<u8> {
        let now = Instant::now();
        let mut released = Vec::new();
        for (key, held) in self.held.iter_mut().enumerate() {
            if let Some(since) = *held {
                if now.duration_since(since) > KEY_HOLD {
                    *held = None;
                    released.push(key as u8);
                }
            }
        }
        released
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Rings the terminal bell when the sound timer runs out.
pub struct Bell;

impl Sound for Bell {
    fn beep(&mut self) {
        let mut out = stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypad_layout() {
        assert_eq!(keypad('1'), Some(0x1));
        assert_eq!(keypad('4'), Some(0xC));
        assert_eq!(keypad('V'), Some(0xF));
        assert_eq!(keypad('x'), Some(0x0));
        assert_eq!(keypad('p'), None);
    }

    #[test]
    fn every_key_is_mapped_once() {
        let mut seen = [false; KEY_COUNT];
        for (_, key) in KEY_MAP.iter() {
            assert!(!seen[*key as usize]);
            seen[*key as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
