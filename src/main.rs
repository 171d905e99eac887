mod terminal;

use std::error::Error;
use std::path::PathBuf;
use std::{thread, time};

use clap::Parser;
use simple_logger::SimpleLogger;

use chip8_vm::disasm;
use chip8_vm::log::{FacadeLogger, FileLogger, Logger, NullLogger};
use chip8_vm::memory::MEMORY_SIZE;
use chip8_vm::{Config, DrawPolicy, Interpreter};

use terminal::{Action, Bell, Terminal};

/// one display refresh at 60 Hz
const FRAME: time::Duration = time::Duration::from_micros(16_667);

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Edges {
    Clip,
    Wrap,
}

#[derive(Parser, Debug)]
#[command(name = "chip8-vm", version, about = "CHIP-8 interpreter for the terminal")]
struct Args {
    /// Program image; must end in .ch8
    #[arg(value_name = "ROM", required_unless_present = "hex")]
    rom: Option<PathBuf>,

    /// Run a program written as hex text instead of a file
    #[arg(long, value_name = "HEX", conflicts_with = "rom")]
    hex: Option<String>,

    /// Print the disassembled program and exit
    #[arg(long, default_value_t = false)]
    disassemble: bool,

    /// Leave words that aren't instructions out of the listing
    #[arg(long, default_value_t = false, requires = "disassemble")]
    skip_data: bool,

    /// Start in single-step mode with the register panel shown
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// What sprites do at the screen edges
    #[arg(long, value_enum, default_value_t = Edges::Clip)]
    edges: Edges,

    /// Instructions run per 60 Hz frame
    #[arg(long, default_value_t = 10)]
    cycles_per_frame: u32,

    #[arg(long, default_value_t = 60)]
    timer_hz: u32,

    /// Where the program is loaded and starts, in hex
    #[arg(long, value_name = "ADDR", default_value = "200", value_parser = parse_address)]
    load_address: u16,

    /// Seed for CXNN, for reproducible runs
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Append interpreter log lines to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn parse_address(text: &str) -> Result<u16, String> {
    let digits = text.trim_start_matches("0x").trim_start_matches("0X");
    match u16::from_str_radix(digits, 16) {
        Ok(address) if (address as usize) < MEMORY_SIZE => Ok(address),
        Ok(_) => Err(format!("{} is past the end of memory", text)),
        Err(err) => Err(err.to_string()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let logger: Box<dyn Logger> = match &args.log_file {
        Some(path) => Box::new(FileLogger::open(path)?),
        None if args.disassemble => {
            SimpleLogger::new().with_level(log::LevelFilter::Info).init()?;
            Box::new(FacadeLogger)
        }
        None => Box::new(NullLogger),
    };

    let config = Config::default()
        .draw_policy(match args.edges {
            Edges::Clip => DrawPolicy::Clip,
            Edges::Wrap => DrawPolicy::Wrap,
        })
        .timer_hz(args.timer_hz)
        .load_address(args.load_address);
    let mut cpu = Interpreter::new(config).with_logger(logger).with_sound(Bell);
    if let Some(seed) = args.seed {
        cpu = cpu.with_seed(seed);
    }

    match (&args.rom, &args.hex) {
        (_, Some(text)) => cpu.load_hex(text)?,
        (Some(path), None) => cpu.load_rom(path)?,
        (None, None) => unreachable!("clap requires a rom or --hex"),
    }

    if args.disassemble {
        let start = cpu.config().load_address;
        for line in disasm::listing(cpu.memory().as_slice(), start, MEMORY_SIZE as u16 - 1, args.skip_data) {
            println!("{}", line);
        }
        return Ok(());
    }

    run(&mut cpu, &args)
}

fn run(cpu: &mut Interpreter, args: &Args) -> Result<(), Box<dyn Error>> {
    let mut term = Terminal::open()?;
    let mut running = !args.debug;
    let mut step_once = false;

    loop {
        let frame_start = time::Instant::now();

        for action in term.poll_actions(args.debug)? {
            match action {
                Action::Quit => return Ok(()),
                Action::Key(key) => cpu.deliver_key_down(key)?,
                Action::ToggleRun => running = !running,
                Action::StepOnce => step_once = true,
            }
        }
        for key in term.released_keys() {
            cpu.deliver_key_up(key)?;
        }

        let cycles = if running {
            args.cycles_per_frame
        } else if step_once {
            step_once = false;
            1
        } else {
            0
        };
        for _ in 0..cycles {
            if let Err(err) = cpu.step() {
                // leave the last frame up
                term.render_pixels(cpu)?;
                let what = if err.is_stack_fault() {
                    "program halted"
                } else {
                    "interpreter error"
                };
                term.status(&format!("{}: {} (esc to quit)", what, err))?;
                while !term
                    .poll_actions(false)?
                    .iter()
                    .any(|a| matches!(a, Action::Quit))
                {
                    thread::sleep(FRAME);
                }
                return Err(err.into());
            }
        }

        term.render_pixels(cpu)?;
        if args.debug {
            term.render_debug(cpu, running)?;
        }
        term.status(if cpu.is_waiting_for_key() {
            "waiting for a key"
        } else {
            ""
        })?;

        if let Some(rest) = FRAME.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_address_is_hex() {
        assert_eq!(parse_address("200"), Ok(0x200));
        assert_eq!(parse_address("0x600"), Ok(0x600));
        assert!(parse_address("1000").is_err());
        assert!(parse_address("zz").is_err());
    }
}
