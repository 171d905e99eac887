use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

pub use ::log::Level;

/// Logging capability handed to the interpreter.
pub trait Logger {
    fn log(&self, level: Level, message: &str);
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message)
    }
}

/// Swallows everything.
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Level, _message: &str) {}
}

/// Appends one line per message to a file.
pub struct FileLogger {
    file: Mutex<File>,
}

impl FileLogger {
    pub const DEFAULT_PATH: &'static str = "log.txt";

    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(true)
            .open(path)?;
        Ok(FileLogger {
            file: Mutex::new(file),
        })
    }
}

impl Logger for FileLogger {
    fn log(&self, level: Level, message: &str) {
        // a poisoned lock or a full disk shouldn't take the machine down
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "[{}] {}", level, message);
        }
    }
}

/// Hands messages to whatever `log` backend the host installed.
pub struct FacadeLogger;

impl Logger for FacadeLogger {
    fn log(&self, level: Level, message: &str) {
        ::log::log!(target: "chip8_vm", level, "{}", message);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Keeps messages around so tests can look at them.
    #[derive(Default, Clone)]
    pub struct MemoryLogger {
        pub lines: Rc<RefCell<Vec<(Level, String)>>>,
    }

    impl Logger for MemoryLogger {
        fn log(&self, level: Level, message: &str) {
            self.lines.borrow_mut().push((level, message.to_string()));
        }
    }

    impl MemoryLogger {
        pub fn count(&self, level: Level) -> usize {
            self.lines.borrow().iter().filter(|(l, _)| *l == level).count()
        }
    }

    #[test]
    fn file_logger_appends_lines() -> io::Result<()> {
        let path = std::env::temp_dir().join(format!("chip8-vm-log-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&path);
        {
            let logger = FileLogger::open(&path)?;
            logger.log(Level::Warn, "first");
            logger.log(Level::Trace, "second");
        }
        let text = std::fs::read_to_string(&path)?;
        assert_eq!(text, "[WARN] first\n[TRACE] second\n");
        std::fs::remove_file(&path)
    }
}
