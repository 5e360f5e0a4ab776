use crossterm::{cursor, execute, terminal};
use std::io::{self, Stdout, Write};

/// Where rendered frames end up.
pub trait Screen {
    fn clear(&mut self) -> io::Result<()>;
    /// Write a complete frame in one go.
    fn present(&mut self, frame: &str) -> io::Result<()>;
}

pub struct TerminalScreen {
    out: Stdout,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Screen for TerminalScreen {
    fn clear(&mut self) -> io::Result<()> {
        execute!(self.out, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))
    }

    fn present(&mut self, frame: &str) -> io::Result<()> {
        let mut lock = self.out.lock();
        lock.write_all(frame.as_bytes())?;
        lock.flush()
    }
}
