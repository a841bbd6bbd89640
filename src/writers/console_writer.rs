use crate::{writers::LogWriter, LogLevel};
use std::io::{self, Write};

/// Writes log lines to stdout, without colours.
pub struct ConsoleWriter {
    out: Box<dyn Write + Send>,
}

impl ConsoleWriter {
    /// Writes to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Writes to the given output instead of stdout.
    #[must_use]
    pub fn with_output(out: Box<dyn Write + Send>) -> Self {
        Self { out }
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogWriter for ConsoleWriter {
    #[inline]
    fn write(&mut self, line: &[u8], _level: LogLevel) -> io::Result<()> {
        self.out.write_all(line)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
