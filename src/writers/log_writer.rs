use crate::LogLevel;
use std::io;

/// Writes formatted log lines to a single output.
///
/// The owning [`Sink`](crate::Sink) holds its lock while it calls the writer,
/// so implementations see one call at a time and need no locking of their own.
///
/// Boxed instances of `LogWriter` can be registered as sinks with
/// [`Registry::create_custom`](crate::Registry::create_custom).
pub trait LogWriter: Send {
    /// Writes out a log line.
    ///
    /// `line` is the complete output of the formatter, including the trailing `\n`.
    ///
    /// # Errors
    ///
    /// If the underlying output fails; the sink reports the error to the
    /// [`ErrorChannel`](crate::ErrorChannel) and drops the line.
    fn write(&mut self, line: &[u8], level: LogLevel) -> io::Result<()>;

    /// Flushes any buffered lines.
    ///
    /// # Errors
    ///
    /// If the underlying output fails.
    fn flush(&mut self) -> io::Result<()>;
}
