//! Contains the trait [`LogWriter`] and the writers behind the predefined sink variants:
//! [`ConsoleWriter`], [`ColourConsoleWriter`] and [`FileWriter`].
//!
//! Own implementations of [`LogWriter`] can be registered as sinks with
//! [`Registry::create_custom`](crate::Registry::create_custom);
//! they then get the same level filtering, formatting and locking as the predefined variants.
//!
//! ```rust
//! use sinklog::{writers::LogWriter, LogLevel, Registry};
//!
//! struct Collector(Vec<String>);
//! impl LogWriter for Collector {
//!     fn write(&mut self, line: &[u8], _level: LogLevel) -> std::io::Result<()> {
//!         self.0.push(String::from_utf8_lossy(line).into_owned());
//!         Ok(())
//!     }
//!     fn flush(&mut self) -> std::io::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let registry = Registry::new();
//! registry.create_custom("collector", Box::new(Collector(Vec::new())));
//! ```

mod colour_writer;
mod console_writer;
mod file_writer;
mod log_writer;

pub use self::colour_writer::{ColourConsoleWriter, ColourControl};
pub use self::console_writer::ConsoleWriter;
pub use self::file_writer::{FileWriter, FileWriterBuilder};
pub use self::log_writer::LogWriter;
