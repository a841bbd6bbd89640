use crate::{deferred_now::DeferredNow, formats::Formatter, record::Record};
use std::{
    cell::RefCell,
    io::Write,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

/// Describes where `sinklog` reports its own failures.
///
/// Logging is best effort: a message that cannot be formatted or written is dropped,
/// and the caller is not informed.
/// The error channel makes such failures visible when this is wanted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ErrorChannel {
    /// Write failure descriptions to stderr.
    StdErr,
    /// Write failure descriptions to stdout.
    StdOut,
    /// Append failure descriptions to the given file.
    File(PathBuf),
    /// Drop failure descriptions silently.
    #[default]
    DevNull,
}

static ERROR_CHANNEL: RwLock<ErrorChannel> = RwLock::new(ErrorChannel::DevNull);

/// Sets the process-wide [`ErrorChannel`].
pub fn set_error_channel(channel: ErrorChannel) {
    *ERROR_CHANNEL
        .write()
        .unwrap_or_else(PoisonError::into_inner) = channel;
}

/// The currently used [`ErrorChannel`].
#[must_use]
pub fn error_channel() -> ErrorChannel {
    ERROR_CHANNEL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[derive(Clone, Copy)]
pub(crate) enum ErrorCode {
    Flush,
    Format,
    Open,
    Poison,
    Write,
}
impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Flush => "flush",
            Self::Format => "format",
            Self::Open => "open",
            Self::Poison => "poison",
            Self::Write => "write",
        }
    }
}

pub(crate) fn eprint_err(error_code: ErrorCode, msg: &str, err: &dyn std::error::Error) {
    let s = format!("[sinklog][{}] {msg}: {err}", error_code.as_str());
    match error_channel() {
        ErrorChannel::StdErr => {
            eprintln!("{s}");
        }
        ErrorChannel::StdOut => {
            println!("{s}");
        }
        ErrorChannel::File(path) => try_to_write(&s, &path),
        ErrorChannel::DevNull => {}
    }
}

fn try_to_write(s: &str, path: &Path) {
    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        writeln!(file, "{s}").ok();
    }
}

// Thread-local buffer
pub(crate) fn buffer_with<F>(f: F)
where
    F: FnOnce(&RefCell<Vec<u8>>),
{
    thread_local! {
        static BUFFER: RefCell<Vec<u8>> = RefCell::new(Vec::with_capacity(200));
    }
    BUFFER.with(f);
}

// Formats the record plus the line terminator into the thread-local buffer,
// and hands the result to the given write function.
// If formatting fails, nothing is written.
pub(crate) fn write_buffered<W>(formatter: &dyn Formatter, record: &Record, write: W)
where
    W: FnOnce(&[u8]),
{
    let mut now = DeferredNow::new();
    buffer_with(|tl_buf| match tl_buf.try_borrow_mut() {
        Ok(mut buffer) => {
            buffer.clear();
            if format_line(formatter, &mut now, record, &mut buffer) {
                write(&buffer);
            }
            buffer.clear();
        }
        Err(_e) => {
            // only reachable if a formatter logs to another sink on the same thread
            let mut tmp_buf = Vec::<u8>::with_capacity(200);
            if format_line(formatter, &mut now, record, &mut tmp_buf) {
                write(&tmp_buf);
            }
        }
    });
}

fn format_line(
    formatter: &dyn Formatter,
    now: &mut DeferredNow,
    record: &Record,
    buffer: &mut Vec<u8>,
) -> bool {
    match formatter.format(buffer, now, record) {
        Ok(()) => {
            buffer.push(b'\n');
            true
        }
        Err(e) => {
            eprint_err(ErrorCode::Format, "formatting failed", &e);
            false
        }
    }
}
