use crate::{
    writers::{ColourConsoleWriter, ConsoleWriter, FileWriter, LogWriter},
    LogLevel,
};

/// Where a sink writes to.
///
/// Each sink owns exactly one destination.
/// Colour operations are only available for [`Destination::ColourConsole`].
pub enum Destination {
    /// Writes to stdout.
    Console(ConsoleWriter),
    /// Writes to stdout, coloured by level.
    ColourConsole(ColourConsoleWriter),
    /// Writes to a file.
    File(FileWriter),
    /// Writes to an application-provided writer.
    Custom(Box<dyn LogWriter>),
}

/// The variant of a sink's [`Destination`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkKind {
    /// See [`Destination::Console`].
    Console,
    /// See [`Destination::ColourConsole`].
    ColourConsole,
    /// See [`Destination::File`].
    File,
    /// See [`Destination::Custom`].
    Custom,
}

impl Destination {
    /// The variant of this destination.
    #[must_use]
    pub fn kind(&self) -> SinkKind {
        match self {
            Self::Console(_) => SinkKind::Console,
            Self::ColourConsole(_) => SinkKind::ColourConsole,
            Self::File(_) => SinkKind::File,
            Self::Custom(_) => SinkKind::Custom,
        }
    }

    // The colour capability, if this destination has it.
    pub(crate) fn colour_writer_mut(&mut self) -> Option<&mut ColourConsoleWriter> {
        match self {
            Self::ColourConsole(w) => Some(w),
            _ => None,
        }
    }

    pub(crate) fn colour_writer(&self) -> Option<&ColourConsoleWriter> {
        match self {
            Self::ColourConsole(w) => Some(w),
            _ => None,
        }
    }

    fn writer_mut(&mut self) -> &mut dyn LogWriter {
        match self {
            Self::Console(w) => w,
            Self::ColourConsole(w) => w,
            Self::File(w) => w,
            Self::Custom(w) => w.as_mut(),
        }
    }
}

impl LogWriter for Destination {
    #[inline]
    fn write(&mut self, line: &[u8], level: LogLevel) -> std::io::Result<()> {
        self.writer_mut().write(line, level)
    }

    #[inline]
    fn flush(&mut self) -> std::io::Result<()> {
        self.writer_mut().flush()
    }
}

impl From<ConsoleWriter> for Destination {
    fn from(w: ConsoleWriter) -> Self {
        Self::Console(w)
    }
}
impl From<ColourConsoleWriter> for Destination {
    fn from(w: ColourConsoleWriter) -> Self {
        Self::ColourConsole(w)
    }
}
impl From<FileWriter> for Destination {
    fn from(w: FileWriter) -> Self {
        Self::File(w)
    }
}
impl From<Box<dyn LogWriter>> for Destination {
    fn from(w: Box<dyn LogWriter>) -> Self {
        Self::Custom(w)
    }
}
