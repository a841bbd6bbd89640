use crate::{writers::LogWriter, Colour, ColourPalette, LogLevel};
use std::io::{self, IsTerminal, Write};

/// How a [`ColourConsoleWriter`] switches the terminal colour.
///
/// The mode is chosen once, when the writer is created, and is not re-evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColourControl {
    /// ANSI escape sequences, written into the output stream.
    ///
    /// Only effective with feature `colors`.
    Ansi,
    /// The text attributes of the Windows console behind stdout.
    #[cfg(windows)]
    #[cfg_attr(docsrs, doc(cfg(windows)))]
    Console,
    /// No colours.
    Off,
}

impl ColourControl {
    /// Chooses the mode that fits the platform and stdout.
    ///
    /// If stdout is not a terminal, colours are switched off.
    #[must_use]
    pub fn detect() -> Self {
        if !io::stdout().is_terminal() {
            return ColourControl::Off;
        }
        #[cfg(windows)]
        {
            ColourControl::Console
        }
        #[cfg(all(unix, feature = "colors"))]
        {
            ColourControl::Ansi
        }
        #[cfg(not(any(windows, all(unix, feature = "colors"))))]
        {
            ColourControl::Off
        }
    }

    #[cfg_attr(not(feature = "colors"), allow(unused_variables))]
    fn set_colour(self, out: &mut dyn Write, colour: Colour) -> io::Result<()> {
        match self {
            ColourControl::Ansi => {
                #[cfg(feature = "colors")]
                if let Some(ansi) = colour.ansi() {
                    write!(out, "{}", ansi.prefix())?;
                }
                Ok(())
            }
            #[cfg(windows)]
            ColourControl::Console => {
                out.flush()?;
                set_console_attribute(colour.console_attribute());
                Ok(())
            }
            ColourControl::Off => Ok(()),
        }
    }

    // `previous` is the colour that was set for the line that was just written.
    #[cfg_attr(not(feature = "colors"), allow(unused_variables))]
    fn reset(self, out: &mut dyn Write, previous: Colour) -> io::Result<()> {
        match self {
            ColourControl::Ansi => {
                #[cfg(feature = "colors")]
                if let Some(ansi) = previous.ansi() {
                    write!(out, "{}", ansi.suffix())?;
                }
                Ok(())
            }
            #[cfg(windows)]
            ColourControl::Console => {
                let _ = previous;
                out.flush()?;
                set_console_attribute(Colour::Default.console_attribute());
                Ok(())
            }
            ColourControl::Off => Ok(()),
        }
    }
}

#[cfg(windows)]
fn set_console_attribute(attribute: u16) {
    use windows_sys::Win32::System::Console::{
        GetStdHandle, SetConsoleTextAttribute, STD_OUTPUT_HANDLE,
    };
    // SAFETY: both calls only take plain values; an invalid handle makes
    // SetConsoleTextAttribute fail, which is ignored like any colour failure.
    unsafe {
        let handle = GetStdHandle(STD_OUTPUT_HANDLE);
        SetConsoleTextAttribute(handle, attribute);
    }
}

/// Writes log lines to stdout in the colour that the palette assigns to their level.
///
/// Each line is written as the fixed sequence
/// "switch to the level's colour, write the line, switch back to the default colour".
/// The owning sink holds its lock for the whole sequence, so lines from
/// concurrent callers never end up in each other's colour.
pub struct ColourConsoleWriter {
    palette: ColourPalette,
    control: ColourControl,
    out: Box<dyn Write + Send>,
}

impl ColourConsoleWriter {
    /// Writes to stdout, with the default palette and a detected [`ColourControl`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()), ColourControl::detect())
    }

    /// Writes to the given output, with the given colour control.
    #[must_use]
    pub fn with_output(out: Box<dyn Write + Send>, control: ColourControl) -> Self {
        Self {
            palette: ColourPalette::default(),
            control,
            out,
        }
    }

    /// The colour control that is used.
    #[must_use]
    pub fn control(&self) -> ColourControl {
        self.control
    }

    /// The current palette.
    #[must_use]
    pub fn palette(&self) -> &ColourPalette {
        &self.palette
    }

    /// Changes the colour that is used for the given level.
    pub fn set_colour(&mut self, colour: Colour, level: LogLevel) {
        self.palette.set(level, colour);
    }
}

impl Default for ColourConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogWriter for ColourConsoleWriter {
    fn write(&mut self, line: &[u8], level: LogLevel) -> io::Result<()> {
        let colour = self.palette.get(level);
        self.control.set_colour(&mut *self.out, colour)?;
        let result = self.out.write_all(line);
        // switch back even if writing failed, to not leave the terminal coloured
        let reset_result = self.control.reset(&mut *self.out, colour);
        result.and(reset_result)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
