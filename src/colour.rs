use crate::LogLevel;

/// Colours a [`ColourConsole`](crate::SinkKind::ColourConsole) sink can use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Colour {
    /// The terminal's normal text colour.
    Default,
    /// White.
    White,
    /// Blue.
    Blue,
    /// Cyan.
    Cyan,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
}

impl Colour {
    // Index into the 16-colour palette of the Windows console.
    #[cfg_attr(not(windows), allow(dead_code))]
    pub(crate) fn console_attribute(self) -> u16 {
        match self {
            Colour::White => 15,
            Colour::Cyan => 11,
            Colour::Green => 10,
            Colour::Blue => 9,
            Colour::Yellow => 14,
            Colour::Red => 12,
            Colour::Default => 7,
        }
    }

    #[cfg(feature = "colors")]
    pub(crate) fn ansi(self) -> Option<nu_ansi_term::Color> {
        use nu_ansi_term::Color;
        match self {
            Colour::Default => None,
            Colour::White => Some(Color::White),
            Colour::Blue => Some(Color::Blue),
            Colour::Cyan => Some(Color::Cyan),
            Colour::Red => Some(Color::Red),
            Colour::Green => Some(Color::Green),
            Colour::Yellow => Some(Color::Yellow),
        }
    }
}

/// Assigns a colour to each log level.
///
/// The default palette is
///
/// | level   | colour |
/// |---------|--------|
/// | TRACE   | green  |
/// | DEBUG   | cyan   |
/// | INFO    | white  |
/// | WARNING | blue   |
/// | ERROR   | yellow |
/// | FATAL   | red    |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColourPalette([Colour; 6]);

impl ColourPalette {
    /// The colour used for messages of the given level.
    #[must_use]
    pub fn get(&self, level: LogLevel) -> Colour {
        self.0[level.index()]
    }

    /// Changes the colour of a single level.
    pub fn set(&mut self, level: LogLevel, colour: Colour) {
        self.0[level.index()] = colour;
    }
}

impl Default for ColourPalette {
    fn default() -> Self {
        Self([
            Colour::Green,
            Colour::Cyan,
            Colour::White,
            Colour::Blue,
            Colour::Yellow,
            Colour::Red,
        ])
    }
}
