use crate::{deferred_now::TimeZone, LogLevel};
use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use std::{borrow::Cow, fmt::Write as _, sync::OnceLock};

/// Timestamp pattern used for log lines and for [`Value::Time`].
pub const TS_DASHES_BLANK_COLONS_DOT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A positional value that is substituted into a message template.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Text.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number; subject to the formatter's decimal precision.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Single character.
    Char(char),
    /// Point in time; rendered in the formatter's time zone.
    Time(DateTime<Utc>),
}

macro_rules! value_from {
    ($variant:ident, $target:ty; $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(<$target>::from(v))
                }
            }
        )*
    };
}
value_from!(Int, i64; i8, i16, i32, i64);
value_from!(UInt, u64; u8, u16, u32, u64);
value_from!(Float, f64; f32, f64);
value_from!(Bool, bool; bool);
value_from!(Char, char; char);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int(v as i64)
    }
}
impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}
impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}
impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}
impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Time(v)
    }
}

/// Builds an array of [`Value`]s from heterogeneous expressions.
///
/// ```rust
/// let sink = sinklog::Registry::new().create_console("app");
/// sink.info_with("{} of {} done ({})", &sinklog::values![3, 7_u64, "slow"]);
/// ```
#[macro_export]
macro_rules! values {
    ($($v:expr),* $(,)?) => {
        [$($crate::Value::from($v)),*]
    };
}

/// Upper bound for [`RenderOptions::decimal_places`]; larger values are capped.
pub const MAX_DECIMAL_PLACES: usize = 64;

/// Controls how [`Value`]s are turned into text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Number of decimal places for floats, at most [`MAX_DECIMAL_PLACES`];
    /// `None` uses Rust's shortest representation.
    pub decimal_places: Option<usize>,
    /// Time zone for [`Value::Time`].
    pub time_zone: TimeZone,
}

impl Value {
    /// Appends the textual representation of this value.
    pub fn render_into(&self, out: &mut String, options: &RenderOptions) {
        // writing into a String cannot fail
        let _ = match self {
            Value::Str(s) => {
                out.push_str(s);
                Ok(())
            }
            Value::Int(i) => write!(out, "{i}"),
            Value::UInt(u) => write!(out, "{u}"),
            Value::Float(f) => match options.decimal_places {
                Some(places) => {
                    let places = places.min(MAX_DECIMAL_PLACES);
                    write!(out, "{f:.places$}")
                }
                None => write!(out, "{f}"),
            },
            Value::Bool(b) => write!(out, "{b}"),
            Value::Char(c) => {
                out.push(*c);
                Ok(())
            }
            Value::Time(ts) => write!(
                out,
                "{}",
                options
                    .time_zone
                    .convert(*ts)
                    .format(TS_DASHES_BLANK_COLONS_DOT)
            ),
        };
    }
}

/// The data of a single log call, as it is handed to a [`Formatter`](crate::Formatter).
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    sink: &'a str,
    level: LogLevel,
    template: &'a str,
    values: &'a [Value],
}

impl<'a> Record<'a> {
    /// Constructor.
    #[must_use]
    pub fn new(sink: &'a str, level: LogLevel, template: &'a str, values: &'a [Value]) -> Self {
        Self {
            sink,
            level,
            template,
            values,
        }
    }

    /// Name of the sink the message is logged to.
    #[must_use]
    pub fn sink(&self) -> &'a str {
        self.sink
    }

    /// Level of the message.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// The message template, as given by the caller.
    #[must_use]
    pub fn template(&self) -> &'a str {
        self.template
    }

    /// The positional values, as given by the caller.
    #[must_use]
    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// The message with default [`RenderOptions`].
    #[must_use]
    pub fn message(&self) -> Cow<'a, str> {
        self.render_message(&RenderOptions::default())
    }

    /// Substitutes the values into the template.
    ///
    /// Without values, the template is returned verbatim.
    /// Otherwise `{}` takes the next value, `{N}` takes the N-th value (counting from 0),
    /// and `{{` and `}}` produce literal braces.
    /// Placeholders for which no value exists are kept as they are.
    #[must_use]
    pub fn render_message(&self, options: &RenderOptions) -> Cow<'a, str> {
        if self.values.is_empty() {
            return Cow::Borrowed(self.template);
        }
        let mut next = 0_usize;
        let rendered = placeholder_regex().replace_all(self.template, |caps: &Captures| {
            let whole = &caps[0];
            match whole {
                "{{" => "{".to_string(),
                "}}" => "}".to_string(),
                _ => {
                    let index = match caps.get(1).map(|m| m.as_str()) {
                        Some("") | None => {
                            next += 1;
                            Some(next - 1)
                        }
                        Some(digits) => digits.parse::<usize>().ok(),
                    };
                    match index.and_then(|i| self.values.get(i)) {
                        Some(value) => {
                            let mut s = String::new();
                            value.render_into(&mut s, options);
                            s
                        }
                        None => whole.to_string(),
                    }
                }
            }
        });
        Cow::Owned(rendered.into_owned())
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{|\}\}|\{(\d*)\}").unwrap(/* ok */))
}
