use crate::{
    deferred_now::{DeferredNow, TimeZone},
    record::{Record, RenderOptions, TS_DASHES_BLANK_COLONS_DOT},
};
use regex::Regex;
use std::{io::Write, sync::OnceLock};

/// Function type for format functions.
///
/// Every function of this shape is a [`Formatter`].
pub type FormatFunction =
    fn(write: &mut dyn Write, now: &mut DeferredNow, record: &Record) -> Result<(), std::io::Error>;

/// Renders a log call into the text that a sink writes.
///
/// The sink appends the line terminator; implementations must not write one.
pub trait Formatter: Send {
    /// Writes the formatted message into `w`.
    ///
    /// # Errors
    ///
    /// If writing to `w` fails.
    fn format(
        &self,
        w: &mut dyn Write,
        now: &mut DeferredNow,
        record: &Record,
    ) -> Result<(), std::io::Error>;

    /// Applies new formatting properties.
    ///
    /// Formatters that are not configurable ignore this call.
    fn configure(&mut self, _properties: FormatProperties) {}
}

impl<F> Formatter for F
where
    F: Fn(&mut dyn Write, &mut DeferredNow, &Record) -> Result<(), std::io::Error> + Send,
{
    fn format(
        &self,
        w: &mut dyn Write,
        now: &mut DeferredNow,
        record: &Record,
    ) -> Result<(), std::io::Error> {
        (self)(w, now, record)
    }
}

/// Properties of a [`StringFormat`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatProperties {
    /// Layout of a log line; see [`StringFormat`] for the available tokens.
    pub layout: String,
    /// Number of decimal places for floating point values; `None` disables rounding.
    pub decimal_places: Option<usize>,
    /// Time zone for the timestamp and for time values.
    pub time_zone: TimeZone,
}

impl Default for FormatProperties {
    fn default() -> Self {
        Self {
            layout: StringFormat::DEFAULT_LAYOUT.to_string(),
            decimal_places: None,
            time_zone: TimeZone::Utc,
        }
    }
}

/// The formatter every sink starts with.
///
/// The layout is a template with these tokens:
///
/// * `{time}`: the timestamp of the call, like `2024-05-17 09:41:07.332`,
/// * `{sink}`: the name of the sink,
/// * `{level}`: the level, like `WARNING`,
/// * `{thread}`: the name of the calling thread,
/// * `{message}`: the message, with the call's values substituted.
///
/// Everything else is copied literally.
#[derive(Clone, Debug, Default)]
pub struct StringFormat {
    properties: FormatProperties,
}

impl StringFormat {
    /// Layout that is used if nothing else is configured.
    pub const DEFAULT_LAYOUT: &'static str = "{time} [{sink}] {level}: {message}";

    /// Creates a `StringFormat` with the default properties.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `StringFormat` with the given layout.
    #[must_use]
    pub fn with_layout<S: Into<String>>(layout: S) -> Self {
        Self {
            properties: FormatProperties {
                layout: layout.into(),
                ..FormatProperties::default()
            },
        }
    }

    /// The current properties.
    #[must_use]
    pub fn properties(&self) -> &FormatProperties {
        &self.properties
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            decimal_places: self.properties.decimal_places,
            time_zone: self.properties.time_zone,
        }
    }
}

impl Formatter for StringFormat {
    fn format(
        &self,
        w: &mut dyn Write,
        now: &mut DeferredNow,
        record: &Record,
    ) -> Result<(), std::io::Error> {
        let layout = &self.properties.layout;
        let mut last = 0;
        for caps in layout_regex().captures_iter(layout) {
            let Some(token) = caps.get(0) else {
                continue;
            };
            w.write_all(layout[last..token.start()].as_bytes())?;
            match &caps[1] {
                "time" => write!(
                    w,
                    "{}",
                    now.now_in(self.properties.time_zone)
                        .format(TS_DASHES_BLANK_COLONS_DOT)
                )?,
                "sink" => w.write_all(record.sink().as_bytes())?,
                "level" => write!(w, "{}", record.level())?,
                "thread" => w.write_all(
                    std::thread::current()
                        .name()
                        .unwrap_or("<unnamed>")
                        .as_bytes(),
                )?,
                _ => w.write_all(record.render_message(&self.render_options()).as_bytes())?,
            }
            last = token.end();
        }
        w.write_all(layout[last..].as_bytes())
    }

    fn configure(&mut self, properties: FormatProperties) {
        self.properties = properties;
    }
}

fn layout_regex() -> &'static Regex {
    static LAYOUT_TOKEN: OnceLock<Regex> = OnceLock::new();
    LAYOUT_TOKEN.get_or_init(|| Regex::new(r"\{(time|sink|level|thread|message)\}").unwrap(/* ok */))
}

/// A logline-formatter that produces only the message, like
///
/// ```Disk 3 is full```
///
/// # Errors
///
/// See `std::write`
pub fn message_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    w.write_all(record.message().as_bytes())
}

/// A logline-formatter that produces log lines like
///
/// ```WARNING [storage] Disk 3 is full```
///
/// # Errors
///
/// See `std::write`
pub fn default_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} [{}] {}",
        record.level(),
        record.sink(),
        record.message()
    )
}

/// A logline-formatter that produces log lines like
///
/// ```[2024-05-17 09:41:07.332 +00:00] WARNING [storage] T[main] Disk 3 is full```
///
/// i.e. with timestamp and thread name.
///
/// # Errors
///
/// See `std::write`
pub fn detailed_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] {} [{}] T[{}] {}",
        now.now_in(TimeZone::Utc).format("%Y-%m-%d %H:%M:%S%.3f %:z"),
        record.level(),
        record.sink(),
        std::thread::current().name().unwrap_or("<unnamed>"),
        record.message()
    )
}

/// A logline-formatter that produces one JSON object per log line, like
///
/// ```{"timestamp":"2024-05-17 09:41:07.332 +00:00","level":"WARNING","sink":"storage","message":"Disk 3 is full"}```
///
/// # Errors
///
/// See `std::write`
#[cfg(feature = "json")]
#[cfg_attr(docsrs, doc(cfg(feature = "json")))]
pub fn json_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let line = serde_json::json!({
        "timestamp": now
            .now_in(TimeZone::Utc)
            .format("%Y-%m-%d %H:%M:%S%.3f %:z")
            .to_string(),
        "level": record.level().as_str(),
        "sink": record.sink(),
        "message": record.message(),
    });
    serde_json::to_writer(w, &line).map_err(std::io::Error::from)
}
