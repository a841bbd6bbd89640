use crate::{
    deferred_now::TimeZone,
    destination::{Destination, SinkKind},
    formats::{FormatFunction, FormatProperties, Formatter, StringFormat},
    record::{Record, Value, MAX_DECIMAL_PLACES},
    util::{eprint_err, write_buffered, ErrorCode},
    writers::LogWriter,
    Colour, LogLevel,
};
use std::sync::{
    atomic::{AtomicU8, Ordering},
    Mutex, MutexGuard,
};

/// A named destination for log messages, with its own threshold, formatter and lock.
///
/// Sinks are created by a [`Registry`](crate::Registry) and shared as `Arc<Sink>`;
/// they cannot be cloned, so that all users of a sink go through the same lock.
///
/// A message is written only if its level is at least the sink's threshold
/// (initially [`LogLevel::Trace`], i.e. everything is written).
/// Messages below the threshold cost a single atomic load: no lock is taken,
/// nothing is formatted, nothing is written.
///
/// For each level there are two methods, e.g. [`Sink::info`] and [`Sink::info_with`]:
/// the first writes the message verbatim, the second substitutes positional values
/// into the message template (see [`Record::render_message`]).
///
/// Logging never fails from the caller's point of view;
/// messages that cannot be formatted or written are dropped
/// and the reason goes to the [`ErrorChannel`](crate::ErrorChannel).
pub struct Sink {
    name: String,
    threshold: AtomicU8,
    state: Mutex<SinkState>,
}

struct SinkState {
    formatter: Box<dyn Formatter>,
    destination: Destination,
}

macro_rules! level_methods {
    ($($level:ident: $plain:ident, $with:ident;)*) => {
        $(
            #[doc = concat!("Writes a message with level `", stringify!($level), "`, verbatim.")]
            #[inline]
            pub fn $plain(&self, message: &str) {
                self.log(LogLevel::$level, message, &[]);
            }

            #[doc = concat!(
                "Writes a message with level `", stringify!($level),
                "`, with the values substituted into the template."
            )]
            #[inline]
            pub fn $with(&self, template: &str, values: &[Value]) {
                self.log(LogLevel::$level, template, values);
            }
        )*
    };
}

impl Sink {
    pub(crate) fn new(name: String, destination: Destination) -> Self {
        Self {
            name,
            threshold: AtomicU8::new(LogLevel::Trace as u8),
            state: Mutex::new(SinkState {
                formatter: Box::new(StringFormat::new()),
                destination,
            }),
        }
    }

    /// The unique name of the sink.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variant of the sink's destination.
    #[must_use]
    pub fn kind(&self) -> SinkKind {
        self.lock_state().destination.kind()
    }

    /// The current threshold.
    #[must_use]
    pub fn threshold(&self) -> LogLevel {
        LogLevel::from_u8(self.threshold.load(Ordering::Relaxed))
    }

    /// Changes the threshold.
    ///
    /// Calls that already passed the threshold check are not affected.
    pub fn set_threshold(&self, threshold: LogLevel) {
        self.threshold.store(threshold as u8, Ordering::Relaxed);
    }

    /// Returns `true` if a message with the given level would be written.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level as u8 >= self.threshold.load(Ordering::Relaxed)
    }

    /// Writes a message with the given level.
    ///
    /// With an empty `values`, the template is written verbatim.
    pub fn log(&self, level: LogLevel, template: &str, values: &[Value]) {
        if !self.is_enabled(level) {
            return;
        }
        let mut guard = self.lock_state();
        let SinkState {
            formatter,
            destination,
        } = &mut *guard;
        let record = Record::new(&self.name, level, template, values);
        write_buffered(&**formatter, &record, |line| {
            destination
                .write(line, level)
                .unwrap_or_else(|e| eprint_err(ErrorCode::Write, "writing failed", &e));
        });
    }

    level_methods! {
        Trace: trace, trace_with;
        Debug: debug, debug_with;
        Info: info, info_with;
        Warning: warning, warning_with;
        Error: error, error_with;
        Fatal: fatal, fatal_with;
    }

    /// Reconfigures the sink's formatter.
    ///
    /// `layout` is the line layout (see [`StringFormat`]);
    /// floating point values are rounded to `decimal_places` if `enable_precision` is true,
    /// where `decimal_places` is capped at [`MAX_DECIMAL_PLACES`](crate::MAX_DECIMAL_PLACES);
    /// timestamps are rendered in `time_zone`.
    ///
    /// Has no effect if the formatter was replaced by one that is not configurable.
    pub fn set_formatting_properties(
        &self,
        layout: &str,
        decimal_places: usize,
        enable_precision: bool,
        time_zone: TimeZone,
    ) {
        self.lock_state().formatter.configure(FormatProperties {
            layout: layout.to_string(),
            decimal_places: enable_precision.then_some(decimal_places.min(MAX_DECIMAL_PLACES)),
            time_zone,
        });
    }

    /// Replaces the sink's formatter.
    pub fn set_formatter(&self, formatter: Box<dyn Formatter>) {
        self.lock_state().formatter = formatter;
    }

    /// Replaces the sink's formatter with a format function,
    /// like [`default_format`](crate::default_format).
    pub fn set_format(&self, format: FormatFunction) {
        self.set_formatter(Box::new(format));
    }

    /// Changes the colour for the given level.
    ///
    /// Returns `false`, and does nothing, if the sink has no colour capability.
    pub fn set_colour(&self, colour: Colour, level: LogLevel) -> bool {
        match self.lock_state().destination.colour_writer_mut() {
            Some(writer) => {
                writer.set_colour(colour, level);
                true
            }
            None => false,
        }
    }

    /// The colour for the given level, if the sink has the colour capability.
    #[must_use]
    pub fn colour(&self, level: LogLevel) -> Option<Colour> {
        self.lock_state()
            .destination
            .colour_writer()
            .map(|w| w.palette().get(level))
    }

    /// Flushes the destination.
    pub fn flush(&self) {
        self.lock_state()
            .destination
            .flush()
            .unwrap_or_else(|e| eprint_err(ErrorCode::Flush, "flushing failed", &e));
    }

    // A panicking formatter or writer poisons the mutex; the sink continues to work.
    fn lock_state(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(|e| {
            eprint_err(ErrorCode::Poison, "sink mutex was poisoned", &e);
            self.state.clear_poison();
            e.into_inner()
        })
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("name", &self.name)
            .field("threshold", &self.threshold())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::Sink;
    use crate::{
        deferred_now::TimeZone,
        message_format,
        writers::{test_buffer::SharedBuffer, ConsoleWriter},
        Colour, Destination, LogLevel, SinkKind,
    };

    fn capturing_sink() -> (Sink, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let sink = Sink::new(
            "capture".to_string(),
            Destination::Console(ConsoleWriter::with_output(Box::new(buffer.clone()))),
        );
        sink.set_format(message_format);
        (sink, buffer)
    }

    #[test]
    fn test_threshold_matrix() {
        for threshold in LogLevel::ALL {
            for level in LogLevel::ALL {
                let (sink, buffer) = capturing_sink();
                sink.set_threshold(threshold);
                sink.log(level, "x", &[]);
                let expected = if level >= threshold { "x\n" } else { "" };
                assert_eq!(
                    buffer.content(),
                    expected,
                    "level {level}, threshold {threshold}"
                );
            }
        }
    }

    #[test]
    fn test_level_methods() {
        let (sink, buffer) = capturing_sink();
        sink.set_format(crate::default_format);
        sink.trace("t");
        sink.debug_with("d{}", &crate::values![1]);
        sink.info("i");
        sink.warning_with("w{}", &crate::values![2]);
        sink.error("e");
        sink.fatal_with("f{}", &crate::values![3]);
        assert_eq!(
            buffer.content(),
            "TRACE [capture] t\nDEBUG [capture] d1\nINFO [capture] i\n\
             WARNING [capture] w2\nERROR [capture] e\nFATAL [capture] f3\n"
        );
    }

    #[test]
    fn test_formatting_properties() {
        let (sink, buffer) = capturing_sink();
        // the format function is not configurable
        sink.set_formatting_properties("{level}: {message}", 1, true, TimeZone::Utc);
        sink.info_with("{}", &crate::values![1.26_f64]);

        sink.set_formatter(Box::new(crate::StringFormat::new()));
        sink.set_formatting_properties("{level}: {message}", 1, true, TimeZone::Utc);
        sink.info_with("{}", &crate::values![1.26_f64]);
        sink.set_formatting_properties("{level}: {message}", 1, false, TimeZone::Utc);
        sink.info_with("{}", &crate::values![1.26_f64]);

        assert_eq!(buffer.content(), "1.26\nINFO: 1.3\nINFO: 1.26\n");
    }

    #[test]
    fn test_huge_precision_does_not_panic() {
        let (sink, buffer) = capturing_sink();
        sink.set_formatter(Box::new(crate::StringFormat::new()));
        sink.set_formatting_properties("{message}", 70_000, true, TimeZone::Utc);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sink.info_with("{}", &crate::values![1.5_f64]);
        }));
        assert!(result.is_ok());
        assert_eq!(
            buffer.content(),
            format!("1.5{}\n", "0".repeat(crate::MAX_DECIMAL_PLACES - 1))
        );
    }

    #[test]
    fn test_suppressed_levels_are_not_formatted() {
        use std::sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        };

        fn counting_format(
            calls: Arc<AtomicUsize>,
        ) -> impl Fn(&mut dyn std::io::Write, &mut crate::DeferredNow, &crate::Record) -> std::io::Result<()>
               + Send {
            move |w, _now, record| {
                calls.fetch_add(1, Ordering::SeqCst);
                w.write_all(record.message().as_bytes())
            }
        }

        let (sink, buffer) = capturing_sink();
        let calls = Arc::new(AtomicUsize::new(0));
        sink.set_formatter(Box::new(counting_format(Arc::clone(&calls))));
        sink.set_threshold(LogLevel::Error);

        sink.trace("t");
        sink.debug_with("d{}", &crate::values![1]);
        sink.info("i");
        sink.warning("w");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(buffer.content(), "");

        sink.error("e");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(buffer.content(), "e\n");
    }

    #[test]
    fn test_colour_capability() {
        let (sink, _buffer) = capturing_sink();
        assert_eq!(sink.kind(), SinkKind::Console);
        assert!(!sink.set_colour(Colour::Red, LogLevel::Info));
        assert_eq!(sink.colour(LogLevel::Info), None);
    }

    #[test]
    fn test_survives_panicking_formatter() {
        fn panicking_format(
            _w: &mut dyn std::io::Write,
            _now: &mut crate::DeferredNow,
            _record: &crate::Record,
        ) -> std::io::Result<()> {
            panic!("formatter bug")
        }

        let (sink, buffer) = capturing_sink();
        sink.set_format(panicking_format);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sink.info("boom");
        }));
        assert!(result.is_err());

        sink.set_format(message_format);
        sink.info("still alive");
        assert_eq!(buffer.content(), "still alive\n");
    }
}
