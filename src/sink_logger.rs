use crate::{LogLevel, Sink, SinkError};
use std::sync::Arc;

/// Forwards the log calls of the `log` facade to a sink.
///
/// Libraries that log with the macros of the `log` crate can thus be routed
/// into the same sink as the application's own messages.
///
/// ```rust
/// use sinklog::{LogLevel, Registry, SinkLogger};
///
/// let registry = Registry::new();
/// let sink = registry.create_console("main");
/// sink.set_threshold(LogLevel::Info);
/// SinkLogger::new(sink).install().unwrap();
///
/// log::info!("routed through the sink");
/// log::debug!("suppressed by the sink's threshold");
/// ```
///
/// `log`'s `Warn` level maps to [`LogLevel::Warning`]; [`LogLevel::Fatal`] is
/// never produced by the facade.
pub struct SinkLogger {
    sink: Arc<Sink>,
}

impl SinkLogger {
    /// Creates a bridge to the given sink.
    #[must_use]
    pub fn new(sink: Arc<Sink>) -> Self {
        Self { sink }
    }

    /// The sink the log calls are forwarded to.
    #[must_use]
    pub fn sink(&self) -> &Arc<Sink> {
        &self.sink
    }

    /// Registers this bridge as the global logger of the `log` facade,
    /// and sets `log`'s max level according to the sink's current threshold.
    ///
    /// Lowering the sink's threshold later on does not lower `log`'s max level;
    /// use `log::set_max_level` if you need that.
    ///
    /// # Errors
    ///
    /// `SinkError::Log` if a global logger is already installed.
    pub fn install(self) -> Result<(), SinkError> {
        let max_level = self.sink.threshold().to_level_filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl log::Log for SinkLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.sink.is_enabled(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = LogLevel::from(record.level());
        match record.args().as_str() {
            Some(message) => self.sink.log(level, message, &[]),
            None => self.sink.log(level, &record.args().to_string(), &[]),
        }
    }

    fn flush(&self) {
        self.sink.flush();
    }
}
