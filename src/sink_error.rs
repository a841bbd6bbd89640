use thiserror::Error;

/// Describes errors that the observable variants of `sinklog`'s API can report.
///
/// The normal logging and creation methods never return errors; they degrade
/// to "message not delivered", and the cause goes to the
/// [`ErrorChannel`](crate::ErrorChannel).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SinkError {
    /// A log file could not be opened, or its directory could not be created.
    #[error("log file cannot be opened")]
    Io(#[from] std::io::Error),

    /// A sink with this name is already registered.
    #[error("a sink named '{0}' exists already")]
    DuplicateName(String),

    /// Invalid level.
    #[error("invalid level: '{0}'")]
    LevelFilter(String),

    /// Installing the `log` facade bridge failed.
    #[error("logger initialization failed")]
    Log(#[from] log::SetLoggerError),
}
