use crate::{
    destination::Destination,
    sink::Sink,
    writers::{ColourConsoleWriter, ConsoleWriter, FileWriter, LogWriter},
    Colour, LogLevel, SinkError,
};
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// Creates sinks, keeps them under unique names, and hands them out.
///
/// A `Registry` is an ordinary value; an application can have as many as it likes,
/// and passes them around explicitly.
/// Sinks live as long as the registry or any `Arc<Sink>` handed out by it.
///
/// Creation is idempotent by name: if a sink with the requested name exists already,
/// no new sink is created, and the existing one is returned, whatever its variant is.
///
/// # Example
///
/// ```rust
/// use sinklog::{Colour, LogLevel, Registry};
///
/// let registry = Registry::new();
/// registry.create_console_colour("screen");
/// registry.create_file("audit", "audit.log", "log_files", false);
///
/// registry.set_colour("screen", Colour::Red, LogLevel::Warning);
///
/// if let Some(audit) = registry.get("audit") {
///     audit.set_threshold(LogLevel::Info);
///     audit.info_with("user {} logged in", &sinklog::values!["alice"]);
/// }
/// ```
#[derive(Default)]
pub struct Registry {
    sinks: RwLock<HashMap<String, Arc<Sink>>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that writes to stdout.
    pub fn create_console(&self, name: &str) -> Arc<Sink> {
        self.create_with(name, || ConsoleWriter::new().into())
    }

    /// Creates a sink that writes to stdout, coloured by level.
    pub fn create_console_colour(&self, name: &str) -> Arc<Sink> {
        self.create_with(name, || ColourConsoleWriter::new().into())
    }

    /// Creates a sink that writes to the file `file_name` in directory `file_path`.
    ///
    /// The path of the file is `file_path.join(file_name)`; the two parts are not
    /// concatenated as strings, so a `file_path` like `"logs/run1_"` is a directory
    /// named `run1_`, not a prefix of the file name.
    /// A missing `file_path` directory is created, together with its parents.
    ///
    /// An existing file is truncated if `overwrite` is true, and appended to otherwise.
    /// If the file cannot be opened, the sink is created nevertheless,
    /// and drops all messages.
    pub fn create_file<N, P>(
        &self,
        name: &str,
        file_name: N,
        file_path: P,
        overwrite: bool,
    ) -> Arc<Sink>
    where
        N: Into<PathBuf>,
        P: Into<PathBuf>,
    {
        self.create_with(name, move || {
            FileWriter::builder(file_name)
                .directory(file_path)
                .o_append(!overwrite)
                .build()
                .into()
        })
    }

    /// Like [`Registry::create_file`], but reports problems.
    ///
    /// The path is built, and the directory created, as in [`Registry::create_file`].
    ///
    /// # Errors
    ///
    /// `SinkError::DuplicateName` if the name is taken,
    /// `SinkError::Io` if the file cannot be opened.
    pub fn try_create_file<N, P>(
        &self,
        name: &str,
        file_name: N,
        file_path: P,
        overwrite: bool,
    ) -> Result<Arc<Sink>, SinkError>
    where
        N: Into<PathBuf>,
        P: Into<PathBuf>,
    {
        let mut sinks = self.write_sinks();
        if sinks.contains_key(name) {
            return Err(SinkError::DuplicateName(name.to_string()));
        }
        let writer = FileWriter::builder(file_name)
            .directory(file_path)
            .o_append(!overwrite)
            .try_build()?;
        let sink = Arc::new(Sink::new(name.to_string(), writer.into()));
        sinks.insert(name.to_string(), Arc::clone(&sink));
        Ok(sink)
    }

    /// Creates a sink that writes to the given writer.
    ///
    /// If the name is taken, the writer is dropped.
    pub fn create_custom(&self, name: &str, writer: Box<dyn LogWriter>) -> Arc<Sink> {
        self.create_with(name, || Destination::Custom(writer))
    }

    /// Creates a sink with the given destination.
    ///
    /// If the name is taken, the destination is dropped.
    pub fn create(&self, name: &str, destination: Destination) -> Arc<Sink> {
        self.create_with(name, || destination)
    }

    // The destination is only constructed if the name is free;
    // opening a file in truncate mode must not happen for a duplicate.
    fn create_with<F>(&self, name: &str, destination: F) -> Arc<Sink>
    where
        F: FnOnce() -> Destination,
    {
        let mut sinks = self.write_sinks();
        if let Some(existing) = sinks.get(name) {
            return Arc::clone(existing);
        }
        let sink = Arc::new(Sink::new(name.to_string(), destination()));
        sinks.insert(name.to_string(), Arc::clone(&sink));
        sink
    }

    /// The sink with the given name, if it exists.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Sink>> {
        self.read_sinks().get(name).map(Arc::clone)
    }

    /// Returns `true` if a sink with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.read_sinks().contains_key(name)
    }

    /// Changes the colour for a level of the named sink.
    ///
    /// Returns `false`, and does nothing, if there is no such sink,
    /// or if it is not a colour console sink.
    pub fn set_colour(&self, name: &str, colour: Colour, level: LogLevel) -> bool {
        self.get(name)
            .is_some_and(|sink| sink.set_colour(colour, level))
    }

    /// The names of all sinks, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read_sinks().keys().cloned().collect();
        names.sort();
        names
    }

    /// The number of sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read_sinks().len()
    }

    /// Returns `true` if no sink was created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_sinks().is_empty()
    }

    /// Flushes all sinks.
    pub fn flush_all(&self) {
        let sinks: Vec<Arc<Sink>> = self.read_sinks().values().cloned().collect();
        for sink in sinks {
            sink.flush();
        }
    }

    // The map stays consistent even if a panic happened while it was locked.
    fn read_sinks(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Sink>>> {
        self.sinks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_sinks(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Sink>>> {
        self.sinks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("sinks", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::Registry;
    use crate::{
        writers::{test_buffer::SharedBuffer, ColourConsoleWriter, ColourControl},
        Colour, Destination, LogLevel, SinkError, SinkKind,
    };
    use std::sync::Arc;

    #[test]
    fn test_idempotent_creation() {
        let registry = Registry::new();
        let first = registry.create_console("x");
        let second = registry.create_console("x");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(&first, &registry.get("x").unwrap()));
    }

    #[test]
    fn test_name_unique_across_variants() {
        let dir = temp_dir::TempDir::new().unwrap();
        let registry = Registry::new();
        let console = registry.create_console("x");
        let other = registry.create_file("x", "x.log", dir.path(), true);
        assert!(Arc::ptr_eq(&console, &other));
        assert_eq!(registry.get("x").unwrap().kind(), SinkKind::Console);
        // the file was never opened
        assert!(!dir.child("x.log").exists());

        assert!(matches!(
            registry.try_create_file("x", "x.log", dir.path(), true),
            Err(SinkError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_get_unknown() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.get("missing").is_none());
        assert!(!registry.contains("missing"));
    }

    #[test]
    fn test_set_colour_routing() {
        let registry = Registry::new();
        registry.create_console("plain");
        registry.create(
            "colour",
            Destination::ColourConsole(ColourConsoleWriter::with_output(
                Box::new(SharedBuffer::default()),
                ColourControl::Off,
            )),
        );

        assert!(!registry.set_colour("missing", Colour::Red, LogLevel::Error));
        assert!(!registry.set_colour("plain", Colour::Red, LogLevel::Error));
        assert!(registry.set_colour("colour", Colour::Cyan, LogLevel::Error));

        let colour_sink = registry.get("colour").unwrap();
        assert_eq!(colour_sink.colour(LogLevel::Error), Some(Colour::Cyan));
        assert_eq!(colour_sink.colour(LogLevel::Fatal), Some(Colour::Red));
        assert_eq!(registry.names(), vec!["colour".to_string(), "plain".to_string()]);
    }
}
