use crate::{
    util::{eprint_err, ErrorCode},
    writers::LogWriter,
    LogLevel, SinkError,
};
use std::{
    fs::{File, OpenOptions},
    io::{self, LineWriter, Write},
    path::{Path, PathBuf},
};

const UNIX_LINE_ENDING: &[u8] = b"\n";
const WINDOWS_LINE_ENDING: &[u8] = b"\r\n";

/// Writes log lines to a file.
///
/// The file is opened once, when the writer is built.
/// If that fails, the writer is non-functional and all writes are silently dropped.
/// The file is closed when the writer is dropped.
pub struct FileWriter {
    path: PathBuf,
    o_file: Option<LineWriter<File>>,
    line_ending: &'static [u8],
}

impl FileWriter {
    /// Instantiates a builder for the given file name.
    #[must_use]
    pub fn builder<P: Into<PathBuf>>(file_name: P) -> FileWriterBuilder {
        FileWriterBuilder {
            file_name: file_name.into(),
            directory: PathBuf::new(),
            append: false,
            line_ending: UNIX_LINE_ENDING,
        }
    }

    /// The path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the log file could be opened.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.o_file.is_some()
    }
}

impl LogWriter for FileWriter {
    fn write(&mut self, line: &[u8], _level: LogLevel) -> io::Result<()> {
        let Some(file) = &mut self.o_file else {
            return Ok(());
        };
        match line.strip_suffix(UNIX_LINE_ENDING) {
            Some(content) if self.line_ending != UNIX_LINE_ENDING => {
                file.write_all(content)?;
                file.write_all(self.line_ending)
            }
            _ => file.write_all(line),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.o_file {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Builder for [`FileWriter`].
///
/// By default, the file is created in the current directory and truncated if it exists.
#[derive(Debug)]
pub struct FileWriterBuilder {
    file_name: PathBuf,
    directory: PathBuf,
    append: bool,
    line_ending: &'static [u8],
}

impl FileWriterBuilder {
    /// Specifies a folder for the log file.
    ///
    /// The folder is created if it does not exist.
    /// An empty path means the current directory.
    #[must_use]
    pub fn directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.directory = directory.into();
        self
    }

    /// Makes the writer append to the file, if it exists; by default, the file is truncated.
    #[must_use]
    pub fn append(self) -> Self {
        self.o_append(true)
    }

    /// With true, makes the writer append to the file, if it exists.
    /// With false, the file is truncated.
    #[must_use]
    pub fn o_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Use Windows line endings, rather than just `\n`.
    #[must_use]
    pub fn use_windows_line_ending(mut self) -> Self {
        self.line_ending = WINDOWS_LINE_ENDING;
        self
    }

    /// The path of the file that will be opened.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Produces the `FileWriter`.
    ///
    /// # Errors
    ///
    /// `SinkError::Io` if the directory cannot be created or the file cannot be opened.
    pub fn try_build(self) -> Result<FileWriter, SinkError> {
        let path = self.path();
        let file = open(&self.directory, &path, self.append)?;
        Ok(FileWriter {
            path,
            o_file: Some(LineWriter::new(file)),
            line_ending: self.line_ending,
        })
    }

    /// Produces the `FileWriter`, which is non-functional if the file cannot be opened.
    ///
    /// The reason for the failure goes to the [`ErrorChannel`](crate::ErrorChannel).
    #[must_use]
    pub fn build(self) -> FileWriter {
        let path = self.path();
        let o_file = match open(&self.directory, &path, self.append) {
            Ok(file) => Some(LineWriter::new(file)),
            Err(e) => {
                eprint_err(ErrorCode::Open, &format!("cannot open {}", path.display()), &e);
                None
            }
        };
        FileWriter {
            path,
            o_file,
            line_ending: self.line_ending,
        }
    }
}

fn open(directory: &Path, path: &Path, append: bool) -> Result<File, io::Error> {
    if !directory.as_os_str().is_empty() {
        std::fs::create_dir_all(directory)?;
    }
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(path)
}

#[cfg(test)]
mod test {
    use super::FileWriter;
    use crate::{writers::LogWriter, LogLevel};

    #[test]
    fn test_truncate_and_append() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("app.log");
        std::fs::write(&path, "old content\n").unwrap();

        {
            let mut writer = FileWriter::builder("app.log").directory(dir.path()).build();
            assert!(writer.is_open());
            writer.write(b"first\n", LogLevel::Info).unwrap();
        }
        {
            let mut writer = FileWriter::builder("app.log")
                .directory(dir.path())
                .append()
                .build();
            writer.write(b"second\n", LogLevel::Info).unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_windows_line_ending() {
        let dir = temp_dir::TempDir::new().unwrap();
        let mut writer = FileWriter::builder("crlf.log")
            .directory(dir.path())
            .use_windows_line_ending()
            .try_build()
            .unwrap();
        writer.write(b"one\n", LogLevel::Warning).unwrap();
        writer.flush().unwrap();
        assert_eq!(std::fs::read(writer.path()).unwrap(), b"one\r\n");
    }

    #[test]
    fn test_creates_directory() {
        let dir = temp_dir::TempDir::new().unwrap();
        let writer = FileWriter::builder("nested.log")
            .directory(dir.path().join("a").join("b"))
            .try_build()
            .unwrap();
        assert!(writer.path().exists());
    }

    #[test]
    fn test_unopenable_file_is_silent() {
        let dir = temp_dir::TempDir::new().unwrap();
        // a directory cannot be opened as a file
        std::fs::create_dir(dir.child("blocked")).unwrap();

        assert!(FileWriter::builder("blocked")
            .directory(dir.path())
            .try_build()
            .is_err());

        let mut writer = FileWriter::builder("blocked").directory(dir.path()).build();
        assert!(!writer.is_open());
        writer.write(b"lost\n", LogLevel::Fatal).unwrap();
        writer.flush().unwrap();
    }
}
