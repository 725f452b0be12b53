//! Console and file targets.
use crate::misc;
use crate::target::Target;
use crate::types::Severity;
use crate::{ErrorKind, Result};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use trackable::error::ErrorKindExt;

/// A target which writes timestamped lines to a byte stream.
///
/// Each accepted message becomes one line of the form
/// `YYYY/MM/DD HH:MM:SS <program>: <message>` (local time).
///
/// # Examples
///
/// ```
/// use plainlog::file::FileTarget;
/// use plainlog::{Logger, LoggerOption};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("app.log");
///
/// let target = FileTarget::open(&path).unwrap();
/// let logger = Logger::with_options(vec![LoggerOption::target(target)]).unwrap();
/// logger.info("Hello World!");
/// logger.close().unwrap();
///
/// assert!(std::fs::read_to_string(&path).unwrap().ends_with("Hello World!\n"));
/// ```
#[derive(Debug)]
pub struct FileTarget {
    program: String,
    stream: Stream,
}
impl FileTarget {
    /// Makes a target writing to the standard output.
    ///
    /// Closing it leaves the standard output open.
    pub fn stdout() -> Self {
        Self::with_stream(Stream::Stdout)
    }

    /// Makes a target writing to the standard error.
    ///
    /// Closing it leaves the standard error open.
    pub fn stderr() -> Self {
        Self::with_stream(Stream::Stderr)
    }

    /// Makes a target writing to `writer`.
    ///
    /// The target owns `writer`: closing the target flushes and drops it.
    pub fn from_writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::with_stream(Stream::Owned(Box::new(writer)))
    }

    /// Opens the file at `path` in append mode, creating it if it does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        track!(FileTargetBuilder::new(path).build())
    }

    /// Returns `true` if this target wraps the standard output or the standard error.
    pub fn is_stdio(&self) -> bool {
        match self.stream {
            Stream::Stdout | Stream::Stderr => true,
            _ => false,
        }
    }

    fn with_stream(stream: Stream) -> Self {
        FileTarget {
            program: misc::program_name(),
            stream,
        }
    }

    fn format_line(&self, message: &str) -> String {
        format!(
            "{} {}: {}\n",
            misc::local_timestamp(),
            self.program,
            message
        )
    }
}
impl Target for FileTarget {
    fn write(&mut self, _severity: Severity, message: &str) {
        let line = self.format_line(message);
        let _ = self.stream.write_line(line.as_bytes());
    }

    /// Releases the underlying stream.
    ///
    /// The standard output and error are left open. Files are written
    /// unbuffered, so closing one only drops its handle and cannot fail;
    /// the only reportable error is a failed flush of a writer given to
    /// `from_writer`. Closing twice is a no-op.
    fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.stream, Stream::Closed) {
            Stream::Stdout => {
                self.stream = Stream::Stdout;
                Ok(())
            }
            Stream::Stderr => {
                self.stream = Stream::Stderr;
                Ok(())
            }
            Stream::File(..) => Ok(()),
            Stream::Owned(mut writer) => {
                track!(writer.flush().map_err(|e| ErrorKind::Other.cause(e)))
            }
            Stream::Closed => Ok(()),
        }
    }
}

/// A builder of file targets.
///
/// # Examples
///
/// ```
/// use plainlog::file::FileTargetBuilder;
///
/// let dir = tempfile::tempdir().unwrap();
/// let target = FileTargetBuilder::new(dir.path().join("secret.log"))
///     .restrict_permissions(true)
///     .build()
///     .unwrap();
/// # drop(target);
/// ```
#[derive(Debug)]
pub struct FileTargetBuilder {
    path: PathBuf,
    restrict_permissions: bool,
}
impl FileTargetBuilder {
    /// Makes a new `FileTargetBuilder` instance.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileTargetBuilder {
            path: path.as_ref().to_path_buf(),
            restrict_permissions: false,
        }
    }

    /// Creates new log files readable and writable by the owner only (`0600`).
    ///
    /// This has no effect on non-Unix platforms or on files that already exist.
    pub fn restrict_permissions(&mut self, restrict: bool) -> &mut Self {
        self.restrict_permissions = restrict;
        self
    }

    /// Opens the file and builds the target.
    pub fn build(&self) -> Result<FileTarget> {
        let file = track!(self.open_file().map_err(|e| {
            ErrorKind::Other.cause(format!("cannot open log file {:?}: {}", self.path, e))
        }))?;
        Ok(FileTarget::with_stream(Stream::File(file, self.path.clone())))
    }

    fn open_file(&self) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(if self.restrict_permissions { 0o600 } else { 0o666 });
        }
        options.open(&self.path)
    }
}

enum Stream {
    Stdout,
    Stderr,
    File(File, PathBuf),
    Owned(Box<dyn Write + Send>),
    Closed,
}
impl Stream {
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        match *self {
            Stream::Stdout => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                lock.write_all(line)?;
                lock.flush()
            }
            Stream::Stderr => io::stderr().lock().write_all(line),
            Stream::File(ref mut f, _) => f.write_all(line),
            Stream::Owned(ref mut w) => {
                w.write_all(line)?;
                w.flush()
            }
            Stream::Closed => Ok(()),
        }
    }
}
impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Stream::Stdout => f.write_str("Stdout"),
            Stream::Stderr => f.write_str("Stderr"),
            Stream::File(_, ref path) => f.debug_tuple("File").field(path).finish(),
            Stream::Owned(_) => f.write_str("Owned(..)"),
            Stream::Closed => f.write_str("Closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);
    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }
    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenWriter;
    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "broken"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "broken"))
        }
    }

    fn assert_line(line: &str, message: &str) {
        // "YYYY/MM/DD HH:MM:SS "
        assert!(line.len() > 20, "{:?}", line);
        let (stamp, rest) = line.split_at(20);
        assert_eq!(&stamp[4..5], "/");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[19..], " ");
        assert_eq!(rest, format!("{}: {}", misc::program_name(), message));
    }

    #[test]
    fn line_format_works() {
        let buf = SharedBuf::default();
        let mut target = FileTarget::from_writer(buf.clone());
        target.write(Severity::Error, "hello");

        let contents = buf.contents();
        assert!(contents.ends_with('\n'));
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_line(lines[0], "hello");
        assert!(!contents.contains("error"));
    }

    #[test]
    fn stdio_targets_stay_open_after_close() {
        let mut target = FileTarget::stderr();
        assert!(target.is_stdio());
        target.close().unwrap();
        target.write(Severity::Info, "still here");
        target.close().unwrap();
        assert!(io::stderr().write_all(b"").is_ok());

        let mut target = FileTarget::stdout();
        assert!(target.is_stdio());
        target.close().unwrap();
        target.write(Severity::Info, "still here");
        assert!(io::stdout().flush().is_ok());
    }

    #[test]
    fn owned_writer_is_dropped_on_close() {
        let buf = SharedBuf::default();
        let mut target = FileTarget::from_writer(buf.clone());
        assert!(!target.is_stdio());
        target.write(Severity::Info, "before");
        target.close().unwrap();
        target.write(Severity::Info, "after");
        target.close().unwrap();

        let contents = buf.contents();
        assert!(contents.contains("before"));
        assert!(!contents.contains("after"));
        assert_eq!(Arc::strong_count(&buf.0), 1);
    }

    #[test]
    fn write_errors_are_swallowed_and_close_errors_are_reported() {
        let mut target = FileTarget::from_writer(BrokenWriter);
        target.write(Severity::Error, "lost");
        let e = target.close().err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::Other);
    }

    #[test]
    fn file_close_releases_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("closed.log");

        let mut target = FileTarget::open(&path).unwrap();
        target.write(Severity::Info, "before");
        assert!(target.close().is_ok());
        target.write(Severity::Info, "after");
        assert!(target.close().is_ok());
        assert!(!target.is_stdio());

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert_line(contents.trim_end(), "before");
    }

    #[test]
    fn file_target_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foo.log");

        let mut target = FileTarget::open(&path).unwrap();
        target.write(Severity::Info, "first");
        target.close().unwrap();

        let mut target = FileTarget::open(&path).unwrap();
        target.write(Severity::Debug, "second");
        target.close().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_line(lines[0], "first");
        assert_line(lines[1], "second");
    }

    #[test]
    fn open_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/foo.log");
        let e = FileTarget::open(&path).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::Other);
        assert!(e.to_string().contains("cannot open log file"), "{}", e);
    }

    #[cfg(unix)]
    #[test]
    fn restricted_permissions_work() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.log");
        let mut target = FileTargetBuilder::new(&path)
            .restrict_permissions(true)
            .build()
            .unwrap();
        target.write(Severity::Info, "secret");
        target.close().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
