use crate::file::FileTarget;
use crate::misc::exit_with_error;
use crate::target::Target;
use crate::types::Severity;
use crate::writer::LogWriter;
use crate::Result;
use std::fmt;
use std::process;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A leveled logger.
///
/// A logger holds exactly one [`Target`] and a severity threshold. Messages
/// whose severity is below the threshold are silently dropped; the others are
/// handed to the target.
///
/// All methods take `&self`, so a logger can be shared between threads
/// (e.g., as `Arc<Logger>`).
///
/// [`Target`]: ./target/trait.Target.html
///
/// # Examples
///
/// ```
/// use plainlog::types::Severity;
/// use plainlog::{Logger, LoggerOption};
///
/// let logger = Logger::with_options(vec![
///     LoggerOption::level_name("debug"),
///     LoggerOption::target_uri("stdout"),
/// ])
/// .unwrap();
/// assert_eq!(logger.level(), Severity::Debug);
///
/// logger.debug("Hello World!");
/// logger.infof(format_args!("{} + {} = {}", 1, 2, 3));
/// ```
pub struct Logger {
    target: Mutex<Box<dyn Target + Send>>,
    level: AtomicU8,
}
impl Logger {
    /// Makes a logger writing to the standard error at the `Info` threshold.
    pub fn new() -> Self {
        Logger {
            target: Mutex::new(Box::new(FileTarget::stderr())),
            level: AtomicU8::new(Severity::default().as_u8()),
        }
    }

    /// Makes a logger and applies `options` to it in order.
    ///
    /// Stops at the first failing option and returns its error.
    pub fn with_options<I>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        let logger = Logger::new();
        for option in options {
            track!(option.apply(&logger))?;
        }
        Ok(logger)
    }

    /// Like `with_options`, but on failure prints the error to the standard
    /// error and exits the process with status `1`.
    ///
    /// Meant for program entry points only.
    pub fn with_options_or_exit<I>(options: I) -> Self
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        Logger::with_options(options).unwrap_or_else(|e| exit_with_error(&e))
    }

    /// Replaces the target.
    ///
    /// The previous target is dropped without being closed;
    /// call `close` beforehand to observe close errors.
    pub fn set_target<T>(&self, target: T)
    where
        T: Target + Send + 'static,
    {
        self.set_boxed_target(Box::new(target));
    }

    /// Replaces the target with an already boxed one.
    pub fn set_boxed_target(&self, target: Box<dyn Target + Send>) {
        *self.lock_target() = target;
    }

    /// Sets the threshold.
    pub fn set_level(&self, level: Severity) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    /// Returns the threshold.
    pub fn level(&self) -> Severity {
        Severity::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Returns `true` if a message of `severity` would reach the target.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.level()
    }

    /// Logs `message` at `severity`.
    pub fn print(&self, severity: Severity, message: &str) {
        if self.is_enabled(severity) {
            self.lock_target().write(severity, message);
        }
    }

    /// Logs a formatted message at `severity`.
    ///
    /// The message is only formatted when it is going to be written.
    pub fn printf(&self, severity: Severity, args: fmt::Arguments) {
        if self.is_enabled(severity) {
            self.print(severity, &args.to_string());
        }
    }

    /// Logs `message` at `Debug`.
    pub fn debug(&self, message: &str) {
        self.print(Severity::Debug, message);
    }

    /// Logs a formatted message at `Debug`.
    pub fn debugf(&self, args: fmt::Arguments) {
        self.printf(Severity::Debug, args);
    }

    /// Logs `message` at `Info`.
    pub fn info(&self, message: &str) {
        self.print(Severity::Info, message);
    }

    /// Logs a formatted message at `Info`.
    pub fn infof(&self, args: fmt::Arguments) {
        self.printf(Severity::Info, args);
    }

    /// Logs `message` at `Error`.
    pub fn error(&self, message: &str) {
        self.print(Severity::Error, message);
    }

    /// Logs a formatted message at `Error`.
    pub fn errorf(&self, args: fmt::Arguments) {
        self.printf(Severity::Error, args);
    }

    /// Logs `message` at `Error`, then panics with `message`.
    pub fn panic(&self, message: &str) -> ! {
        self.print(Severity::Error, message);
        panic!("{}", message)
    }

    /// Logs a formatted message at `Error`, then panics with it.
    pub fn panicf(&self, args: fmt::Arguments) -> ! {
        self.panic(&args.to_string())
    }

    /// Logs `message` at `Error`, then exits the process with status `1`.
    ///
    /// Unlike `panic`, no unwinding takes place.
    pub fn fatal(&self, message: &str) -> ! {
        self.print(Severity::Error, message);
        process::exit(1)
    }

    /// Logs a formatted message at `Error`, then exits the process with status `1`.
    pub fn fatalf(&self, args: fmt::Arguments) -> ! {
        self.fatal(&args.to_string())
    }

    /// Closes the target.
    pub fn close(&self) -> Result<()> {
        track!(self.lock_target().close())
    }

    /// Returns an `io::Write` view of this logger at `severity`.
    pub fn writer(&self, severity: Severity) -> LogWriter {
        LogWriter::new(severity, self)
    }

    fn lock_target(&self) -> MutexGuard<Box<dyn Target + Send>> {
        // A panicking target leaves nothing half-updated behind.
        self.target.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .finish()
    }
}
impl slog::Drain for Logger {
    type Ok = ();
    type Err = slog::Never;

    fn log(
        &self,
        record: &slog::Record,
        _values: &slog::OwnedKVList,
    ) -> std::result::Result<Self::Ok, Self::Err> {
        let severity = match record.level() {
            slog::Level::Critical | slog::Level::Error => Severity::Error,
            slog::Level::Warning | slog::Level::Info => Severity::Info,
            slog::Level::Debug | slog::Level::Trace => Severity::Debug,
        };
        self.printf(severity, *record.msg());
        Ok(())
    }
}

/// A step of logger configuration, applied by [`Logger::with_options`].
///
/// [`Logger::with_options`]: ./struct.Logger.html#method.with_options
pub enum LoggerOption {
    /// Sets the threshold.
    Level(Severity),

    /// Sets the target.
    Target(Box<dyn Target + Send>),

    /// Sets the target referred to by a URI (see [`TargetUri`]).
    ///
    /// [`TargetUri`]: ./enum.TargetUri.html
    TargetUri(String),

    /// Sets the target to the standard error.
    Console,

    /// Sets the target to the local syslog daemon.
    Syslog,
}
impl LoggerOption {
    /// Sets the threshold by name (see `Severity::from_name`).
    pub fn level_name(name: &str) -> Self {
        LoggerOption::Level(Severity::from_name(name))
    }

    /// Sets the target.
    pub fn target<T>(target: T) -> Self
    where
        T: Target + Send + 'static,
    {
        LoggerOption::Target(Box::new(target))
    }

    /// Sets the target referred to by `uri`.
    pub fn target_uri(uri: impl Into<String>) -> Self {
        LoggerOption::TargetUri(uri.into())
    }

    /// Applies this option to `logger`.
    pub fn apply(self, logger: &Logger) -> Result<()> {
        match self {
            LoggerOption::Level(level) => logger.set_level(level),
            LoggerOption::Target(target) => logger.set_boxed_target(target),
            LoggerOption::TargetUri(uri) => {
                logger.set_boxed_target(track!(crate::resolve_target(&uri))?)
            }
            LoggerOption::Console => logger.set_target(FileTarget::stderr()),
            LoggerOption::Syslog => {
                logger.set_target(track!(crate::syslog::SyslogTarget::local())?)
            }
        }
        Ok(())
    }
}
impl fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LoggerOption::Level(level) => f.debug_tuple("Level").field(&level).finish(),
            LoggerOption::Target(_) => f.write_str("Target(..)"),
            LoggerOption::TargetUri(ref uri) => f.debug_tuple("TargetUri").field(uri).finish(),
            LoggerOption::Console => f.write_str("Console"),
            LoggerOption::Syslog => f.write_str("Syslog"),
        }
    }
}
