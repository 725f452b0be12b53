use crate::logger::{Logger, LoggerOption};
use crate::misc::exit_with_error;
use crate::target::Target;
use crate::types::Severity;
use crate::Result;

/// A builder of `Logger` instances.
///
/// Every setter queues a [`LoggerOption`]; `build` applies them in the order
/// they were given and stops at the first failure.
///
/// [`LoggerOption`]: ./enum.LoggerOption.html
///
/// # Examples
///
/// ```
/// use plainlog::LoggerBuilder;
/// use plainlog::types::Severity;
///
/// let logger = LoggerBuilder::new()
///     .level(Severity::Debug)
///     .target_uri("stderr")
///     .build()
///     .unwrap();
/// logger.debug("Hello World!");
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    options: Vec<LoggerOption>,
}
impl LoggerBuilder {
    /// Makes a new `LoggerBuilder` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the threshold.
    pub fn level(&mut self, severity: Severity) -> &mut Self {
        self.option(LoggerOption::Level(severity))
    }

    /// Sets the threshold by name.
    ///
    /// Unrecognized names select `Info`.
    pub fn level_name(&mut self, name: &str) -> &mut Self {
        self.option(LoggerOption::level_name(name))
    }

    /// Sets the target.
    pub fn target<T>(&mut self, target: T) -> &mut Self
    where
        T: Target + Send + 'static,
    {
        self.option(LoggerOption::target(target))
    }

    /// Sets the target referred to by `uri` (see [`TargetUri`]).
    ///
    /// [`TargetUri`]: ./enum.TargetUri.html
    pub fn target_uri(&mut self, uri: &str) -> &mut Self {
        self.option(LoggerOption::target_uri(uri))
    }

    /// Sets the target to the standard error.
    pub fn console(&mut self) -> &mut Self {
        self.option(LoggerOption::Console)
    }

    /// Sets the target to the local syslog daemon.
    pub fn syslog(&mut self) -> &mut Self {
        self.option(LoggerOption::Syslog)
    }

    /// Queues an arbitrary option.
    pub fn option(&mut self, option: LoggerOption) -> &mut Self {
        self.options.push(option);
        self
    }

    /// Builds a logger, consuming the queued options.
    pub fn build(&mut self) -> Result<Logger> {
        track!(Logger::with_options(self.options.drain(..)))
    }

    /// Like `build`, but on failure prints the error to the standard error and
    /// exits the process with status `1`.
    pub fn build_or_exit(&mut self) -> Logger {
        self.build().unwrap_or_else(|e| exit_with_error(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::misc::child;
    use crate::target::mock::MockTarget;
    use crate::ErrorKind;
    use std::fs;

    #[test]
    fn builder_works() {
        let target = MockTarget::new();
        let logger = LoggerBuilder::new()
            .level_name("debug")
            .console()
            .target(target.clone())
            .build()
            .unwrap();
        logger.debug("hi");
        assert_eq!(target.take(), [(Severity::Debug, "hi".to_owned())]);
    }

    #[test]
    fn builder_stops_at_first_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.log");
        let e = LoggerBuilder::new()
            .target_uri("gopher://host")
            .target_uri(&format!("file:{}", path.display()))
            .build()
            .err()
            .unwrap();
        assert_eq!(*e.kind(), ErrorKind::Invalid);
        assert!(fs::metadata(&path).is_err());
    }

    #[test]
    fn build_or_exit_exits_on_error() {
        let output = child::run("build::tests::build_or_exit_exits_on_error", || {
            LoggerBuilder::new()
                .level_name("debug")
                .target_uri("no-such-scheme:x")
                .build_or_exit();
        });
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert_eq!(output.status.code(), Some(1), "{}", stderr);
        assert!(stderr.contains("no-such-scheme"), "{}", stderr);
    }

    #[test]
    fn build_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let logger = LoggerBuilder::new()
            .target_uri(&format!("file:{}", path.display()))
            .build()
            .unwrap();
        logger.debug("dropped");
        logger.info("kept");
        logger.close().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.ends_with(": kept\n"));
    }
}
