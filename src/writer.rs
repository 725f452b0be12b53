use crate::logger::Logger;
use crate::types::Severity;
use std::io;

/// An `io::Write` which logs everything written to it at a fixed severity.
///
/// Useful for redirecting the diagnostic output of another component into a
/// [`Logger`]. Each `write` call becomes one message (bytes are decoded as
/// UTF-8, lossily). Writes always succeed and consume the whole buffer.
///
/// [`Logger`]: ./struct.Logger.html
///
/// # Examples
///
/// ```
/// use plainlog::types::Severity;
/// use plainlog::{LogWriter, Logger};
/// use std::io::Write;
///
/// let logger = Logger::new();
/// let mut writer = LogWriter::new(Severity::Error, &logger);
/// assert_eq!(writer.write(b"something went wrong").unwrap(), 20);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogWriter<'a> {
    severity: Severity,
    logger: &'a Logger,
}
impl<'a> LogWriter<'a> {
    /// Makes a new `LogWriter` instance.
    pub fn new(severity: Severity, logger: &'a Logger) -> Self {
        LogWriter { severity, logger }
    }

    /// Returns the severity of the messages written by this writer.
    pub fn severity(&self) -> Severity {
        self.severity
    }
}
impl<'a> io::Write for LogWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.logger
            .printf(self.severity, format_args!("{}", String::from_utf8_lossy(buf)));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
