//! The destination of accepted log messages.
use crate::types::Severity;
use crate::Result;

/// A configured destination that receives filtered log messages.
///
/// `write` has no error channel: a target must swallow I/O failures so that
/// logging never brings the caller down. Failures to release resources are
/// reported by `close`.
pub trait Target {
    /// Emits `message`.
    fn write(&mut self, severity: Severity, message: &str);

    /// Releases the resources owned by this target.
    ///
    /// Targets wrapping shared process streams (stdout/stderr) return `Ok(())`
    /// without closing anything.
    fn close(&mut self) -> Result<()>;
}
impl<T: Target + ?Sized> Target for Box<T> {
    fn write(&mut self, severity: Severity, message: &str) {
        (**self).write(severity, message)
    }
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
