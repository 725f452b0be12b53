use trackable::error::{ErrorKind as TrackableErrorKind, TrackableError};

/// The error type for this crate.
pub type Error = TrackableError<ErrorKind>;

/// A list of error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid input (e.g., a malformed target URI).
    Invalid,

    /// The requested target is not available on this platform.
    Unsupported,

    /// Unknown error (typically an I/O failure).
    Other,
}
impl TrackableErrorKind for ErrorKind {}
