//! Commonly used types.
use crate::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The severity of a log message.
///
/// Severities are totally ordered (`Debug < Info < Error`) and a message is
/// accepted by a logger iff its severity is greater than or equal to the
/// logger's threshold.
///
/// # Examples
///
/// The default value:
///
/// ```
/// use plainlog::types::Severity;
///
/// assert_eq!(Severity::default(), Severity::Info);
/// assert!(Severity::Debug < Severity::Info);
/// assert!(Severity::Info < Severity::Error);
/// ```
#[allow(missing_docs)]
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Severity {
    Debug,
    #[default]
    Info,
    Error,
}
impl Severity {
    /// Returns the severity named by `name`.
    ///
    /// The name is trimmed and compared case-insensitively.
    /// Names other than `debug` and `error` map to `Info`.
    ///
    /// # Examples
    ///
    /// ```
    /// use plainlog::types::Severity;
    ///
    /// assert_eq!(Severity::from_name(" DEBUG "), Severity::Debug);
    /// assert_eq!(Severity::from_name("Error"), Severity::Error);
    /// assert_eq!(Severity::from_name("warning"), Severity::Info);
    /// ```
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("debug") {
            Severity::Debug
        } else if name.eq_ignore_ascii_case("error") {
            Severity::Error
        } else {
            Severity::Info
        }
    }

    /// Returns the lowercase name of this severity.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Error => "error",
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(n: u8) -> Self {
        match n {
            0 => Severity::Debug,
            2 => Severity::Error,
            _ => Severity::Info,
        }
    }
}
impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl From<String> for Severity {
    fn from(s: String) -> Self {
        Severity::from_name(&s)
    }
}
impl FromStr for Severity {
    type Err = Error;

    /// Strict parsing: unlike `from_name`, unknown names are rejected.
    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "error" => Ok(Severity::Error),
            _ => track_panic!(ErrorKind::Invalid, "Undefined severity: {:?}", s),
        }
    }
}
