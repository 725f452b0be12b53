use crate::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// A syslog facility, as numbered by RFC 3164.
///
/// The numeric codes are the ones used on the wire by remote syslog targets.
/// On Unix they also coincide with the `LOG_*` facility constants of libc
/// (shifted left by three bits), so the same value is passed to `openlog`.
#[allow(missing_docs)]
#[derive(Default, Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Facility {
    Kern,
    #[default]
    User,
    Mail,
    Daemon,
    Auth,
    Syslog,
    Lpr,
    News,
    Uucp,
    Cron,
    AuthPriv,
    Ftp,
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

impl Facility {
    /// Gets the name of this `Facility`, in lowercase.
    pub fn name(self) -> &'static str {
        match self {
            Facility::Kern => "kern",
            Facility::User => "user",
            Facility::Mail => "mail",
            Facility::Daemon => "daemon",
            Facility::Auth => "auth",
            Facility::Syslog => "syslog",
            Facility::Lpr => "lpr",
            Facility::News => "news",
            Facility::Uucp => "uucp",
            Facility::Cron => "cron",
            Facility::AuthPriv => "authpriv",
            Facility::Ftp => "ftp",
            Facility::Local0 => "local0",
            Facility::Local1 => "local1",
            Facility::Local2 => "local2",
            Facility::Local3 => "local3",
            Facility::Local4 => "local4",
            Facility::Local5 => "local5",
            Facility::Local6 => "local6",
            Facility::Local7 => "local7",
        }
    }

    /// The RFC 3164 facility code (`0` for `kern` up to `23` for `local7`).
    pub fn code(self) -> u8 {
        match self {
            Facility::Kern => 0,
            Facility::User => 1,
            Facility::Mail => 2,
            Facility::Daemon => 3,
            Facility::Auth => 4,
            Facility::Syslog => 5,
            Facility::Lpr => 6,
            Facility::News => 7,
            Facility::Uucp => 8,
            Facility::Cron => 9,
            Facility::AuthPriv => 10,
            Facility::Ftp => 11,
            Facility::Local0 => 16,
            Facility::Local1 => 17,
            Facility::Local2 => 18,
            Facility::Local3 => 19,
            Facility::Local4 => 20,
            Facility::Local5 => 21,
            Facility::Local6 => 22,
            Facility::Local7 => 23,
        }
    }

    /// Combines this facility and a syslog severity code into a priority value.
    pub fn priority(self, severity_code: u8) -> u8 {
        (self.code() << 3) | (severity_code & 0x07)
    }
}

impl Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Facility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let facility = match s.to_ascii_lowercase().as_str() {
            "kern" => Facility::Kern,
            "user" => Facility::User,
            "mail" => Facility::Mail,
            "daemon" => Facility::Daemon,
            "auth" => Facility::Auth,
            "syslog" => Facility::Syslog,
            "lpr" => Facility::Lpr,
            "news" => Facility::News,
            "uucp" => Facility::Uucp,
            "cron" => Facility::Cron,
            "authpriv" => Facility::AuthPriv,
            "ftp" => Facility::Ftp,
            "local0" => Facility::Local0,
            "local1" => Facility::Local1,
            "local2" => Facility::Local2,
            "local3" => Facility::Local3,
            "local4" => Facility::Local4,
            "local5" => Facility::Local5,
            "local6" => Facility::Local6,
            "local7" => Facility::Local7,
            _ => track_panic!(
                ErrorKind::Invalid,
                "unrecognized syslog facility name `{}`",
                s
            ),
        };
        Ok(facility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facility_from_str_works() {
        assert_eq!(Facility::from_str("daemon").ok(), Some(Facility::Daemon));
        assert_eq!(Facility::from_str("LOCAL3").ok(), Some(Facility::Local3));

        let e = Facility::from_str("foobar").err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::Invalid);
        assert!(e
            .to_string()
            .contains("unrecognized syslog facility name `foobar`"));
    }

    #[test]
    fn priority_works() {
        assert_eq!(Facility::Kern.priority(3), 3);
        assert_eq!(Facility::User.priority(6), 14);
        assert_eq!(Facility::Local7.priority(7), 191);
    }

    #[cfg(unix)]
    #[test]
    fn codes_match_libc() {
        assert_eq!(libc::c_int::from(Facility::User.code()) << 3, libc::LOG_USER);
        assert_eq!(
            libc::c_int::from(Facility::Daemon.code()) << 3,
            libc::LOG_DAEMON
        );
        assert_eq!(
            libc::c_int::from(Facility::Local0.code()) << 3,
            libc::LOG_LOCAL0
        );
    }
}
