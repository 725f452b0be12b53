//! Targets that send log messages to a syslog daemon.
//!
//! The local daemon is reached through the [POSIX syslog API] (Unix-like
//! platforms only). Remote daemons are reached over TCP or UDP with RFC 3164
//! style frames.
//!
//! [POSIX syslog API]: https://pubs.opengroup.org/onlinepubs/9699919799/functions/closelog.html
//!
//! # Concurrency issues
//!
//! POSIX keeps a single `openlog` state per process. Opening a second local
//! syslog target replaces the tag and facility of the first one. Closing the
//! older target afterwards does not call `closelog`, so the newer one keeps
//! working; closing the newest one does.
use crate::misc;
use crate::target::Target;
use crate::types::Severity;
use crate::{Error, ErrorKind, Result};
use std::fmt;
use std::str::FromStr;
use trackable::error::ErrorKindExt;

pub use self::facility::Facility;

mod facility;
#[cfg(unix)]
mod local;
#[cfg(all(test, unix))]
pub(crate) mod mock;
mod remote;
#[cfg(all(test, unix))]
mod tests;

const LOG_ERR: u8 = 3;
const LOG_INFO: u8 = 6;
const LOG_DEBUG: u8 = 7;

/// Maps a severity to the syslog severity code.
fn severity_code(severity: Severity) -> u8 {
    match severity {
        Severity::Debug => LOG_DEBUG,
        Severity::Error => LOG_ERR,
        Severity::Info => LOG_INFO,
    }
}

/// The transport used to reach a remote syslog daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    /// TCP.
    Tcp,

    /// UDP.
    Udp,
}
impl Transport {
    /// Returns the lowercase name of this transport (i.e., its URI scheme).
    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Tcp => "tcp",
            Transport::Udp => "udp",
        }
    }
}
impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for Transport {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Ok(Transport::Tcp),
            "udp" => Ok(Transport::Udp),
            _ => track_panic!(ErrorKind::Invalid, "Undefined transport: {:?}", s),
        }
    }
}

/// A target which forwards log messages to a syslog daemon.
///
/// Severities are mapped to `LOG_DEBUG`, `LOG_INFO` and `LOG_ERR`.
///
/// # Examples
///
/// ```no_run
/// use plainlog::syslog::{SyslogTarget, Transport};
/// use plainlog::Logger;
///
/// # fn main() -> plainlog::Result<()> {
/// let logger = Logger::new();
/// logger.set_target(SyslogTarget::remote(Transport::Udp, "127.0.0.1:514")?);
/// logger.info("Hello, world! This is a test message from `plainlog::syslog`.");
/// logger.close()?;
/// # Ok(())
/// # }
/// ```
pub struct SyslogTarget {
    backend: Backend,
}
impl SyslogTarget {
    /// Connects to the local syslog daemon, tagged with the program name.
    ///
    /// Fails with `ErrorKind::Unsupported` on non-Unix platforms.
    pub fn local() -> Result<Self> {
        track!(SyslogTargetBuilder::new().local())
    }

    /// Dials a remote syslog daemon at `addr` (`host:port`), tagged with the program name.
    pub fn remote(transport: Transport, addr: &str) -> Result<Self> {
        track!(SyslogTargetBuilder::new().remote(transport, addr))
    }
}
impl Target for SyslogTarget {
    fn write(&mut self, severity: Severity, message: &str) {
        let code = severity_code(severity);
        match self.backend {
            #[cfg(unix)]
            Backend::Local(ref local) => local.send(libc::c_int::from(code), message),
            Backend::Remote(ref mut remote) => remote.send(code, message),
        }
    }

    fn close(&mut self) -> Result<()> {
        match self.backend {
            #[cfg(unix)]
            Backend::Local(ref mut local) => {
                local.close();
                Ok(())
            }
            Backend::Remote(ref mut remote) => {
                track!(remote.close().map_err(|e| ErrorKind::Other.cause(e)))
            }
        }
    }
}
impl fmt::Debug for SyslogTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let backend = match self.backend {
            #[cfg(unix)]
            Backend::Local(_) => "local",
            Backend::Remote(_) => "remote",
        };
        f.debug_struct("SyslogTarget")
            .field("backend", &backend)
            .finish()
    }
}

enum Backend {
    #[cfg(unix)]
    Local(local::LocalSyslog),
    Remote(remote::RemoteSyslog),
}

/// A builder of syslog targets.
///
/// # Examples
///
/// ```no_run
/// use plainlog::syslog::{Facility, SyslogTargetBuilder};
///
/// let target = SyslogTargetBuilder::new()
///     .facility(Facility::Local0)
///     .ident("example-app")
///     .local()
///     .unwrap();
/// # drop(target);
/// ```
#[derive(Debug, Clone)]
pub struct SyslogTargetBuilder {
    facility: Facility,
    ident: Option<String>,
}
impl SyslogTargetBuilder {
    /// Makes a new `SyslogTargetBuilder` instance.
    pub fn new() -> Self {
        SyslogTargetBuilder {
            facility: Facility::default(),
            ident: None,
        }
    }

    /// Sets the syslog facility. The default is `Facility::User`.
    pub fn facility(&mut self, facility: Facility) -> &mut Self {
        self.facility = facility;
        self
    }

    /// Sets the tag attached to each message. The default is the program name.
    pub fn ident(&mut self, ident: impl Into<String>) -> &mut Self {
        self.ident = Some(ident.into());
        self
    }

    /// Builds a target connected to the local syslog daemon.
    #[cfg(unix)]
    pub fn local(&self) -> Result<SyslogTarget> {
        let local = local::LocalSyslog::open(&self.tag(), self.facility);
        Ok(SyslogTarget {
            backend: Backend::Local(local),
        })
    }

    /// Builds a target connected to the local syslog daemon.
    #[cfg(not(unix))]
    pub fn local(&self) -> Result<SyslogTarget> {
        track_panic!(
            ErrorKind::Unsupported,
            "syslog is not supported on this platform"
        )
    }

    /// Builds a target connected to the remote syslog daemon at `addr`.
    pub fn remote(&self, transport: Transport, addr: &str) -> Result<SyslogTarget> {
        let remote = track!(remote::RemoteSyslog::dial(
            transport,
            addr,
            &self.tag(),
            self.facility
        )
        .map_err(|e| ErrorKind::Other.cause(format!(
            "cannot dial syslog daemon {}://{}: {}",
            transport, addr, e
        ))))?;
        Ok(SyslogTarget {
            backend: Backend::Remote(remote),
        })
    }

    fn tag(&self) -> String {
        self.ident.clone().unwrap_or_else(misc::program_name)
    }
}
impl Default for SyslogTargetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
