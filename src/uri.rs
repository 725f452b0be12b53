//! Target selection by URI.
use crate::file::FileTarget;
use crate::syslog::{SyslogTarget, Transport};
use crate::target::Target;
use crate::{Error, ErrorKind, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use trackable::error::ErrorKindExt;

/// A parsed target URI.
///
/// | Input                              | Target                       |
/// |------------------------------------|------------------------------|
/// | `stderr`                           | standard error               |
/// | `stdout`                           | standard output              |
/// | `syslog`                           | local syslog daemon          |
/// | `file:<path>`                      | file opened in append mode   |
/// | `tcp://<host:port>`, `udp://<host:port>` | remote syslog daemon   |
///
/// # Examples
///
/// ```
/// use plainlog::TargetUri;
/// use plainlog::syslog::Transport;
///
/// assert_eq!("stderr".parse::<TargetUri>().ok(), Some(TargetUri::Stderr));
/// assert_eq!(
///     "file:/tmp/x.log".parse::<TargetUri>().ok(),
///     Some(TargetUri::File("/tmp/x.log".into()))
/// );
/// assert_eq!(
///     "udp://127.0.0.1:514".parse::<TargetUri>().ok(),
///     Some(TargetUri::Remote(Transport::Udp, "127.0.0.1:514".to_owned()))
/// );
/// assert!("ftp://host".parse::<TargetUri>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetUri {
    /// `stderr`.
    Stderr,

    /// `stdout`.
    Stdout,

    /// `syslog`.
    Syslog,

    /// `file:<path>`.
    File(PathBuf),

    /// `tcp://<addr>` or `udp://<addr>`.
    Remote(Transport, String),
}
impl TargetUri {
    /// Builds the target this URI refers to.
    pub fn build_target(&self) -> Result<Box<dyn Target + Send>> {
        let target: Box<dyn Target + Send> = match *self {
            TargetUri::Stderr => Box::new(FileTarget::stderr()),
            TargetUri::Stdout => Box::new(FileTarget::stdout()),
            TargetUri::Syslog => Box::new(track!(SyslogTarget::local())?),
            TargetUri::File(ref path) => Box::new(track!(FileTarget::open(path))?),
            TargetUri::Remote(transport, ref addr) => {
                Box::new(track!(SyslogTarget::remote(transport, addr))?)
            }
        };
        Ok(target)
    }
}
impl FromStr for TargetUri {
    type Err = Error;

    fn from_str(uri: &str) -> Result<Self> {
        match uri {
            "stderr" => return Ok(TargetUri::Stderr),
            "stdout" => return Ok(TargetUri::Stdout),
            "syslog" => return Ok(TargetUri::Syslog),
            _ => {}
        }

        let (scheme, rest) = track!(split_scheme(uri))?;
        let rest = strip_query(rest);
        match scheme.to_ascii_lowercase().as_str() {
            "file" => {
                let path = strip_authority(rest).map_or(rest, |(_, path)| path);
                let path = track!(percent_decode(path), "uri={:?}", uri)?;
                track_assert!(
                    !path.is_empty(),
                    ErrorKind::Invalid,
                    "Empty file path: {:?}",
                    uri
                );
                Ok(TargetUri::File(PathBuf::from(path)))
            }
            "tcp" | "udp" => {
                let transport = track!(scheme.parse::<Transport>())?;
                let addr = strip_authority(rest).map_or("", |(authority, _)| {
                    authority.rsplit('@').next().unwrap_or(authority)
                });
                track_assert!(
                    !addr.is_empty(),
                    ErrorKind::Invalid,
                    "Empty remote address: {:?}",
                    uri
                );
                Ok(TargetUri::Remote(transport, addr.to_owned()))
            }
            _ => track_panic!(
                ErrorKind::Invalid,
                "Unsupported target scheme {:?}: {:?}",
                scheme,
                uri
            ),
        }
    }
}
impl fmt::Display for TargetUri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TargetUri::Stderr => f.write_str("stderr"),
            TargetUri::Stdout => f.write_str("stdout"),
            TargetUri::Syslog => f.write_str("syslog"),
            TargetUri::File(ref path) => write!(f, "file:{}", path.display()),
            TargetUri::Remote(transport, ref addr) => write!(f, "{}://{}", transport, addr),
        }
    }
}

/// Builds the target referred to by `uri`.
///
/// # Examples
///
/// ```
/// use plainlog::resolve_target;
///
/// assert!(resolve_target("stdout").is_ok());
/// assert!(resolve_target("ftp://host").is_err());
/// ```
pub fn resolve_target(uri: &str) -> Result<Box<dyn Target + Send>> {
    let uri = track!(uri.parse::<TargetUri>())?;
    track!(uri.build_target())
}

/// Splits `<scheme>:<rest>`, where `scheme` is `ALPHA *(ALPHA / DIGIT / "+" / "-" / ".")`.
fn split_scheme(uri: &str) -> Result<(&str, &str)> {
    let colon = uri.find(':');
    let scheme = colon.map_or("", |i| &uri[..i]);
    let valid = scheme.chars().enumerate().all(|(i, c)| {
        c.is_ascii_alphabetic() || (i > 0 && (c.is_ascii_digit() || "+-.".contains(c)))
    });
    track_assert!(
        !scheme.is_empty() && valid,
        ErrorKind::Invalid,
        "Missing URI scheme: {:?}",
        uri
    );
    Ok((scheme, &uri[scheme.len() + 1..]))
}

/// Drops the `?query` and `#fragment` parts.
fn strip_query(rest: &str) -> &str {
    let rest = rest.split('#').next().unwrap_or(rest);
    rest.split('?').next().unwrap_or(rest)
}

/// Decodes `%XX` escapes.
fn percent_decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
                .and_then(|h| std::str::from_utf8(h).ok());
            let byte = track_assert_some!(
                hex.and_then(|h| u8::from_str_radix(h, 16).ok()),
                ErrorKind::Invalid,
                "Invalid percent escape: {:?}",
                input
            );
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    track!(String::from_utf8(out).map_err(|e| ErrorKind::Invalid.cause(e)))
}

/// Splits `//<authority><path>` into its authority and path.
fn strip_authority(rest: &str) -> Option<(&str, &str)> {
    if !rest.starts_with("//") {
        return None;
    }
    let rest = &rest[2..];
    let end = rest.find('/').unwrap_or(rest.len());
    Some((&rest[..end], &rest[end..]))
}
