use crate::logger::Logger;
use crate::{ErrorKind, Result};
use chrono::{Local, SecondsFormat};
use std::env;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::sync::Arc;
use trackable::error::ErrorKindExt;

/// Sets `logger` as the destination of records emitted through the [`log`] facade.
///
/// Records are bridged via `slog-stdlog` and `slog-scope` into the `slog::Drain`
/// implementation of [`Logger`].
///
/// [`log`]: https://docs.rs/log
/// [`Logger`]: ./struct.Logger.html
pub fn set_stdlog_logger(logger: Arc<Logger>) -> Result<()> {
    let root = slog::Logger::root(logger, o!());
    slog_scope::set_global_logger(root).cancel_reset();
    track!(slog_stdlog::init().map_err(|e| ErrorKind::Other.cause(e)))
}

/// Prints the raw error text to the standard error and exits with status `1`.
pub fn exit_with_error(e: &dyn fmt::Display) -> ! {
    let _ = io::stderr().write_all(e.to_string().as_bytes());
    process::exit(1)
}

/// Returns the base name of the running program, as invoked.
pub fn program_name() -> String {
    env::args_os()
        .next()
        .as_ref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned())
}

/// Formats the current local time as `YYYY/MM/DD HH:MM:SS`.
pub fn local_timestamp() -> String {
    Local::now().format("%Y/%m/%d %H:%M:%S").to_string()
}

/// Formats the current local time as an RFC 3339 timestamp (second precision).
pub fn rfc3339_timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(unix)]
pub fn hostname() -> String {
    let mut buf = [0u8; 256];
    let ret = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
    if ret != 0 {
        return "localhost".to_owned();
    }
    let len = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());
    if len == 0 {
        "localhost".to_owned()
    } else {
        String::from_utf8_lossy(&buf[..len]).into_owned()
    }
}

#[cfg(not(unix))]
pub fn hostname() -> String {
    env::var("COMPUTERNAME").unwrap_or_else(|_| "localhost".to_owned())
}
