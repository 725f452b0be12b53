use super::Facility;
use libc::{c_char, c_int};
use once_cell::sync::Lazy;
use std::ffi::{CStr, CString};
use std::ptr;
use std::sync::{Mutex, PoisonError};

#[cfg(test)]
use super::mock::{self, closelog, openlog, syslog};
#[cfg(not(test))]
use libc::{closelog, openlog, syslog};

/// The address of the `ident` string most recently passed to `openlog` by this crate.
///
/// `openlog` may keep the pointer it receives instead of copying the string,
/// so an `ident` can only be freed once `closelog` has been called or another
/// `ident` has replaced it. `openlog` and `closelog` are only called while
/// holding this mutex. The address is stored as a `usize` and never dereferenced.
#[allow(clippy::mutex_atomic)]
static LAST_IDENT: Lazy<Mutex<usize>> = Lazy::new(|| Mutex::new(ptr::null::<c_char>() as usize));

/// A connection to the local syslog daemon through the POSIX API.
pub(super) struct LocalSyslog {
    /// `None` once closed.
    ident: Option<Box<CStr>>,
}
impl LocalSyslog {
    pub fn open(ident: &str, facility: Facility) -> Self {
        let ident = to_cstring_lossy(ident.to_owned()).into_boxed_c_str();
        let facility = c_int::from(facility.code()) << 3;
        {
            let mut last_ident = LAST_IDENT.lock().unwrap_or_else(PoisonError::into_inner);
            unsafe {
                openlog(ident.as_ptr(), libc::LOG_PID, facility);
            }
            *last_ident = ident.as_ptr() as usize;
        }
        LocalSyslog { ident: Some(ident) }
    }

    pub fn send(&self, severity: c_int, message: &str) {
        if self.ident.is_none() {
            return;
        }
        let message = to_cstring_lossy(message.to_owned());
        unsafe {
            syslog(
                severity,
                CStr::from_bytes_with_nul_unchecked(b"%s\0").as_ptr(),
                message.as_ptr(),
            );
        }
    }

    pub fn close(&mut self) {
        let my_ident = match self.ident.take() {
            Some(ident) => ident,
            None => return,
        };
        let mut last_ident = match LAST_IDENT.lock() {
            Ok(locked) => locked,
            Err(_) => {
                // The recorded address may be stale. Leak the string.
                Box::leak(my_ident);
                return;
            }
        };
        if my_ident.as_ptr() as usize == *last_ident {
            unsafe {
                closelog();
            }
            *last_ident = ptr::null::<c_char>() as usize;
        }

        #[cfg(test)]
        mock::record_event(mock::Event::IdentReleased(String::from(
            my_ident.to_string_lossy(),
        )));
    }
}
impl Drop for LocalSyslog {
    fn drop(&mut self) {
        self.close();
    }
}

/// Converts a `String` to a `CString`, stripping interior null bytes.
fn to_cstring_lossy(s: String) -> CString {
    let mut s: Vec<u8> = s.into();
    s.retain(|b| *b != 0);

    // All null bytes were just stripped.
    unsafe { CString::from_vec_unchecked(s) }
}
