//! Test stand-ins for `openlog`, `syslog` and `closelog`.
//!
//! Calls are recorded as [`Event`]s instead of reaching the system logger.
//! `syslog` is declared with a fixed `(priority, "%s", message)` argument
//! list, which is the only form local targets use.

use libc::{c_char, c_int};
use once_cell::sync::Lazy;
use std::ffi::CStr;
use std::mem;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Open {
        ident: String,
        option: c_int,
        facility: c_int,
    },
    Log {
        priority: c_int,
        format: String,
        message: String,
    },
    Close,

    /// A local target gave up its tag.
    IdentReleased(String),
}

static EVENTS: Lazy<Mutex<Vec<Event>>> = Lazy::new(Default::default);
static SERIAL: Lazy<Mutex<()>> = Lazy::new(Default::default);

fn lock<T>(m: &Mutex<T>) -> MutexGuard<T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs `f` and returns what it produced along with the events it recorded.
///
/// Calls are serialized, since the recorded events are process-global.
pub fn record<T>(f: impl FnOnce() -> T) -> (T, Vec<Event>) {
    let _serial = lock(&SERIAL);
    mem::take(&mut *lock(&EVENTS));
    let result = catch_unwind(AssertUnwindSafe(f));
    let events = mem::take(&mut *lock(&EVENTS));
    match result {
        Ok(value) => (value, events),
        Err(payload) => resume_unwind(payload),
    }
}

pub fn record_event(event: Event) {
    lock(&EVENTS).push(event);
}

pub unsafe extern "C" fn openlog(ident: *const c_char, option: c_int, facility: c_int) {
    record_event(Event::Open {
        ident: lossy(ident),
        option,
        facility,
    });
}

pub unsafe extern "C" fn syslog(priority: c_int, format: *const c_char, message: *const c_char) {
    record_event(Event::Log {
        priority,
        format: lossy(format),
        message: lossy(message),
    });
}

pub unsafe extern "C" fn closelog() {
    record_event(Event::Close);
}

unsafe fn lossy(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}
