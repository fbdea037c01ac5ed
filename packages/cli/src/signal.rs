//! Ctrl-C handling while a copy is running.
//!
//! The handler only records the interrupt. The main thread polls
//! [`interrupted`] and cancels the copy, so the partial destination is
//! removed before the process exits.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn on_interrupt(_signal: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Route SIGINT to the interrupt flag.
#[cfg(unix)]
pub fn install_interrupt_handler() {
    INTERRUPTED.store(false, Ordering::SeqCst);
    let handler: extern "C" fn(libc::c_int) = on_interrupt;
    // SAFETY: the handler only stores to an atomic, which is async-signal-safe
    unsafe {
        libc::signal(libc::SIGINT, handler as libc::sighandler_t);
    }
}

/// Give SIGINT its default behavior back.
#[cfg(unix)]
pub fn restore_default_handler() {
    // SAFETY: resetting to SIG_DFL has no preconditions
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_DFL);
    }
}

/// Ctrl-C terminates the process directly on this platform.
#[cfg(not(unix))]
pub fn install_interrupt_handler() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

#[cfg(not(unix))]
pub const fn restore_default_handler() {}

/// Whether SIGINT arrived since the handler was installed.
#[must_use]
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}
