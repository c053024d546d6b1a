//! One-shot start gate shared by all workers.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use parking_lot::{Condvar, Mutex};

/// A gate that blocks waiters until it is opened once.
///
/// Opening is permanent; waiters arriving after the gate is open pass
/// straight through.
#[derive(Debug, Default)]
pub struct StartGate {
    open: Mutex<bool>,
    cvar: Condvar,
}

impl StartGate {
    /// Open the gate and wake every waiter.
    pub fn open(&self) {
        let mut open = self.open.lock();
        *open = true;
        self.cvar.notify_all();
    }

    /// Block until the gate has been opened.
    pub fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.cvar.wait(&mut open);
        }
    }

    /// Whether the gate has been opened.
    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.open.lock()
    }
}
