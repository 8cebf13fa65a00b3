// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-thread recursion guard for breadcrumb recording.
//!
//! Held while a hook records a breadcrumb, including while the user's
//! `before_breadcrumb` callback runs. Instrumented calls made on the same
//! thread in that window pass through unrecorded.

use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static RECORDING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as recording until dropped.
///
/// `!Send`: it must be released on the thread that took it.
pub(crate) struct ReentrancyGuard {
    _not_send: PhantomData<*const ()>,
}

impl ReentrancyGuard {
    /// Take the guard, or `None` when this thread already holds it.
    pub(crate) fn try_enter() -> Option<Self> {
        RECORDING.with(|flag| {
            if flag.get() {
                None
            } else {
                flag.set(true);
                Some(Self { _not_send: PhantomData })
            }
        })
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        RECORDING.with(|flag| flag.set(false));
    }
}

/// True while the current thread is inside a recording section.
pub(crate) fn is_recording() -> bool {
    RECORDING.with(Cell::get)
}

#[cfg(test)]
#[path = "reentrancy_tests.rs"]
mod tests;
