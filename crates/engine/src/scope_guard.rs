// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped acquisition with guaranteed release.

use falcon_core::ErrorInfo;
use std::ops::{Deref, DerefMut};

use crate::context::{ExecutionContext, ScopeHandle};

/// An open scope that exits when dropped.
///
/// Dereferences to the owning context, so work inside the scope goes
/// through the guard. Dropping it exits normally, or with a `panic` error
/// while unwinding. A guard marked with [`abandon_on_drop`](Self::abandon_on_drop)
/// exits as abandoned instead, which is how a cancelled future is recorded.
#[must_use = "the scope exits as soon as the guard is dropped"]
pub struct ScopeGuard<'a> {
    ctx: &'a mut ExecutionContext,
    handle: ScopeHandle,
    closed: bool,
    abandon_on_drop: bool,
}

impl<'a> ScopeGuard<'a> {
    pub(crate) fn new(ctx: &'a mut ExecutionContext, handle: ScopeHandle) -> Self {
        Self { ctx, handle, closed: false, abandon_on_drop: false }
    }

    pub fn handle(&self) -> ScopeHandle {
        self.handle
    }

    /// Record a later drop without `exit`/`fail`/`finish` as abandoned.
    pub fn abandon_on_drop(&mut self) {
        self.abandon_on_drop = true;
    }

    pub fn exit(mut self) {
        self.close(None);
    }

    /// Exit recording `err` on the exit breadcrumb.
    pub fn fail<E: std::error::Error + ?Sized>(mut self, err: &E) {
        let info = ErrorInfo::from_error(err);
        self.close(Some(&info));
    }

    pub fn fail_with(mut self, info: &ErrorInfo) {
        self.close(Some(info));
    }

    /// Exit with the error of `result`, if any.
    pub fn finish<T, E: std::error::Error>(self, result: &Result<T, E>) {
        match result {
            Ok(_) => self.exit(),
            Err(e) => self.fail(e),
        }
    }

    fn close(&mut self, error: Option<&ErrorInfo>) {
        if !self.closed {
            self.closed = true;
            self.ctx.exit_scope(self.handle, error);
        }
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = ExecutionContext;

    fn deref(&self) -> &ExecutionContext {
        &*self.ctx
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut ExecutionContext {
        &mut *self.ctx
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let info = ErrorInfo::new("panic", "scope exited while unwinding");
            self.close(Some(&info));
        } else if self.abandon_on_drop && !self.closed {
            self.closed = true;
            self.ctx.abandon_scope(self.handle);
        } else {
            self.close(None);
        }
    }
}

#[cfg(test)]
#[path = "scope_guard_tests.rs"]
mod tests;
