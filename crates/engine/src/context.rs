// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution contexts.
//!
//! An [`ExecutionContext`] is the unit of isolation: one per request, task
//! or thread. It owns a breadcrumb store, a LIFO scope stack and the ambient
//! values (user, tags, extra) that captured events carry. Contexts are plain
//! owned values passed through call chains as `&mut ExecutionContext`; a
//! child task gets its own copy via [`ExecutionContext::fork`].
//!
//! Nothing here returns an error. Misuse (exiting a closed scope, or a scope
//! owned by another context) is logged at `debug` and ignored.

use falcon_core::time_fmt::duration_ms;
use falcon_core::{Breadcrumb, BreadcrumbStore, Clock, DataMap, ErrorInfo, Scope, ScopeId, SystemClock, User};
use futures_util::future::BoxFuture;
use indexmap::IndexMap;
use std::sync::Arc;
use std::time::Instant;

use crate::config::BeforeBreadcrumb;
use crate::reentrancy::ReentrancyGuard;
use crate::scope_guard::ScopeGuard;

falcon_core::define_id! {
    /// Identifies one execution context. Forks get a fresh id.
    pub struct ContextId;
}

/// Returned by [`ExecutionContext::enter_scope`]; names the frame to exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeHandle {
    context: ContextId,
    depth: usize,
    scope: ScopeId,
}

impl ScopeHandle {
    pub fn scope_id(&self) -> ScopeId {
        self.scope
    }

    /// Stack depth of the frame, 0 for the outermost owned scope.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Ambient values merged into the context by [`ExecutionContext::set_context`].
#[derive(Debug, Clone, Default)]
pub struct ContextUpdate {
    pub user: Option<User>,
    pub tags: IndexMap<String, String>,
    pub extra: DataMap,
}

struct Frame {
    scope: Scope,
    started: Instant,
}

/// Where the most recent unhandled error surfaced.
///
/// Valid only while nothing but the exits of `scopes` has been recorded
/// since; `sequence` is the last breadcrumb that still belongs to it.
struct ErrorOrigin {
    error: ErrorInfo,
    breadcrumbs: Vec<Breadcrumb>,
    scopes: Vec<Scope>,
    sequence: u64,
}

impl ErrorOrigin {
    fn encloses(&self, scope: ScopeId) -> bool {
        self.scopes.iter().any(|s| s.id == scope)
    }
}

fn same_error(a: &ErrorInfo, b: &ErrorInfo) -> bool {
    a.error_type == b.error_type && a.message == b.message
}

pub struct ExecutionContext {
    id: ContextId,
    clock: Arc<dyn Clock>,
    before_breadcrumb: Option<BeforeBreadcrumb>,
    store: BreadcrumbStore,
    sequence: u64,
    frames: Vec<Frame>,
    /// Open scopes of the parent at fork time, outermost first. Read-only.
    inherited: Vec<Scope>,
    user: Option<User>,
    tags: IndexMap<String, String>,
    extra: DataMap,
    error_origin: Option<ErrorOrigin>,
}

impl ExecutionContext {
    /// Standalone context on the system clock.
    pub fn new(max_breadcrumbs: usize) -> Self {
        Self::with_clock(max_breadcrumbs, Arc::new(SystemClock))
    }

    pub fn with_clock(max_breadcrumbs: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            id: ContextId::new(),
            clock,
            before_breadcrumb: None,
            store: BreadcrumbStore::new(max_breadcrumbs),
            sequence: 0,
            frames: Vec::new(),
            inherited: Vec::new(),
            user: None,
            tags: IndexMap::new(),
            extra: DataMap::new(),
            error_origin: None,
        }
    }

    pub(crate) fn with_before_breadcrumb(mut self, callback: Option<BeforeBreadcrumb>) -> Self {
        self.before_breadcrumb = callback;
        self
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn store(&self) -> &BreadcrumbStore {
        &self.store
    }

    /// Owned copy of the breadcrumb trail, oldest first.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.store.snapshot()
    }

    /// Number of open scopes this context owns (inherited ones excluded).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Open scopes, innermost first: owned frames, then inherited ancestors.
    pub fn scope_chain(&self) -> Vec<Scope> {
        self.frames
            .iter()
            .rev()
            .map(|f| f.scope.clone())
            .chain(self.inherited.iter().rev().cloned())
            .collect()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn tags(&self) -> &IndexMap<String, String> {
        &self.tags
    }

    pub fn extra(&self) -> &DataMap {
        &self.extra
    }

    // ── Ambient values ──────────────────────────────────────────────────

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn clear_user(&mut self) {
        self.user = None;
    }

    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.extra.insert(key.into(), value.into());
    }

    /// Merge an update: a given user replaces the current one, tags and
    /// extra are merged key by key.
    pub fn set_context(&mut self, update: ContextUpdate) {
        if let Some(user) = update.user {
            self.user = Some(user);
        }
        self.tags.extend(update.tags);
        self.extra.extend(update.extra);
    }

    // ── Breadcrumbs ─────────────────────────────────────────────────────

    /// Record a breadcrumb, stamping its timestamp and sequence.
    pub fn add_breadcrumb(&mut self, breadcrumb: Breadcrumb) {
        let breadcrumb = match &self.before_breadcrumb {
            Some(callback) => {
                // No-op when a hook already holds the guard.
                let _guard = ReentrancyGuard::try_enter();
                match callback(breadcrumb) {
                    Some(b) => b,
                    None => {
                        tracing::trace!("breadcrumb dropped by before_breadcrumb");
                        return;
                    }
                }
            }
            None => breadcrumb,
        };
        self.sequence += 1;
        let stamped = breadcrumb.stamped(self.clock.utc_now(), self.sequence);
        self.store.append(stamped);
    }

    // ── Scopes ──────────────────────────────────────────────────────────

    pub fn enter_scope(&mut self, name: &str, category: &str, data: DataMap) -> ScopeHandle {
        let parent = match self.frames.last() {
            Some(frame) => Some(frame.scope.id),
            None => self.inherited.last().map(|s| s.id),
        };
        let scope = Scope {
            id: ScopeId::next(),
            name: name.to_string(),
            category: category.to_string(),
            data,
            entered_at: self.clock.utc_now(),
            parent,
        };
        let handle = ScopeHandle { context: self.id, depth: self.frames.len(), scope: scope.id };
        self.frames.push(Frame { scope, started: self.clock.now() });
        handle
    }

    /// Exit the scope named by `handle`, force-closing any scopes entered
    /// after it that are still open.
    pub fn exit_scope(&mut self, handle: ScopeHandle, error: Option<&ErrorInfo>) {
        if let Some(frame) = self.pop_to(handle) {
            let scope = frame.scope.clone();
            self.close_frame(frame, error, false);
            self.note_error(scope, error);
        }
    }

    /// Exit the scope named by `handle` as abandoned, e.g. when the task
    /// running it was cancelled.
    pub fn abandon_scope(&mut self, handle: ScopeHandle) {
        if let Some(frame) = self.pop_to(handle) {
            self.close_frame(frame, None, true);
        }
    }

    /// Force-close every owned scope, innermost first.
    pub fn close_all(&mut self) {
        while let Some(frame) = self.frames.pop() {
            self.close_frame(frame, None, true);
        }
    }

    /// Force-close every owned scope, innermost first, recording `error`
    /// on each exit as it propagates outwards.
    pub fn close_all_with_error(&mut self, error: &ErrorInfo) {
        while let Some(frame) = self.frames.pop() {
            let scope = frame.scope.clone();
            self.close_frame(frame, Some(error), true);
            self.note_error(scope, Some(error));
        }
    }

    /// Validate `handle`, force-close everything above it and pop its frame.
    fn pop_to(&mut self, handle: ScopeHandle) -> Option<Frame> {
        if handle.context != self.id {
            tracing::debug!(
                scope = %handle.scope,
                context = %self.id.short(8),
                "ignoring exit of a scope owned by another context"
            );
            return None;
        }
        let open = self.frames.get(handle.depth).is_some_and(|f| f.scope.id == handle.scope);
        if !open {
            tracing::debug!(scope = %handle.scope, "scope already closed");
            return None;
        }

        while self.frames.len() > handle.depth + 1 {
            if let Some(frame) = self.frames.pop() {
                tracing::debug!(scope = %frame.scope.name, "force-closing abandoned scope");
                self.close_frame(frame, None, true);
            }
        }
        self.frames.pop()
    }

    /// Enter a scope released when the returned guard drops.
    pub fn scope(&mut self, name: &str, category: &str) -> ScopeGuard<'_> {
        self.scope_with_data(name, category, DataMap::new())
    }

    pub fn scope_with_data(&mut self, name: &str, category: &str, data: DataMap) -> ScopeGuard<'_> {
        let handle = self.enter_scope(name, category, data);
        ScopeGuard::new(self, handle)
    }

    /// Run `f` inside a scope; an `Err` is recorded on the exit breadcrumb
    /// and returned unchanged.
    pub fn in_scope<T, E, F>(&mut self, name: &str, category: &str, f: F) -> Result<T, E>
    where
        E: std::error::Error,
        F: FnOnce(&mut ExecutionContext) -> Result<T, E>,
    {
        let mut guard = self.scope(name, category);
        let result = f(&mut *guard);
        guard.finish(&result);
        result
    }

    /// Async form of [`in_scope`](Self::in_scope). Dropping the returned
    /// future before completion exits the scope as abandoned.
    pub async fn in_scope_async<T, E, F>(&mut self, name: &str, category: &str, f: F) -> Result<T, E>
    where
        E: std::error::Error,
        F: for<'c> FnOnce(&'c mut ExecutionContext) -> BoxFuture<'c, Result<T, E>>,
    {
        let mut guard = self.scope(name, category);
        guard.abandon_on_drop();
        let result = f(&mut *guard).await;
        guard.finish(&result);
        result
    }

    /// Copy this context for a child task.
    ///
    /// The child starts with a copy of the breadcrumb trail and ambient
    /// values. The parent's open scopes become the child's read-only
    /// ancestors. Nothing is shared afterwards.
    pub fn fork(&self) -> Self {
        let mut inherited = self.inherited.clone();
        inherited.extend(self.frames.iter().map(|f| f.scope.clone()));
        Self {
            id: ContextId::new(),
            clock: Arc::clone(&self.clock),
            before_breadcrumb: self.before_breadcrumb.clone(),
            store: self.store.clone(),
            sequence: self.sequence,
            frames: Vec::new(),
            inherited,
            user: self.user.clone(),
            tags: self.tags.clone(),
            extra: self.extra.clone(),
            error_origin: None,
        }
    }

    /// Breadcrumbs and scope chain to report for `error`.
    pub(crate) fn diagnostics(&self, error: &ErrorInfo) -> (Vec<Breadcrumb>, Vec<Scope>) {
        match &self.error_origin {
            Some(origin) if origin.sequence == self.sequence && same_error(&origin.error, error) => {
                (origin.breadcrumbs.clone(), origin.scopes.clone())
            }
            _ => (self.store.snapshot(), self.scope_chain()),
        }
    }

    fn close_frame(&mut self, frame: Frame, error: Option<&ErrorInfo>, abandoned: bool) {
        let elapsed = self.clock.now().saturating_duration_since(frame.started);
        let scope_id = frame.scope.id;
        let mut crumb = Breadcrumb::custom(format!("exit: {}", frame.scope.name))
            .category(frame.scope.category)
            .data(frame.scope.data)
            .with("duration_ms", duration_ms(elapsed));
        if let Some(err) = error {
            crumb = crumb
                .with("error_type", err.error_type.clone())
                .with("error_message", err.message.clone());
        }
        if abandoned {
            crumb = crumb.with("abandoned", true);
        }
        let before = self.sequence;
        self.add_breadcrumb(crumb);

        // Exits of the scopes enclosing the origin keep it current.
        if let Some(origin) = &mut self.error_origin {
            if origin.sequence == before && origin.encloses(scope_id) {
                origin.sequence = self.sequence;
            }
        }
    }

    fn note_error(&mut self, exited: Scope, error: Option<&ErrorInfo>) {
        let Some(error) = error else {
            self.error_origin = None;
            return;
        };
        let propagating = self.error_origin.as_ref().is_some_and(|o| {
            o.sequence == self.sequence && o.encloses(exited.id) && same_error(&o.error, error)
        });
        if propagating {
            return;
        }
        let mut scopes = vec![exited];
        scopes.extend(self.scope_chain());
        self.error_origin = Some(ErrorOrigin {
            error: error.clone(),
            breadcrumbs: self.store.snapshot(),
            scopes,
            sequence: self.sequence,
        });
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("id", &self.id)
            .field("breadcrumbs", &self.store.len())
            .field("depth", &self.frames.len())
            .field("inherited", &self.inherited.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
