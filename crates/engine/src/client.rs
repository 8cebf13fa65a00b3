// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The capture client.
//!
//! A [`Client`] owns the delivery queue, its worker and the hook table. It
//! is cheap to clone and every clone talks to the same queue. [`init`]
//! registers one client as the process-wide instance; [`Client::new`]
//! builds an unregistered one.

use falcon_adapters::{HttpTransport, Transport, DEFAULT_TIMEOUT};
use falcon_core::{
    Breadcrumb, CapturedEvent, Clock, DataMap, Envelope, ErrorInfo, EventId, EventParts, SystemClock,
};
use futures_util::future::BoxFuture;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::config::ClientOptions;
use crate::context::ExecutionContext;
use crate::error::ClientError;
use crate::instrument::Instrumentation;
use crate::queue::{DeliveryQueue, QueueItem};
use crate::worker::Worker;

static GLOBAL: OnceLock<Client> = OnceLock::new();

/// Initialize the process-wide client. Only the first call succeeds; later
/// calls return [`ClientError::AlreadyInitialized`].
pub fn init(options: ClientOptions, transport: impl Transport) -> Result<Client, ClientError> {
    if GLOBAL.get().is_some() {
        return Err(ClientError::AlreadyInitialized);
    }
    let client = Client::new(options, transport)?;
    GLOBAL.set(client.clone()).map_err(|_| ClientError::AlreadyInitialized)?;
    tracing::debug!(app = %client.options().app_name, "falcon initialized");
    Ok(client)
}

/// The client registered by [`init`], if any.
pub fn global() -> Option<&'static Client> {
    GLOBAL.get()
}

/// Call-site values merged over the context's ambient tags and extra.
#[derive(Debug, Clone, Default)]
pub struct CaptureOptions {
    pub tags: IndexMap<String, String>,
    pub extra: DataMap,
}

impl CaptureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Minimal description of an inbound request for [`Client::handle_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub method: String,
    pub path: String,
}

impl RequestInfo {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self { method: method.into(), path: path.into() }
    }
}

struct ClientInner {
    options: ClientOptions,
    clock: Arc<dyn Clock>,
    instrumentation: Instrumentation,
    queue: Arc<DeliveryQueue>,
    worker: Mutex<Option<Worker>>,
}

impl Drop for ClientInner {
    fn drop(&mut self) {
        // Let the worker drain what is queued, then exit.
        self.queue.close();
    }
}

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    pub fn new(options: ClientOptions, transport: impl Transport) -> Result<Self, ClientError> {
        Self::with_clock(options, transport, Arc::new(SystemClock))
    }

    /// Client delivering over HTTPS to `options.api_url`.
    pub fn with_http(options: ClientOptions) -> Result<Self, ClientError> {
        options.validate()?;
        let transport = HttpTransport::new(&options.api_url, &options.api_key, DEFAULT_TIMEOUT)?;
        Self::new(options, transport)
    }

    pub fn with_clock(
        options: ClientOptions,
        transport: impl Transport,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ClientError> {
        options.validate()?;
        let queue = Arc::new(DeliveryQueue::new(options.queue_capacity));
        let worker = Worker::spawn(Arc::clone(&queue), Arc::new(transport), options.debug)
            .map_err(ClientError::Worker)?;
        tracing::debug!(
            app = %options.app_name,
            environment = %options.environment,
            queue_capacity = options.queue_capacity,
            "falcon client started"
        );
        Ok(Self {
            inner: Arc::new(ClientInner {
                options,
                clock,
                instrumentation: Instrumentation::new(),
                queue,
                worker: Mutex::new(Some(worker)),
            }),
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.inner.options
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.inner.clock
    }

    /// Hook table shared by every wrapper this client builds.
    pub fn instrumentation(&self) -> &Instrumentation {
        &self.inner.instrumentation
    }

    /// Fresh execution context using this client's clock, breadcrumb
    /// capacity and `before_breadcrumb` callback.
    pub fn context(&self) -> ExecutionContext {
        let options = &self.inner.options;
        ExecutionContext::with_clock(options.max_breadcrumbs, Arc::clone(&self.inner.clock))
            .with_before_breadcrumb(options.before_breadcrumb.clone())
    }

    /// Snapshot `error` with the context's diagnostic state and queue it for
    /// delivery. Returns immediately; delivery problems are only logged.
    pub fn capture_exception<E>(&self, ctx: &ExecutionContext, error: &E, options: CaptureOptions) -> EventId
    where
        E: std::error::Error + ?Sized,
    {
        self.capture_error_info(ctx, ErrorInfo::from_error(error), options)
    }

    /// Capture an error that is not a `std::error::Error` value.
    pub fn capture_error_info(
        &self,
        ctx: &ExecutionContext,
        error: ErrorInfo,
        options: CaptureOptions,
    ) -> EventId {
        let error = if self.inner.options.attach_backtrace { error.with_backtrace() } else { error };
        let (breadcrumbs, scopes) = ctx.diagnostics(&error);

        let mut tags = ctx.tags().clone();
        tags.extend(options.tags);
        let mut extra = ctx.extra().clone();
        extra.extend(options.extra);

        let event = CapturedEvent::new(EventParts {
            error,
            breadcrumbs,
            scopes,
            user: ctx.user().cloned(),
            tags,
            extra,
            app_name: self.inner.options.app_name.clone(),
            environment: self.inner.options.environment.clone(),
            captured_at: self.inner.clock.utc_now(),
        });
        let event_id = event.event_id();
        tracing::debug!(
            event_id = %event_id.short(8),
            error_type = event.error_type(),
            breadcrumbs = event.breadcrumbs().len(),
            "event captured"
        );
        self.enqueue(QueueItem::new(Envelope::Event(event)));
        event_id
    }

    /// Capture a plain message as an event of type `Message`.
    pub fn capture_message(&self, ctx: &ExecutionContext, message: &str, options: CaptureOptions) -> EventId {
        self.capture_error_info(ctx, ErrorInfo::new("Message", message), options)
    }

    /// Run `body` as one request: a fresh context tagged with the method and
    /// path, starting with a navigation breadcrumb. An `Err` is recorded on
    /// any scopes left open, captured with the request tags and returned
    /// unchanged.
    pub async fn handle_request<T, E, F>(&self, request: RequestInfo, body: F) -> Result<T, E>
    where
        E: std::error::Error,
        F: for<'c> FnOnce(&'c mut ExecutionContext) -> BoxFuture<'c, Result<T, E>>,
    {
        let mut ctx = self.context();
        ctx.set_tag("http.method", request.method.clone());
        ctx.set_tag("http.path", request.path.clone());
        ctx.add_breadcrumb(
            Breadcrumb::navigation(format!("{} {}", request.method, request.path)).category("request"),
        );

        let result = body(&mut ctx).await;
        match &result {
            Ok(_) => ctx.close_all(),
            Err(e) => {
                let info = ErrorInfo::from_error(e);
                ctx.close_all_with_error(&info);
                self.capture_error_info(&ctx, info, CaptureOptions::default());
            }
        }
        result
    }

    /// Block until every queued payload has been attempted. Returns `false`
    /// if `timeout` expired first.
    pub fn flush(&self, timeout: Duration) -> bool {
        let flushed = self.inner.queue.wait_idle(timeout);
        if !flushed {
            tracing::debug!(pending = self.inner.queue.len(), "flush timed out");
        }
        flushed
    }

    /// Flush, then stop the delivery worker. Later captures are dropped.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        let flushed = self.flush(timeout);
        self.inner.queue.close();
        if let Some(worker) = self.inner.worker.lock().take() {
            worker.stop(flushed);
        }
        tracing::debug!(flushed, dropped = self.inner.queue.dropped(), "falcon client shut down");
        flushed
    }

    /// Payloads waiting for the worker.
    pub fn pending(&self) -> usize {
        self.inner.queue.len()
    }

    /// Payloads dropped for overflow or after shutdown.
    pub fn dropped(&self) -> u64 {
        self.inner.queue.dropped()
    }

    pub(crate) fn enqueue(&self, item: QueueItem) {
        self.inner.queue.push(item);
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("options", &self.inner.options)
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
