// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron heartbeats.
//!
//! A heartbeat is one status report for a scheduled job. It shares the
//! delivery queue with captured events but nothing else: no state survives
//! between heartbeats.

use falcon_core::time_fmt::duration_ms;
use falcon_core::{CronHeartbeat, DataMap, Envelope, HeartbeatStatus};
use std::fmt::Display;
use std::future::Future;
use std::time::Instant;
use tokio::sync::oneshot;

use crate::client::Client;
use crate::queue::QueueItem;

impl Client {
    /// Queue a heartbeat for `slug`. Never blocks.
    pub fn heartbeat(
        &self,
        slug: &str,
        status: HeartbeatStatus,
        duration_ms: Option<u64>,
        metadata: DataMap,
    ) {
        if let Some(hb) = self.build_heartbeat(slug, status, duration_ms, metadata) {
            self.enqueue(QueueItem::new(Envelope::Heartbeat(hb)));
        }
    }

    /// Queue a heartbeat and wait for the worker's verdict: `true` once
    /// delivered, `false` if it failed or was dropped.
    pub async fn heartbeat_async(
        &self,
        slug: &str,
        status: HeartbeatStatus,
        duration_ms: Option<u64>,
        metadata: DataMap,
    ) -> bool {
        let Some(hb) = self.build_heartbeat(slug, status, duration_ms, metadata) else {
            return false;
        };
        let (tx, rx) = oneshot::channel();
        self.enqueue(QueueItem::with_ack(Envelope::Heartbeat(hb), tx));
        rx.await.unwrap_or(false)
    }

    pub fn cron_job(&self, slug: impl Into<String>) -> CronJob {
        CronJob::new(self.clone(), slug)
    }

    fn build_heartbeat(
        &self,
        slug: &str,
        status: HeartbeatStatus,
        duration_ms: Option<u64>,
        metadata: DataMap,
    ) -> Option<CronHeartbeat> {
        let slug = slug.trim();
        if slug.is_empty() {
            tracing::warn!("heartbeat without a job slug, dropping");
            return None;
        }
        tracing::debug!(slug, %status, ?duration_ms, "heartbeat queued");
        Some(CronHeartbeat {
            job_slug: slug.to_string(),
            status,
            duration_ms,
            metadata,
            app_name: self.options().app_name.clone(),
            environment: self.options().environment.clone(),
            sent_at: self.clock().utc_now(),
        })
    }
}

/// A monitored job: times a body and reports its outcome.
///
/// The higher-order forms ([`run`](Self::run), [`run_async`](Self::run_async),
/// [`wrap`](Self::wrap)) return the body's result unchanged after reporting.
#[derive(Clone)]
pub struct CronJob {
    client: Client,
    slug: String,
    metadata: DataMap,
}

impl CronJob {
    pub fn new(client: Client, slug: impl Into<String>) -> Self {
        Self { client, slug: slug.into(), metadata: DataMap::new() }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Metadata attached to every heartbeat of this job.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn run<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        let started = self.client.clock().now();
        let result = f();
        self.report(started, result.as_ref().err().map(|e| e.to_string()));
        result
    }

    pub async fn run_async<T, E, Fut>(&self, fut: Fut) -> Result<T, E>
    where
        E: Display,
        Fut: Future<Output = Result<T, E>>,
    {
        let started = self.client.clock().now();
        let result = fut.await;
        self.report(started, result.as_ref().err().map(|e| e.to_string()));
        result
    }

    /// Turn `f` into a callable that reports on every invocation.
    pub fn wrap<T, E, F>(self, f: F) -> impl Fn() -> Result<T, E>
    where
        E: Display,
        F: Fn() -> Result<T, E>,
    {
        move || self.run(&f)
    }

    /// Start a guarded run; see [`CronGuard`].
    pub fn start(&self) -> CronGuard {
        CronGuard {
            client: self.client.clone(),
            slug: self.slug.clone(),
            started: self.client.clock().now(),
            metadata: self.metadata.clone(),
            done: false,
        }
    }

    fn report(&self, started: Instant, error: Option<String>) {
        let elapsed = duration_ms(self.client.clock().now().saturating_duration_since(started));
        let mut metadata = self.metadata.clone();
        let status = match error {
            None => HeartbeatStatus::Ok,
            Some(message) => {
                metadata.insert("error".to_string(), message.into());
                HeartbeatStatus::Error
            }
        };
        self.client.heartbeat(&self.slug, status, Some(elapsed), metadata);
    }
}

/// An in-progress job run that reports when finished.
///
/// [`finish`](Self::finish) sends `ok`; [`fail`](Self::fail) sends `error`.
/// Dropping the guard without either sends `error` with
/// `metadata.error = "abandoned"`, or `"panicked"` while unwinding.
pub struct CronGuard {
    client: Client,
    slug: String,
    started: Instant,
    pub metadata: DataMap,
    done: bool,
}

impl CronGuard {
    pub fn finish(mut self) {
        self.send(HeartbeatStatus::Ok, None);
    }

    pub fn fail<E: Display + ?Sized>(mut self, err: &E) {
        self.send(HeartbeatStatus::Error, Some(err.to_string()));
    }

    fn send(&mut self, status: HeartbeatStatus, error: Option<String>) {
        if self.done {
            return;
        }
        self.done = true;
        let elapsed = duration_ms(self.client.clock().now().saturating_duration_since(self.started));
        let mut metadata = std::mem::take(&mut self.metadata);
        if let Some(message) = error {
            metadata.insert("error".to_string(), message.into());
        }
        self.client.heartbeat(&self.slug, status, Some(elapsed), metadata);
    }
}

impl Drop for CronGuard {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let reason = if std::thread::panicking() { "panicked" } else { "abandoned" };
        self.send(HeartbeatStatus::Error, Some(reason.to_string()));
    }
}

#[cfg(test)]
#[path = "cron_tests.rs"]
mod tests;
