// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background delivery worker.
//!
//! Runs on its own OS thread with a current-thread tokio runtime, so hosts
//! without a runtime (or with a blocked one) still get their events out.

use falcon_adapters::Transport;
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::queue::{DeliveryQueue, QueueItem};

pub(crate) struct Worker {
    thread: Option<JoinHandle<()>>,
    cancel: CancellationToken,
}

impl Worker {
    pub(crate) fn spawn(
        queue: Arc<DeliveryQueue>,
        transport: Arc<dyn Transport>,
        debug: bool,
    ) -> std::io::Result<Self> {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let thread = std::thread::Builder::new().name("falcon-delivery".to_string()).spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to start delivery runtime, payloads will be dropped");
                    queue.close();
                    queue.discard();
                    return;
                }
            };
            runtime.block_on(run(queue, transport, token, debug));
        })?;
        Ok(Self { thread: Some(thread), cancel })
    }

    /// Stop the worker, discarding anything still queued. Joins the thread
    /// only when `join` is set; a worker stuck in a slow send is left to
    /// finish on its own.
    ///
    /// A worker dropped without `stop` keeps draining until the queue is
    /// closed.
    pub(crate) fn stop(mut self, join: bool) {
        self.cancel.cancel();
        if let Some(thread) = self.thread.take() {
            if join && thread.join().is_err() {
                tracing::warn!("delivery worker panicked");
            }
        }
    }
}

async fn run(
    queue: Arc<DeliveryQueue>,
    transport: Arc<dyn Transport>,
    cancel: CancellationToken,
    debug: bool,
) {
    tracing::debug!("delivery worker started");
    loop {
        while let Some(item) = queue.pop() {
            tokio::select! {
                _ = deliver(transport.as_ref(), item, debug) => {}
                _ = cancel.cancelled() => {
                    queue.complete();
                    queue.discard();
                    tracing::debug!("delivery worker cancelled");
                    return;
                }
            }
            queue.complete();
        }
        if queue.is_closed() {
            break;
        }
        tokio::select! {
            _ = queue.notified() => {}
            _ = cancel.cancelled() => break,
        }
    }
    let discarded = queue.discard();
    tracing::debug!(discarded, "delivery worker stopped");
}

async fn deliver(transport: &dyn Transport, item: QueueItem, debug: bool) {
    let kind = item.envelope.kind();
    match transport.send(&item.envelope).await {
        Ok(()) => {
            tracing::debug!(kind, "payload delivered");
            item.settle(true);
        }
        Err(e) => {
            if debug {
                tracing::warn!(kind, error = %e, "delivery failed, dropping payload");
            } else {
                tracing::debug!(kind, error = %e, "delivery failed, dropping payload");
            }
            item.settle(false);
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
