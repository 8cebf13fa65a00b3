// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded delivery queue between capture calls and the delivery worker.
//!
//! Producers never block: when the queue is full the oldest queued item is
//! dropped to make room. The worker is woken through a `Notify`; `flush`
//! waits on a condvar until nothing is queued or in flight.

use falcon_core::Envelope;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tokio::sync::{oneshot, Notify};

/// A queued payload, with an optional delivery acknowledgement.
pub(crate) struct QueueItem {
    pub(crate) envelope: Envelope,
    ack: Option<oneshot::Sender<bool>>,
}

impl QueueItem {
    pub(crate) fn new(envelope: Envelope) -> Self {
        Self { envelope, ack: None }
    }

    pub(crate) fn with_ack(envelope: Envelope, ack: oneshot::Sender<bool>) -> Self {
        Self { envelope, ack: Some(ack) }
    }

    /// Report the outcome to whoever is waiting, if anyone.
    pub(crate) fn settle(self, delivered: bool) {
        if let Some(ack) = self.ack {
            let _ = ack.send(delivered);
        }
    }
}

struct QueueState {
    items: VecDeque<QueueItem>,
    in_flight: usize,
    closed: bool,
    dropped: u64,
}

pub(crate) struct DeliveryQueue {
    capacity: usize,
    state: Mutex<QueueState>,
    idle: Condvar,
    wake: Notify,
}

impl DeliveryQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                in_flight: 0,
                closed: false,
                dropped: 0,
            }),
            idle: Condvar::new(),
            wake: Notify::new(),
        }
    }

    /// Enqueue an item, dropping the oldest queued item when full.
    pub(crate) fn push(&self, item: QueueItem) {
        let evicted = {
            let mut state = self.state.lock();
            if state.closed || self.capacity == 0 {
                state.dropped += 1;
                drop(state);
                tracing::warn!(kind = item.envelope.kind(), "delivery queue closed, dropping payload");
                item.settle(false);
                return;
            }
            let evicted =
                if state.items.len() >= self.capacity { state.items.pop_front() } else { None };
            if evicted.is_some() {
                state.dropped += 1;
            }
            state.items.push_back(item);
            evicted
        };
        if let Some(old) = evicted {
            tracing::warn!(
                kind = old.envelope.kind(),
                capacity = self.capacity,
                "delivery queue full, dropping oldest payload"
            );
            old.settle(false);
        }
        self.wake.notify_one();
    }

    /// Take the next item, marking it in flight until [`complete`](Self::complete).
    pub(crate) fn pop(&self) -> Option<QueueItem> {
        let mut state = self.state.lock();
        let item = state.items.pop_front()?;
        state.in_flight += 1;
        Some(item)
    }

    pub(crate) fn complete(&self) {
        let mut state = self.state.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        if state.items.is_empty() && state.in_flight == 0 {
            self.idle.notify_all();
        }
    }

    /// Wait until a producer pushes or the queue is closed.
    pub(crate) async fn notified(&self) {
        self.wake.notified().await;
    }

    /// Block until nothing is queued or in flight. Returns `false` on timeout.
    pub(crate) fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while !state.items.is_empty() || state.in_flight > 0 {
            if self.idle.wait_until(&mut state, deadline).timed_out() {
                return state.items.is_empty() && state.in_flight == 0;
            }
        }
        true
    }

    /// Refuse further pushes. Already queued items stay for the worker.
    pub(crate) fn close(&self) {
        self.state.lock().closed = true;
        self.wake.notify_one();
    }

    /// Drop everything still queued, settling waiters with `false`.
    pub(crate) fn discard(&self) -> usize {
        let items: Vec<QueueItem> = {
            let mut state = self.state.lock();
            let items: Vec<QueueItem> = state.items.drain(..).collect();
            state.dropped += items.len() as u64;
            if state.in_flight == 0 {
                self.idle.notify_all();
            }
            items
        };
        let count = items.len();
        for item in items {
            item.settle(false);
        }
        count
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub(crate) fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub(crate) fn dropped(&self) -> u64 {
        self.state.lock().dropped
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
