// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use falcon_adapters::{FakeTransport, TransportError};
use falcon_core::{Clock, CronHeartbeat, DataMap, Envelope, FakeClock, HeartbeatStatus};
use std::time::Duration;
use tokio::sync::oneshot;

fn heartbeat(slug: &str) -> Envelope {
    Envelope::Heartbeat(CronHeartbeat {
        job_slug: slug.to_string(),
        status: HeartbeatStatus::Ok,
        duration_ms: Some(5),
        metadata: DataMap::new(),
        app_name: "worker-tests".to_string(),
        environment: "test".to_string(),
        sent_at: FakeClock::new().utc_now(),
    })
}

fn start(transport: &FakeTransport) -> (Arc<DeliveryQueue>, Worker) {
    let queue = Arc::new(DeliveryQueue::new(10));
    let worker = Worker::spawn(Arc::clone(&queue), Arc::new(transport.clone()), true).unwrap();
    (queue, worker)
}

#[test]
fn delivers_in_order_and_acks() {
    let transport = FakeTransport::new();
    let (queue, worker) = start(&transport);

    let (tx, rx) = oneshot::channel();
    queue.push(QueueItem::new(heartbeat("first")));
    queue.push(QueueItem::with_ack(heartbeat("second"), tx));

    assert!(queue.wait_idle(Duration::from_secs(5)));
    assert_eq!(rx.blocking_recv(), Ok(true));
    let slugs: Vec<String> = transport.heartbeats().into_iter().map(|h| h.job_slug).collect();
    assert_eq!(slugs, vec!["first", "second"]);
    worker.stop(true);
}

#[test]
fn failed_delivery_is_dropped_not_retried() {
    let transport = FakeTransport::new();
    transport.set_failure(Some(TransportError::Unreachable("connection refused".into())));
    let (queue, worker) = start(&transport);

    let (tx, rx) = oneshot::channel();
    queue.push(QueueItem::with_ack(heartbeat("doomed"), tx));

    assert!(queue.wait_idle(Duration::from_secs(5)));
    assert_eq!(rx.blocking_recv(), Ok(false));
    assert_eq!(transport.attempts(), 1);
    assert!(transport.sent().is_empty());
    worker.stop(true);
}

#[test]
fn closing_the_queue_drains_then_stops() {
    let transport = FakeTransport::new();
    let (queue, worker) = start(&transport);
    queue.push(QueueItem::new(heartbeat("last")));
    queue.close();

    assert!(queue.wait_idle(Duration::from_secs(5)));
    worker.stop(true);
    assert_eq!(transport.heartbeats().len(), 1);
}

#[test]
fn stop_discards_pending_items() {
    let transport = FakeTransport::closed();
    let (queue, worker) = start(&transport);

    let (tx, rx) = oneshot::channel();
    queue.push(QueueItem::new(heartbeat("stuck")));
    queue.push(QueueItem::with_ack(heartbeat("waiting"), tx));

    worker.stop(true);
    assert_eq!(rx.blocking_recv(), Ok(false));
    assert!(transport.sent().is_empty());
    assert_eq!(queue.len(), 0);
}
