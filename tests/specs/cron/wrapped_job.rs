// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron heartbeat specs

use crate::prelude::*;

#[derive(Debug, PartialEq, thiserror::Error)]
enum CleanupError {
    #[error("Database connection timeout after {0}s")]
    Timeout(u32),
}

#[test]
fn wrapped_job_reraises_original_error_after_reporting() {
    let transport = FakeTransport::new();
    let client = client(&transport);
    let cleanup = client.cron_job("nightly-cleanup").wrap(|| -> Result<u32, CleanupError> {
        Err(CleanupError::Timeout(30))
    });

    let err = cleanup().unwrap_err();
    assert_eq!(err, CleanupError::Timeout(30));
    assert_eq!(err.to_string(), "Database connection timeout after 30s");

    assert!(client.flush(WAIT));
    let beats = transport.heartbeats();
    assert_eq!(beats.len(), 1);
    assert_eq!(beats[0].status, HeartbeatStatus::Error);
    assert_eq!(beats[0].metadata["error"], "Database connection timeout after 30s");
    assert_eq!(beats[0].app_name, "falcon-specs");
}

#[test]
fn heartbeats_do_not_touch_breadcrumbs() {
    let transport = FakeTransport::new();
    let client = client(&transport);
    let ctx = client.context();

    client.heartbeat("daily-backup", HeartbeatStatus::Ok, Some(1_200), DataMap::new());
    client.cron_job("hourly-sync").run(|| Ok::<_, CleanupError>(())).unwrap();

    assert!(ctx.breadcrumbs().is_empty());
    assert!(client.flush(WAIT));
    assert_eq!(transport.heartbeats().len(), 2);
    assert!(transport.events().is_empty());
}
