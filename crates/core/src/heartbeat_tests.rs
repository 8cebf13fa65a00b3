// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[yare::parameterized(
    ok        = { "ok",      HeartbeatStatus::Ok },
    success   = { "success", HeartbeatStatus::Ok },
    upper     = { "OK",      HeartbeatStatus::Ok },
    error     = { "error",   HeartbeatStatus::Error },
    failed    = { "failed",  HeartbeatStatus::Error },
)]
fn parses_status(input: &str, expected: HeartbeatStatus) {
    assert_eq!(input.parse::<HeartbeatStatus>().unwrap(), expected);
}

#[test]
fn rejects_unknown_status() {
    let err = "maybe".parse::<HeartbeatStatus>().unwrap_err();
    assert_eq!(err, ParseStatusError("maybe".to_string()));
}

#[test]
fn serializes_wire_fields() {
    let hb = CronHeartbeat {
        job_slug: "daily-backup".to_string(),
        status: HeartbeatStatus::Ok,
        duration_ms: None,
        metadata: [("files_backed_up".to_string(), json!(150))].into_iter().collect(),
        app_name: "cron-monitoring-example".to_string(),
        environment: "development".to_string(),
        sent_at: DateTime::from_timestamp_millis(0).unwrap(),
    };

    let value = serde_json::to_value(&hb).unwrap();
    assert_eq!(value["job_slug"], json!("daily-backup"));
    assert_eq!(value["status"], json!("ok"));
    assert_eq!(value["duration_ms"], json!(null));
    assert_eq!(value["metadata"], json!({ "files_backed_up": 150 }));
    assert_eq!(value["sent_at"], json!("1970-01-01T00:00:00.000Z"));
}
