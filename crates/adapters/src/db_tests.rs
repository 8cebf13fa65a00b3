// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fake_driver_returns_configured_rows() {
    let db = FakeDbDriver::new();
    db.set_rows(3);

    let rows = db.execute("UPDATE users SET active = 1").await.unwrap();

    assert_eq!(rows, 3);
    assert_eq!(db.queries(), vec!["UPDATE users SET active = 1".to_string()]);
}

#[tokio::test]
async fn fake_driver_fails_on_matching_query() {
    let db = FakeDbDriver::new();
    db.fail_on("FROM missing");

    assert!(db.execute("SELECT 1").await.is_ok());
    let err = db.execute("SELECT * FROM missing").await.unwrap_err();

    assert_eq!(err.to_string(), "query failed: syntax error near 'FROM missing'");
    assert_eq!(db.queries().len(), 2);
}
