// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Instrumentation hook specs
//!
//! Wrapped capabilities record breadcrumbs only while their hook is
//! installed, and installing twice changes nothing.

use crate::prelude::*;
use falcon_core::BreadcrumbKind;

const USERS_URL: &str = "https://api.example.com/v1/users?api_key=secret";

async fn run_calls(client: &Client) -> Vec<Breadcrumb> {
    let http = client.instrumentation().http(FakeHttpClient::new());
    let db = FakeDbDriver::new();
    db.fail_on("DROP");
    let db = client.instrumentation().db(db);

    let mut ctx = client.context();
    http.get(&mut ctx, USERS_URL).await.unwrap();
    db.execute(&mut ctx, "SELECT * FROM users WHERE email = 'jane@example.com'").await.unwrap();
    db.execute(&mut ctx, "DROP TABLE users").await.unwrap_err();
    ctx.breadcrumbs()
}

#[tokio::test]
async fn installing_twice_matches_installing_once() {
    let once = client(&FakeTransport::new());
    once.instrumentation().install_all(HookConfig::default());

    let twice = client(&FakeTransport::new());
    twice.instrumentation().install_all(HookConfig::default());
    assert!(!twice.instrumentation().install(Capability::HttpClient, HookConfig::default()));
    twice.instrumentation().install_all(HookConfig::default());

    similar_asserts::assert_eq!(run_calls(&once).await, run_calls(&twice).await);
}

#[tokio::test]
async fn recorded_calls_are_sanitized() {
    let client = client(&FakeTransport::new());
    client.instrumentation().install_all(HookConfig::default());

    let trail = run_calls(&client).await;
    let kinds: Vec<BreadcrumbKind> = trail.iter().map(|b| b.kind).collect();
    assert_eq!(kinds, vec![BreadcrumbKind::Http, BreadcrumbKind::Query, BreadcrumbKind::Query]);
    assert_eq!(trail[0].message, "GET https://api.example.com/v1/users");
    assert_eq!(trail[0].data["status_code"], 200);
    assert_eq!(trail[1].message, "SELECT * FROM users WHERE email = ?");
    assert_eq!(trail[2].data["error"], "query failed: syntax error near 'DROP'");
}

#[tokio::test]
async fn uninstalled_hooks_pass_through() {
    let client = client(&FakeTransport::new());
    client.instrumentation().install(Capability::DbDriver, HookConfig::default());
    client.instrumentation().uninstall(Capability::DbDriver);

    assert!(run_calls(&client).await.is_empty());
}
