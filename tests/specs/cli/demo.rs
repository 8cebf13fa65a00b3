// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `falcon demo` specs

use crate::prelude::*;

#[test]
fn dry_run_json_is_the_checkout_event() {
    let out = cli().args(&["demo", "--dry-run", "-o", "json"]).passes();
    let payloads = out.stdout_json();
    let event = &payloads[0];

    assert_eq!(event["error_type"], "PaymentError");
    let trail: Vec<&str> = event["breadcrumbs"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|b| b["message"].as_str())
        .collect();
    assert_eq!(trail.first(), Some(&"/cart"));
    assert_eq!(trail.last(), Some(&"exit: payment"));
    assert!(trail.contains(&"click: Buy Now"));

    let scopes: Vec<&str> =
        event["scopes"].as_array().unwrap().iter().filter_map(|s| s["name"].as_str()).collect();
    assert_eq!(scopes, vec!["payment", "checkout"]);
}

#[test]
fn dry_run_uses_configured_app_name() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("falcon.toml");
    std::fs::write(&config, "app_name = \"shop-frontend\"\nenvironment = \"staging\"\n").unwrap();

    let out = cli()
        .args(&["--config", config.to_str().unwrap(), "demo", "--dry-run", "-o", "json"])
        .passes();
    let event = &out.stdout_json()[0];
    assert_eq!(event["app_name"], "shop-frontend");
    assert_eq!(event["environment"], "staging");
}

#[test]
fn dry_run_text_summarizes_the_event() {
    cli()
        .args(&["demo", "--dry-run"])
        .passes()
        .stdout_has("PaymentError: card declined (402): insufficient_funds")
        .stdout_has("scopes:");
}
