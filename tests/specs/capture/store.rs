// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Breadcrumb capacity specs

use crate::prelude::*;

#[test]
fn capacity_three_keeps_last_three() {
    let transport = FakeTransport::new();
    let client = client_with(options().max_breadcrumbs(3), &transport);
    let mut ctx = client.context();

    for name in ["A", "B", "C", "D"] {
        ctx.add_breadcrumb(Breadcrumb::custom(name));
    }
    assert_eq!(messages(&ctx.breadcrumbs()), vec!["B", "C", "D"]);

    client.capture_message(&ctx, "trail check", CaptureOptions::default());
    let event = &delivered(&client, &transport)[0];
    assert_eq!(messages(event.breadcrumbs()), vec!["B", "C", "D"]);
}

#[test]
fn event_snapshot_is_not_affected_by_later_breadcrumbs() {
    let transport = FakeTransport::closed();
    let client = client(&transport);
    let mut ctx = client.context();

    ctx.add_breadcrumb(click("click: Save"));
    client.capture_message(&ctx, "snapshot", CaptureOptions::default());
    ctx.add_breadcrumb(click("click: Undo"));
    transport.open();

    let event = &delivered(&client, &transport)[0];
    assert_eq!(messages(event.breadcrumbs()), vec!["click: Save"]);
}
