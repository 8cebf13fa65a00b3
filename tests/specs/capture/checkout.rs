// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkout scenario specs
//!
//! An error raised in a nested scope is reported with the trail up to the
//! failing scope's exit and the scope chain that was open when it failed.

use crate::prelude::*;

#[derive(Debug, thiserror::Error)]
#[error("card declined")]
struct PaymentError;

#[test]
fn nested_failure_reports_failing_scope_trail() {
    let transport = FakeTransport::new();
    let client = client(&transport);
    let mut ctx = client.context();

    {
        let mut checkout = ctx.scope("checkout", "business");
        checkout.add_breadcrumb(click("click: Buy Now"));
        let payment = checkout.scope("payment", "business");
        payment.fail(&PaymentError);
        checkout.fail(&PaymentError);
    }
    client.capture_exception(&ctx, &PaymentError, CaptureOptions::default());

    let events = delivered(&client, &transport);
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(messages(event.breadcrumbs()), vec!["click: Buy Now", "exit: payment"]);
    assert_eq!(event.breadcrumbs()[1].data["error_message"], "card declined");
    assert_eq!(scope_names(event), vec!["payment", "checkout"]);
}

#[test]
fn in_scope_records_error_and_returns_it() {
    let transport = FakeTransport::new();
    let client = client(&transport);
    let mut ctx = client.context();

    let result: Result<(), PaymentError> = ctx.in_scope("checkout", "business", |ctx| {
        ctx.add_breadcrumb(click("click: Buy Now"));
        ctx.in_scope("payment", "business", |_| Err(PaymentError))
    });
    let err = result.unwrap_err();
    client.capture_exception(&ctx, &err, CaptureOptions::default());

    let event = &delivered(&client, &transport)[0];
    assert_eq!(event.error_type(), "PaymentError");
    assert_eq!(messages(event.breadcrumbs()), vec!["click: Buy Now", "exit: payment"]);
    assert_eq!(scope_names(event), vec!["payment", "checkout"]);
}

#[test]
fn capture_in_open_scopes_is_innermost_first() {
    let transport = FakeTransport::new();
    let client = client(&transport);
    let mut ctx = client.context();

    let mut outer = ctx.scope("checkout", "business");
    let inner = outer.scope("payment", "business");
    client.capture_exception(&*inner, &PaymentError, CaptureOptions::default());
    drop(inner);
    drop(outer);

    let event = &delivered(&client, &transport)[0];
    assert_eq!(scope_names(event), vec!["payment", "checkout"]);
    assert!(event.breadcrumbs().is_empty());
}

#[test]
fn successful_exits_leave_no_error_origin() {
    let transport = FakeTransport::new();
    let client = client(&transport);
    let mut ctx = client.context();

    ctx.scope("checkout", "business").exit();
    client.capture_exception(&ctx, &PaymentError, CaptureOptions::default());

    let event = &delivered(&client, &transport)[0];
    assert_eq!(messages(event.breadcrumbs()), vec!["exit: checkout"]);
    assert!(event.scopes().is_empty());
}
