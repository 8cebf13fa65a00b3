// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use falcon_core::test_support::{click, messages};
use falcon_core::FakeClock;
use std::sync::Arc;

fn ctx() -> ExecutionContext {
    ExecutionContext::with_clock(100, Arc::new(FakeClock::new()))
}

#[test]
fn drop_exits_normally() {
    let mut ctx = ctx();
    {
        let mut scope = ctx.scope("inventory_update", "business");
        scope.add_breadcrumb(click("reserve"));
        assert_eq!(scope.depth(), 1);
    }
    assert_eq!(ctx.depth(), 0);
    assert_eq!(messages(&ctx.breadcrumbs()), vec!["reserve", "exit: inventory_update"]);
}

#[test]
fn fail_records_error_once() {
    let mut ctx = ctx();
    let scope = ctx.scope("risky_operation", "business");
    let err = std::io::Error::new(std::io::ErrorKind::Other, "Something went wrong!");
    scope.fail(&err);

    let trail = ctx.breadcrumbs();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].data["error_type"], "Error");
    assert_eq!(trail[0].data["error_message"], "Something went wrong!");
}

#[test]
fn finish_with_ok_exits_cleanly() {
    let mut ctx = ctx();
    let scope = ctx.scope("validate", "business");
    scope.finish(&Ok::<_, std::io::Error>(()));
    assert!(!ctx.breadcrumbs()[0].data.contains_key("error_type"));
}

#[test]
fn nested_guards_release_in_order() {
    let mut ctx = ctx();
    {
        let mut outer = ctx.scope("checkout_process", "business");
        {
            let _inner = outer.scope("payment_validation", "business");
        }
        let _inner = outer.scope("inventory_update", "business");
    }
    assert_eq!(
        messages(&ctx.breadcrumbs()),
        vec!["exit: payment_validation", "exit: inventory_update", "exit: checkout_process"]
    );
}

#[test]
fn panic_while_open_records_panic_error() {
    let mut ctx = ctx();
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _scope = ctx.scope("explode", "test");
        panic!("boom");
    }));

    assert!(outcome.is_err());
    let trail = ctx.breadcrumbs();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].data["error_type"], "panic");
}

#[test]
fn manual_exit_through_guard_is_not_repeated_on_drop() {
    let mut ctx = ctx();
    {
        let mut scope = ctx.scope("manual", "");
        let handle = scope.handle();
        scope.exit_scope(handle, None);
    }
    assert_eq!(ctx.breadcrumbs().len(), 1);
}

#[test]
fn abandon_on_drop_marks_an_unfinished_scope() {
    let mut ctx = ctx();
    {
        let mut scope = ctx.scope("poll", "async");
        scope.abandon_on_drop();
    }
    let trail = ctx.breadcrumbs();
    assert_eq!(messages(&trail), vec!["exit: poll"]);
    assert_eq!(trail[0].data["abandoned"], true);
}

#[test]
fn finish_overrides_abandon_on_drop() {
    let mut ctx = ctx();
    let mut scope = ctx.scope("poll", "async");
    scope.abandon_on_drop();
    scope.finish(&Ok::<(), std::io::Error>(()));

    let trail = ctx.breadcrumbs();
    assert_eq!(trail.len(), 1);
    assert!(!trail[0].data.contains_key("abandoned"));
}
