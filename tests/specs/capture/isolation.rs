// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Context isolation specs
//!
//! Each request or task owns its context; nothing leaks between siblings.

use crate::prelude::*;
use futures_util::FutureExt;
use falcon_engine::RequestInfo;

#[test]
fn sibling_threads_never_share_breadcrumbs() {
    let transport = FakeTransport::new();
    let client = client(&transport);

    let workers: Vec<_> = ["alpha", "beta"]
        .into_iter()
        .map(|name| {
            let client = client.clone();
            std::thread::spawn(move || {
                let mut ctx = client.context();
                for i in 0..20 {
                    ctx.add_breadcrumb(Breadcrumb::custom(format!("{name}-{i}")));
                }
                client.capture_message(&ctx, name, CaptureOptions::default());
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    for event in delivered(&client, &transport) {
        let prefix = format!("{}-", event.error_message());
        assert_eq!(event.breadcrumbs().len(), 20);
        assert!(event.breadcrumbs().iter().all(|b| b.message.starts_with(&prefix)));
    }
}

#[test]
fn forked_context_inherits_but_does_not_write_back() {
    let transport = FakeTransport::new();
    let client = client(&transport);
    let mut parent = client.context();
    parent.add_breadcrumb(click("click: Export"));
    let _job = parent.enter_scope("export", "task", DataMap::new());

    let mut child = parent.fork();
    child.add_breadcrumb(Breadcrumb::custom("chunk 1 written"));
    client.capture_message(&child, "child", CaptureOptions::default());
    client.capture_message(&parent, "parent", CaptureOptions::default());

    let events = delivered(&client, &transport);
    assert_eq!(messages(events[0].breadcrumbs()), vec!["click: Export", "chunk 1 written"]);
    assert_eq!(scope_names(&events[0]), vec!["export"]);
    assert_eq!(messages(events[1].breadcrumbs()), vec!["click: Export"]);
}

#[tokio::test]
async fn concurrent_requests_are_isolated() {
    let transport = FakeTransport::new();
    let client = client(&transport);

    let request = |path: &'static str| {
        let client = client.clone();
        async move {
            client
                .handle_request(RequestInfo::new("GET", path), move |ctx| {
                    async move {
                        ctx.add_breadcrumb(Breadcrumb::custom(format!("handled {path}")));
                        tokio::task::yield_now().await;
                        Err::<(), _>(std::io::Error::other(format!("{path} failed")))
                    }
                    .boxed()
                })
                .await
        }
    };
    let (a, b) = tokio::join!(request("/a"), request("/b"));
    assert!(a.is_err() && b.is_err());

    let mut events = delivered(&client, &transport);
    events.sort_by(|x, y| x.error_message().cmp(y.error_message()));
    assert_eq!(messages(events[0].breadcrumbs()), vec!["GET /a", "handled /a"]);
    assert_eq!(messages(events[1].breadcrumbs()), vec!["GET /b", "handled /b"]);
}
