// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::breadcrumb::Breadcrumb;
use proptest::prelude::*;

fn messages(store: &BreadcrumbStore) -> Vec<String> {
    store.iter().map(|b| b.message.clone()).collect()
}

#[test]
fn capacity_three_keeps_last_three() {
    let mut store = BreadcrumbStore::new(3);
    for m in ["A", "B", "C", "D"] {
        store.append(Breadcrumb::custom(m));
    }
    assert_eq!(messages(&store), vec!["B", "C", "D"]);
    assert_eq!(store.evicted(), 1);
}

#[test]
fn snapshot_is_detached_from_later_appends() {
    let mut store = BreadcrumbStore::new(2);
    store.append(Breadcrumb::custom("first"));
    let snap = store.snapshot();
    store.append(Breadcrumb::custom("second"));
    store.append(Breadcrumb::custom("third"));

    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].message, "first");
    assert_eq!(messages(&store), vec!["second", "third"]);
}

#[test]
fn zero_capacity_retains_nothing() {
    let mut store = BreadcrumbStore::new(0);
    store.append(Breadcrumb::custom("dropped"));
    assert!(store.is_empty());
    assert_eq!(store.evicted(), 1);
}

#[test]
fn default_capacity_is_one_hundred() {
    assert_eq!(BreadcrumbStore::default().capacity(), DEFAULT_MAX_BREADCRUMBS);
}

#[test]
fn clone_is_independent() {
    let mut parent = BreadcrumbStore::new(4);
    parent.append(Breadcrumb::custom("shared"));
    let mut child = parent.clone();
    child.append(Breadcrumb::custom("child-only"));

    assert_eq!(messages(&parent), vec!["shared"]);
    assert_eq!(messages(&child), vec!["shared", "child-only"]);
}

proptest! {
    #[test]
    fn never_exceeds_capacity_and_keeps_newest(capacity in 0usize..16, extra in 0usize..32) {
        let mut store = BreadcrumbStore::new(capacity);
        let total = capacity + extra;
        for i in 0..total {
            store.append(Breadcrumb::custom(i.to_string()));
        }

        prop_assert!(store.len() <= capacity);
        let expected: Vec<String> = (total - store.len()..total).map(|i| i.to_string()).collect();
        prop_assert_eq!(messages(&store), expected);
        prop_assert_eq!(store.len(), capacity.min(total));
    }
}
