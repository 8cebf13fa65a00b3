// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Breadcrumb, BreadcrumbKind};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core types.
pub mod strategies {
    use crate::{Breadcrumb, BreadcrumbKind};
    use proptest::prelude::*;

    pub fn arb_kind() -> impl Strategy<Value = BreadcrumbKind> {
        prop_oneof![
            Just(BreadcrumbKind::Navigation),
            Just(BreadcrumbKind::Click),
            Just(BreadcrumbKind::Custom),
            Just(BreadcrumbKind::Http),
            Just(BreadcrumbKind::Query),
            Just(BreadcrumbKind::Log),
        ]
    }

    pub fn arb_breadcrumb() -> impl Strategy<Value = Breadcrumb> {
        (arb_kind(), "[a-z ]{0,24}", "[a-z.]{0,12}")
            .prop_map(|(kind, message, category)| Breadcrumb::new(kind, message).category(category))
    }

    /// One step of a scope workload: `Enter` pushes, `Exit(n)` exits the
    /// n-th most recent still-tracked handle (wrapping), `Skip` does nothing.
    #[derive(Debug, Clone, Copy)]
    pub enum ScopeOp {
        Enter,
        Exit(usize),
        Skip,
    }

    pub fn arb_scope_ops() -> impl Strategy<Value = Vec<ScopeOp>> {
        prop::collection::vec(
            prop_oneof![
                3 => Just(ScopeOp::Enter),
                2 => any::<usize>().prop_map(ScopeOp::Exit),
                1 => Just(ScopeOp::Skip),
            ],
            0..64,
        )
    }
}

// ── Factory functions ───────────────────────────────────────────────────

pub fn click(message: &str) -> Breadcrumb {
    Breadcrumb::new(BreadcrumbKind::Click, message).category("ui.click")
}

pub fn custom(message: &str) -> Breadcrumb {
    Breadcrumb::new(BreadcrumbKind::Custom, message)
}

/// Messages of a breadcrumb slice, for compact assertions.
pub fn messages(breadcrumbs: &[Breadcrumb]) -> Vec<String> {
    breadcrumbs.iter().map(|b| b.message.clone()).collect()
}
