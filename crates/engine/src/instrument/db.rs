// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use falcon_adapters::DbDriver;
use falcon_core::time_fmt::duration_ms;
use falcon_core::{Breadcrumb, BreadcrumbKind};

use super::{record, sanitize, Capability, Instrumentation};
use crate::context::ExecutionContext;

/// Database driver wrapper recording one `query` breadcrumb per statement.
pub struct InstrumentedDb<D> {
    inner: D,
    hooks: Instrumentation,
}

impl<D> InstrumentedDb<D> {
    pub(crate) fn new(inner: D, hooks: Instrumentation) -> Self {
        Self { inner, hooks }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: DbDriver> InstrumentedDb<D> {
    /// Execute `query` through the wrapped driver. The driver receives the
    /// original text; only the breadcrumb is sanitized.
    pub async fn execute(&self, ctx: &mut ExecutionContext, query: &str) -> Result<D::Output, D::Error> {
        let Some(config) = self.hooks.active(Capability::DbDriver) else {
            return self.inner.execute(query).await;
        };

        let started = ctx.clock().now();
        let result = self.inner.execute(query).await;
        let elapsed = duration_ms(ctx.clock().now().saturating_duration_since(started));

        let mut crumb = Breadcrumb::new(BreadcrumbKind::Query, sanitize::query(query))
            .category("db.query")
            .with("duration_ms", elapsed);
        if let Err(e) = &result {
            crumb = crumb.with("error", e.to_string());
        }
        record(ctx, &config, crumb);
        result
    }
}
