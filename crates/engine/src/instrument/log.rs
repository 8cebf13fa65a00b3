// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use falcon_adapters::{LogRecord, LogSink};
use falcon_core::{Breadcrumb, BreadcrumbKind};

use super::{record, Capability, Instrumentation};
use crate::context::ExecutionContext;

/// Log sink wrapper recording `log` breadcrumbs at or above the configured level.
pub struct InstrumentedLog<L> {
    inner: L,
    hooks: Instrumentation,
}

impl<L> InstrumentedLog<L> {
    pub(crate) fn new(inner: L, hooks: Instrumentation) -> Self {
        Self { inner, hooks }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: LogSink> InstrumentedLog<L> {
    /// Forward `log_record` to the wrapped sink, then record it.
    pub fn emit(&self, ctx: &mut ExecutionContext, log_record: &LogRecord) {
        self.inner.emit(log_record);

        let Some(config) = self.hooks.active(Capability::LogSink) else {
            return;
        };
        // tracing orders levels by verbosity: ERROR is the smallest.
        if log_record.level > config.min_level {
            return;
        }
        let crumb = Breadcrumb::new(BreadcrumbKind::Log, log_record.message.clone())
            .category(log_record.target.clone())
            .with("level", log_record.level.as_str().to_ascii_lowercase());
        record(ctx, &config, crumb);
    }
}
