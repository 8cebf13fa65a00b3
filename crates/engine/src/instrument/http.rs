// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use falcon_adapters::{HttpClient, HttpRequest, HttpResponse};
use falcon_core::time_fmt::duration_ms;
use falcon_core::{Breadcrumb, BreadcrumbKind};

use super::{record, sanitize, Capability, Instrumentation};
use crate::context::ExecutionContext;

/// HTTP client wrapper recording one `http` breadcrumb per request.
pub struct InstrumentedHttp<H> {
    inner: H,
    hooks: Instrumentation,
}

impl<H> InstrumentedHttp<H> {
    pub(crate) fn new(inner: H, hooks: Instrumentation) -> Self {
        Self { inner, hooks }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: HttpClient> InstrumentedHttp<H> {
    /// Execute `request` through the wrapped client. The response or error
    /// is returned exactly as the client produced it.
    pub async fn execute(
        &self,
        ctx: &mut ExecutionContext,
        request: HttpRequest,
    ) -> Result<HttpResponse, H::Error> {
        let Some(config) = self.hooks.active(Capability::HttpClient) else {
            return self.inner.execute(request).await;
        };

        let method = request.method.to_ascii_uppercase();
        let url = sanitize::url(&request.url);
        let started = ctx.clock().now();
        let result = self.inner.execute(request).await;
        let elapsed = duration_ms(ctx.clock().now().saturating_duration_since(started));

        let mut crumb = Breadcrumb::new(BreadcrumbKind::Http, format!("{method} {url}"))
            .category("http")
            .with("method", method)
            .with("url", url);
        crumb = match &result {
            Ok(response) => crumb.with("status_code", response.status).with("duration_ms", elapsed),
            Err(e) => crumb.with("duration_ms", elapsed).with("error", e.to_string()),
        };
        record(ctx, &config, crumb);
        result
    }

    pub async fn get(&self, ctx: &mut ExecutionContext, url: &str) -> Result<HttpResponse, H::Error> {
        self.execute(ctx, HttpRequest::get(url)).await
    }
}
