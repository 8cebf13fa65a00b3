// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound HTTP capability.
//!
//! Host applications make outbound calls through an [`HttpClient`]; passing
//! the client through the engine's wrapping constructor is what makes those
//! calls observable.

use async_trait::async_trait;
use thiserror::Error;

/// Minimal outbound request description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self { method: method.into(), url: url.into(), headers: Vec::new(), body: None }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self { body: Some(body.into()), ..Self::new("POST", url) }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Response as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self { status, headers: Vec::new(), body: Vec::new() }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// Outbound HTTP client capability.
#[async_trait]
pub trait HttpClient: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error>;
}

/// Errors from [`ReqwestHttpClient`]
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid HTTP method '{0}'")]
    InvalidMethod(String),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// [`HttpClient`] backed by a `reqwest::Client`.
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    type Error = HttpError;

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| HttpError::InvalidMethod(request.method.clone()))?;
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
            })
            .collect();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, headers, body })
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{HttpClient, HttpRequest, HttpResponse};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;
    use thiserror::Error;

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[error("{0}")]
    pub struct FakeHttpError(pub String);

    #[derive(Default)]
    struct FakeHttpState {
        calls: Vec<HttpRequest>,
        routes: HashMap<String, Result<HttpResponse, FakeHttpError>>,
    }

    /// Fake HTTP client for testing. Unrouted URLs answer `200` with an empty body.
    #[derive(Clone, Default)]
    pub struct FakeHttpClient {
        inner: Arc<Mutex<FakeHttpState>>,
    }

    impl FakeHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, url: &str, response: HttpResponse) {
            self.inner.lock().routes.insert(url.to_string(), Ok(response));
        }

        pub fn fail(&self, url: &str, message: &str) {
            self.inner.lock().routes.insert(url.to_string(), Err(FakeHttpError(message.to_string())));
        }

        /// Requests received, in order.
        pub fn calls(&self) -> Vec<HttpRequest> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl HttpClient for FakeHttpClient {
        type Error = FakeHttpError;

        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, FakeHttpError> {
            let mut inner = self.inner.lock();
            let result = inner
                .routes
                .get(&request.url)
                .cloned()
                .unwrap_or_else(|| Ok(HttpResponse::new(200)));
            inner.calls.push(request);
            result
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeHttpClient, FakeHttpError};

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
