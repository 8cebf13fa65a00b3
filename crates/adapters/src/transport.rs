// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery sink for captured events and heartbeats.

use async_trait::async_trait;
use falcon_core::Envelope;
use std::time::Duration;
use thiserror::Error;

/// Default request timeout for the HTTPS transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from delivery attempts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("sink unreachable: {0}")]
    Unreachable(String),
    #[error("sink rejected payload with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("failed to encode payload: {0}")]
    Encode(String),
    #[error("failed to build transport: {0}")]
    Setup(String),
}

/// Adapter that transmits queued payloads to the ingest service.
///
/// Called only from the background delivery worker, never on the caller's
/// control path.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, envelope: &Envelope) -> Result<(), TransportError>;
}

/// HTTPS transport posting JSON payloads with a bearer API key.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("falcon-rust/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Ingest endpoint for an envelope.
    pub fn endpoint(&self, envelope: &Envelope) -> String {
        match envelope {
            Envelope::Event(_) => format!("{}/v1/events", self.api_url),
            Envelope::Heartbeat(hb) => {
                format!("{}/v1/cron/{}/heartbeat", self.api_url, hb.job_slug)
            }
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, envelope: &Envelope) -> Result<(), TransportError> {
        let body = envelope.to_json().map_err(|e| TransportError::Encode(e.to_string()))?;
        let url = self.endpoint(envelope);
        tracing::debug!(%url, kind = envelope.kind(), bytes = body.len(), "posting payload");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(TransportError::Rejected {
            status: status.as_u16(),
            body: falcon_core::text::truncate(body.trim(), 200),
        })
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{Transport, TransportError};
    use async_trait::async_trait;
    use falcon_core::{CapturedEvent, CronHeartbeat, Envelope};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tokio::sync::watch;

    struct FakeTransportState {
        sent: Vec<Envelope>,
        attempts: usize,
        failure: Option<TransportError>,
    }

    /// Fake transport for testing.
    ///
    /// Records delivered envelopes. Can be told to fail every send, or be
    /// held closed so that sends wait until [`FakeTransport::open`].
    #[derive(Clone)]
    pub struct FakeTransport {
        inner: Arc<Mutex<FakeTransportState>>,
        gate: Arc<watch::Sender<bool>>,
    }

    impl Default for FakeTransport {
        fn default() -> Self {
            let (gate, _) = watch::channel(true);
            Self {
                inner: Arc::new(Mutex::new(FakeTransportState {
                    sent: Vec::new(),
                    attempts: 0,
                    failure: None,
                })),
                gate: Arc::new(gate),
            }
        }
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// A transport whose sends block until [`FakeTransport::open`] is called.
        pub fn closed() -> Self {
            let transport = Self::default();
            transport.gate.send_replace(false);
            transport
        }

        pub fn open(&self) {
            self.gate.send_replace(true);
        }

        /// Make every subsequent send fail with `error` (or succeed with `None`).
        pub fn set_failure(&self, error: Option<TransportError>) {
            self.inner.lock().failure = error;
        }

        /// Envelopes delivered successfully, in delivery order.
        pub fn sent(&self) -> Vec<Envelope> {
            self.inner.lock().sent.clone()
        }

        pub fn events(&self) -> Vec<CapturedEvent> {
            self.sent().iter().filter_map(|e| e.as_event().cloned()).collect()
        }

        pub fn heartbeats(&self) -> Vec<CronHeartbeat> {
            self.sent().iter().filter_map(|e| e.as_heartbeat().cloned()).collect()
        }

        /// Number of sends attempted, including failures.
        pub fn attempts(&self) -> usize {
            self.inner.lock().attempts
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, envelope: &Envelope) -> Result<(), TransportError> {
            let mut gate = self.gate.subscribe();
            let _ = gate.wait_for(|open| *open).await;

            let mut inner = self.inner.lock();
            inner.attempts += 1;
            if let Some(err) = inner.failure.clone() {
                return Err(err);
            }
            inner.sent.push(envelope.clone());
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeTransport;

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
