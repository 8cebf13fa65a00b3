// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transport that keeps payloads in memory for `--dry-run`.

use async_trait::async_trait;
use falcon_adapters::{Transport, TransportError};
use falcon_core::Envelope;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<Envelope>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Envelope> {
        std::mem::take(&mut *self.sent.lock())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, envelope: &Envelope) -> Result<(), TransportError> {
        tracing::debug!(kind = envelope.kind(), "dry run, payload recorded");
        self.sent.lock().push(envelope.clone());
        Ok(())
    }
}
