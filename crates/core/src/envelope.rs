// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Items handed to the delivery sink.

use serde::Serialize;

use crate::event::CapturedEvent;
use crate::heartbeat::CronHeartbeat;

/// A payload queued for delivery. Serializes as the bare inner payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Event(CapturedEvent),
    Heartbeat(CronHeartbeat),
}

impl Envelope {
    /// Short label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Envelope::Event(_) => "event",
            Envelope::Heartbeat(_) => "heartbeat",
        }
    }

    pub fn as_event(&self) -> Option<&CapturedEvent> {
        match self {
            Envelope::Event(event) => Some(event),
            Envelope::Heartbeat(_) => None,
        }
    }

    pub fn as_heartbeat(&self) -> Option<&CronHeartbeat> {
        match self {
            Envelope::Heartbeat(hb) => Some(hb),
            Envelope::Event(_) => None,
        }
    }

    /// JSON body sent to the ingest API.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

impl From<CapturedEvent> for Envelope {
    fn from(event: CapturedEvent) -> Self {
        Envelope::Event(event)
    }
}

impl From<CronHeartbeat> for Envelope {
    fn from(hb: CronHeartbeat) -> Self {
        Envelope::Heartbeat(hb)
    }
}
