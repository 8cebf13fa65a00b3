// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Breadcrumb records.
//!
//! A breadcrumb is a timestamped record of something observed in an
//! execution context (an HTTP call, a query, a log line, a UI action). The
//! context stamps `timestamp` and `sequence` when the breadcrumb is recorded;
//! after that the stored copy is never modified.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Free-form, insertion-ordered payload attached to breadcrumbs, scopes and events.
pub type DataMap = IndexMap<String, serde_json::Value>;

/// What kind of thing a breadcrumb describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreadcrumbKind {
    Navigation,
    Click,
    Custom,
    Http,
    Query,
    Log,
}

crate::simple_display! {
    BreadcrumbKind {
        Navigation => "navigation",
        Click => "click",
        Custom => "custom",
        Http => "http",
        Query => "query",
        Log => "log",
    }
}

/// A single breadcrumb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    #[serde(rename = "type")]
    pub kind: BreadcrumbKind,
    pub message: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub data: DataMap,
    #[serde(with = "crate::time_fmt::iso8601")]
    pub timestamp: DateTime<Utc>,
    /// Recording order within the owning context; breaks timestamp ties.
    #[serde(default)]
    pub sequence: u64,
}

impl Breadcrumb {
    /// Create an unrecorded breadcrumb. Timestamp and sequence are assigned
    /// by the execution context that records it.
    pub fn new(kind: BreadcrumbKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            category: String::new(),
            data: DataMap::new(),
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            sequence: 0,
        }
    }

    pub fn navigation(message: impl Into<String>) -> Self {
        Self::new(BreadcrumbKind::Navigation, message)
    }

    pub fn click(message: impl Into<String>) -> Self {
        Self::new(BreadcrumbKind::Click, message)
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(BreadcrumbKind::Custom, message)
    }

    crate::setters! {
        into { category: String }
        set { data: DataMap }
    }

    /// Add one data entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Stamp the recording time and sequence.
    pub fn stamped(mut self, timestamp: DateTime<Utc>, sequence: u64) -> Self {
        self.timestamp = timestamp;
        self.sequence = sequence;
        self
    }

    /// Truncate the message and every string data value to `max_len` characters.
    pub fn truncated(mut self, max_len: usize) -> Self {
        crate::text::truncate_in_place(&mut self.message, max_len);
        for value in self.data.values_mut() {
            if let serde_json::Value::String(s) = value {
                crate::text::truncate_in_place(s, max_len);
            }
        }
        self
    }
}

#[cfg(test)]
#[path = "breadcrumb_tests.rs"]
mod tests;
