// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Captured error events.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::breadcrumb::{Breadcrumb, DataMap};
use crate::error_info::ErrorInfo;
use crate::scope::Scope;

crate::define_id! {
    /// Identifier returned by `capture_exception` and sent with the event.
    pub struct EventId;
}

/// User attached to captured events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: DataMap,
}

impl User {
    pub fn new() -> Self {
        Self::default()
    }

    crate::setters! {
        option { id: String, email: String, username: String }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Everything needed to build a [`CapturedEvent`].
#[derive(Debug, Clone)]
pub struct EventParts {
    pub error: ErrorInfo,
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Innermost first.
    pub scopes: Vec<Scope>,
    pub user: Option<User>,
    pub tags: IndexMap<String, String>,
    pub extra: DataMap,
    pub app_name: String,
    pub environment: String,
    pub captured_at: DateTime<Utc>,
}

/// Immutable snapshot of an error and the diagnostic state around it.
///
/// Fields are private: once built, an event is only read and serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedEvent {
    event_id: EventId,
    error_type: String,
    error_message: String,
    stack_info: Vec<String>,
    breadcrumbs: Vec<Breadcrumb>,
    scopes: Vec<Scope>,
    user: Option<User>,
    tags: IndexMap<String, String>,
    extra: DataMap,
    app_name: String,
    environment: String,
    #[serde(with = "crate::time_fmt::iso8601")]
    captured_at: DateTime<Utc>,
}

impl CapturedEvent {
    pub fn new(parts: EventParts) -> Self {
        Self {
            event_id: EventId::new(),
            error_type: parts.error.error_type,
            error_message: parts.error.message,
            stack_info: parts.error.stack,
            breadcrumbs: parts.breadcrumbs,
            scopes: parts.scopes,
            user: parts.user,
            tags: parts.tags,
            extra: parts.extra,
            app_name: parts.app_name,
            environment: parts.environment,
            captured_at: parts.captured_at,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn error_type(&self) -> &str {
        &self.error_type
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn stack_info(&self) -> &[String] {
        &self.stack_info
    }

    /// Oldest first.
    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.breadcrumbs
    }

    /// Innermost first.
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn tags(&self) -> &IndexMap<String, String> {
        &self.tags
    }

    pub fn extra(&self) -> &DataMap {
        &self.extra
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
