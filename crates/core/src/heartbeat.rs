// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron heartbeat reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::breadcrumb::DataMap;

/// Outcome reported for a scheduled job run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeartbeatStatus {
    Ok,
    Error,
}

crate::simple_display! {
    HeartbeatStatus {
        Ok => "ok",
        Error => "error",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown heartbeat status '{0}' (expected 'ok' or 'error')")]
pub struct ParseStatusError(pub String);

impl std::str::FromStr for HeartbeatStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ok" | "success" => Ok(Self::Ok),
            "error" | "failed" | "failure" => Ok(Self::Error),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A single status report for a named job. Not retained after sending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CronHeartbeat {
    pub job_slug: String,
    pub status: HeartbeatStatus,
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub metadata: DataMap,
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub environment: String,
    #[serde(with = "crate::time_fmt::iso8601")]
    pub sent_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "heartbeat_tests.rs"]
mod tests;
