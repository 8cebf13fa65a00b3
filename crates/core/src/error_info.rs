// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error descriptions extracted from observed errors.

use serde::{Deserialize, Serialize};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;

/// Type, message and cause chain of an observed error.
///
/// Built from a borrowed error; the original error is never consumed or
/// altered, so callers keep their own error semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub error_type: String,
    pub message: String,
    /// Cause chain, outermost first, optionally followed by backtrace frames.
    #[serde(default)]
    pub stack: Vec<String>,
}

impl ErrorInfo {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self { error_type: error_type.into(), message: message.into(), stack: Vec::new() }
    }

    /// Describe a typed error.
    pub fn from_error<E: Error + ?Sized>(err: &E) -> Self {
        let mut stack = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push(cause.to_string());
            source = cause.source();
        }
        Self { error_type: short_type_name(std::any::type_name::<E>()), message: err.to_string(), stack }
    }

    /// Describe the error of a result, if any.
    pub fn from_result<T, E: Error>(result: &Result<T, E>) -> Option<Self> {
        result.as_ref().err().map(Self::from_error)
    }

    /// Append the current backtrace when backtraces are enabled
    /// (`RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`).
    pub fn with_backtrace(mut self) -> Self {
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            self.stack.extend(
                backtrace.to_string().lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from),
            );
        }
        self
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)
    }
}

/// Reduce a fully qualified type name to its last path segment, e.g.
/// `app::payment::GatewayError<u8>` → `GatewayError`. Trait objects
/// (`dyn core::error::Error + Send`) become `Error`.
pub fn short_type_name(full: &str) -> String {
    let full = full.trim_start_matches('&');
    let full = full.strip_prefix("dyn ").unwrap_or(full);
    let base = full.split(['<', ' ']).next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
#[path = "error_info_tests.rs"]
mod tests;
