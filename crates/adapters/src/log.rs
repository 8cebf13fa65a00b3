// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log sink capability.

use tracing::Level;

/// One application log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    /// Logger name, e.g. `checkout::payment`.
    pub target: String,
    pub message: String,
}

impl LogRecord {
    pub fn new(level: Level, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self { level, target: target.into(), message: message.into() }
    }
}

/// Where the host application writes its log records.
pub trait LogSink: Send + Sync {
    fn emit(&self, record: &LogRecord);
}

/// Forwards records to the `tracing` dispatcher.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn emit(&self, record: &LogRecord) {
        let target = record.target.as_str();
        let message = record.message.as_str();
        match record.level {
            Level::ERROR => tracing::error!(logger = target, "{message}"),
            Level::WARN => tracing::warn!(logger = target, "{message}"),
            Level::INFO => tracing::info!(logger = target, "{message}"),
            Level::DEBUG => tracing::debug!(logger = target, "{message}"),
            _ => tracing::trace!(logger = target, "{message}"),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{LogRecord, LogSink};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Fake sink for testing; keeps every record it receives.
    #[derive(Clone, Default)]
    pub struct FakeLogSink {
        records: Arc<Mutex<Vec<LogRecord>>>,
    }

    impl FakeLogSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn records(&self) -> Vec<LogRecord> {
            self.records.lock().clone()
        }
    }

    impl LogSink for FakeLogSink {
        fn emit(&self, record: &LogRecord) {
            self.records.lock().push(record.clone());
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLogSink;

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
