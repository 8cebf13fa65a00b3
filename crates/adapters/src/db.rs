// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Database driver capability.

use async_trait::async_trait;

/// A database driver the host executes queries through.
///
/// The query text is opaque; no parsing happens on this side.
#[async_trait]
pub trait DbDriver: Send + Sync {
    type Output: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn execute(&self, query: &str) -> Result<Self::Output, Self::Error>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::DbDriver;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use thiserror::Error;

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[error("query failed: {0}")]
    pub struct FakeDbError(pub String);

    #[derive(Default)]
    struct FakeDbState {
        queries: Vec<String>,
        rows: u64,
        fail_on: Option<String>,
    }

    /// Fake driver for testing. Returns a fixed row count for every query.
    #[derive(Clone, Default)]
    pub struct FakeDbDriver {
        inner: Arc<Mutex<FakeDbState>>,
    }

    impl FakeDbDriver {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_rows(&self, rows: u64) {
            self.inner.lock().rows = rows;
        }

        /// Fail any query containing `needle`.
        pub fn fail_on(&self, needle: &str) {
            self.inner.lock().fail_on = Some(needle.to_string());
        }

        /// Queries received, in order, as passed by the caller.
        pub fn queries(&self) -> Vec<String> {
            self.inner.lock().queries.clone()
        }
    }

    #[async_trait]
    impl DbDriver for FakeDbDriver {
        type Output = u64;
        type Error = FakeDbError;

        async fn execute(&self, query: &str) -> Result<u64, FakeDbError> {
            let mut inner = self.inner.lock();
            inner.queries.push(query.to_string());
            match &inner.fail_on {
                Some(needle) if query.contains(needle.as_str()) => {
                    Err(FakeDbError(format!("syntax error near '{needle}'")))
                }
                _ => Ok(inner.rows),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeDbDriver, FakeDbError};

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
