// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! falcon-adapters: delivery transport and the host capabilities the engine
//! can instrument

pub mod db;
pub mod http;
pub mod log;
pub mod transport;

pub use db::DbDriver;
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use log::{LogRecord, LogSink, TracingLogSink};
pub use transport::{HttpTransport, Transport, TransportError, DEFAULT_TIMEOUT};

#[cfg(any(test, feature = "test-support"))]
pub use db::{FakeDbDriver, FakeDbError};
#[cfg(any(test, feature = "test-support"))]
pub use http::{FakeHttpClient, FakeHttpError};
#[cfg(any(test, feature = "test-support"))]
pub use log::FakeLogSink;
#[cfg(any(test, feature = "test-support"))]
pub use transport::FakeTransport;
