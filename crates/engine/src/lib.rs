// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! falcon-engine: execution contexts, scopes, instrumentation hooks and the
//! asynchronous delivery pipeline behind the Falcon client.

mod client;
pub mod config;
mod context;
mod cron;
pub mod env;
mod error;
pub mod instrument;
mod queue;
mod reentrancy;
mod scope_guard;
mod worker;

pub use client::{global, init, CaptureOptions, Client, RequestInfo};
pub use config::{BeforeBreadcrumb, ClientOptions, ConfigError};
pub use context::{ContextId, ContextUpdate, ExecutionContext, ScopeHandle};
pub use cron::{CronGuard, CronJob};
pub use error::ClientError;
pub use instrument::{
    Capability, HookConfig, InstrumentedDb, InstrumentedHttp, InstrumentedLog, Instrumentation,
};
pub use scope_guard::ScopeGuard;
