// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! falcon-core: data model shared by the Falcon capture engine and its adapters

pub mod macros;

pub mod breadcrumb;
pub mod clock;
pub mod envelope;
pub mod error_info;
pub mod event;
pub mod heartbeat;
pub mod id;
pub mod scope;
pub mod store;
pub mod text;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use breadcrumb::{Breadcrumb, BreadcrumbKind, DataMap};
pub use clock::{Clock, FakeClock, SystemClock};
pub use envelope::Envelope;
pub use error_info::ErrorInfo;
pub use event::{CapturedEvent, EventId, EventParts, User};
pub use heartbeat::{CronHeartbeat, HeartbeatStatus, ParseStatusError};
pub use id::short;
pub use scope::{Scope, ScopeId};
pub use store::{BreadcrumbStore, DEFAULT_MAX_BREADCRUMBS};
pub use time_fmt::{format_elapsed_ms, format_utc};
