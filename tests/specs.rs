// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level behavior specs.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/capture/mod.rs"]
mod capture;
#[path = "specs/cli/mod.rs"]
mod cli;
#[path = "specs/cron/mod.rs"]
mod cron;
#[path = "specs/instrument/mod.rs"]
mod instrument;
