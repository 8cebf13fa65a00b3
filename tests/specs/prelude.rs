// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for workspace specs.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;
use std::time::Duration;

pub use falcon_adapters::{FakeDbDriver, FakeHttpClient, FakeTransport, HttpResponse};
pub use falcon_core::test_support::{click, messages};
pub use falcon_core::{Breadcrumb, CapturedEvent, DataMap, FakeClock, HeartbeatStatus};
pub use falcon_engine::{
    Capability, CaptureOptions, Client, ClientOptions, ExecutionContext, HookConfig,
};

/// Upper bound for any wait on the delivery worker.
pub const WAIT: Duration = Duration::from_secs(5);

pub fn options() -> ClientOptions {
    ClientOptions::new("sk_falcon_spec").app_name("falcon-specs").environment("test")
}

/// Client on a fake clock delivering into `transport`.
pub fn client(transport: &FakeTransport) -> Client {
    client_with(options(), transport)
}

pub fn client_with(options: ClientOptions, transport: &FakeTransport) -> Client {
    Client::with_clock(options, transport.clone(), Arc::new(FakeClock::new())).unwrap()
}

/// Flush and return every delivered event.
pub fn delivered(client: &Client, transport: &FakeTransport) -> Vec<CapturedEvent> {
    assert!(client.flush(WAIT), "delivery queue did not drain");
    transport.events()
}

pub fn scope_names(event: &CapturedEvent) -> Vec<String> {
    event.scopes().iter().map(|s| s.name.clone()).collect()
}

// =============================================================================
// CLI
// =============================================================================

/// The `falcon` binary with a clean `FALCON_*` environment.
pub fn cli() -> CliBuilder {
    let mut cmd = assert_cmd::Command::cargo_bin("falcon").unwrap();
    for var in [
        "FALCON_API_KEY",
        "FALCON_APP_NAME",
        "FALCON_API_URL",
        "FALCON_ENVIRONMENT",
        "ENVIRONMENT",
        "FALCON_DEBUG",
        "FALCON_MAX_BREADCRUMBS",
        "FALCON_QUEUE_CAPACITY",
        "FALCON_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunOutput {
        let output = self.cmd.output().unwrap();
        assert!(output.status.success(), "expected success, got {:?}\n{}", output.status, stderr(&output));
        RunOutput { output }
    }

    /// Run and expect exit code `code`.
    pub fn exits(mut self, code: i32) -> RunOutput {
        let output = self.cmd.output().unwrap();
        assert_eq!(output.status.code(), Some(code), "stderr: {}", stderr(&output));
        RunOutput { output }
    }
}

pub struct RunOutput {
    output: std::process::Output,
}

impl RunOutput {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let out = self.stdout();
        assert!(out.contains(needle), "stdout missing {needle:?}:\n{out}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let err = stderr(&self.output);
        assert!(err.contains(needle), "stderr missing {needle:?}:\n{err}");
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
