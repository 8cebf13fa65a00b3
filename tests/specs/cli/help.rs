// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("heartbeat")
        .stdout_has("capture")
        .stdout_has("demo");
}

#[test]
fn heartbeat_help_shows_flags() {
    cli()
        .args(&["heartbeat", "--help"])
        .passes()
        .stdout_has("--status")
        .stdout_has("--duration-ms")
        .stdout_has("--meta");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn heartbeat_without_api_key_is_a_config_error() {
    cli().args(&["heartbeat", "daily-backup"]).exits(2).stderr_has("api_key is required");
}

#[test]
fn bad_status_is_rejected_by_the_parser() {
    cli().args(&["heartbeat", "daily-backup", "--status", "maybe"]).exits(2).stderr_has("maybe");
}
